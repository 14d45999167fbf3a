//! Login page view.

use dioxus::prelude::*;
use ui::use_auth;
use ui::views::LoginView;

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Already signed in: go straight to the dashboard
    if auth().authenticated {
        nav.replace(Route::Home {});
    }

    rsx! {
        LoginView {
            on_signed_in: move |_| {
                nav.replace(Route::Home {});
            },
            on_register: move |_| {
                nav.push(Route::Register {});
            },
        }
    }
}
