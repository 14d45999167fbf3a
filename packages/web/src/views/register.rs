//! Self-registration page view.

use dioxus::prelude::*;
use ui::use_auth;
use ui::views::{UserFormMode, UserFormView};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    if auth().authenticated {
        nav.replace(Route::Home {});
    }

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card wide",
                div { class: "auth-brand", "Yogurt " span { "MAFER" } }
                UserFormView {
                    mode: UserFormMode::Registration,
                    on_created: move |_| {
                        nav.push(Route::Login {});
                    },
                }
                p { class: "auth-switch",
                    "¿Ya tienes una cuenta? "
                    Link { to: Route::Login {}, "Inicia sesión" }
                }
            }
        }
    }
}
