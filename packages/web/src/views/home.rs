use dioxus::prelude::*;
use ui::views::HomeView;

use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        HomeView {}
    }
}

/// Unknown paths land on the dashboard home.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::warn!("Unknown route /{}", segments.join("/"));
    nav.replace(Route::Home {});
    rsx! {}
}
