use dioxus::prelude::*;

use store::DashboardConfig;
use ui::{AuthProvider, NoticeProvider};
use views::{
    Clients, Home, Login, NewClient, NewProduct, NewUser, NotFound, Products, Register, Shell,
    Users,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/users")]
        Users {},
        #[route("/new-user")]
        NewUser {},
        #[route("/clients")]
        Clients {},
        #[route("/new-client")]
        NewClient {},
        #[route("/products")]
        Products {},
        #[route("/new-product")]
        NewProduct {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Embedded at build time; `DASHBOARD_API_URL` overrides the base URL.
const DASHBOARD_TOML: &str = include_str!("../dashboard.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let config = DashboardConfig::load(DASHBOARD_TOML, option_env!("DASHBOARD_API_URL"));
        tracing::info!("API base URL: {}", config.api.base_url);
        config
    });

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::DASHBOARD_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            NoticeProvider {
                Router::<Route> {}
            }
        }
    }
}
