use dioxus::prelude::*;

use ui::views::{AppLayoutView, NavTarget};
use ui::{sign_out, use_auth};

use crate::Route;

fn route_for(target: NavTarget) -> Route {
    match target {
        NavTarget::Home => Route::Home {},
        NavTarget::NewClient => Route::NewClient {},
        NavTarget::Clients => Route::Clients {},
        NavTarget::NewProduct => Route::NewProduct {},
        NavTarget::Products => Route::Products {},
        NavTarget::NewUser => Route::NewUser {},
        NavTarget::Users => Route::Users {},
    }
}

fn target_for(route: &Route) -> Option<NavTarget> {
    match route {
        Route::Home {} => Some(NavTarget::Home),
        Route::NewClient {} => Some(NavTarget::NewClient),
        Route::Clients {} => Some(NavTarget::Clients),
        Route::NewProduct {} => Some(NavTarget::NewProduct),
        Route::Products {} => Some(NavTarget::Products),
        Route::NewUser {} => Some(NavTarget::NewUser),
        Route::Users {} => Some(NavTarget::Users),
        _ => None,
    }
}

/// Authenticated layout. Anonymous visitors are sent to the login page.
#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    if !auth().authenticated {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        AppLayoutView {
            current: target_for(&route),
            on_navigate: move |target: NavTarget| {
                nav.push(route_for(target));
            },
            on_logout: move |_| {
                tracing::info!("Signing out");
                sign_out(auth);
                nav.replace(Route::Login {});
            },
            Outlet::<Route> {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_targets_round_trip_through_routes() {
        for target in [
            NavTarget::Home,
            NavTarget::NewClient,
            NavTarget::Clients,
            NavTarget::NewProduct,
            NavTarget::Products,
            NavTarget::NewUser,
            NavTarget::Users,
        ] {
            assert_eq!(target_for(&route_for(target)), Some(target));
        }
        assert_eq!(target_for(&Route::Login {}), None);
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(route_for(NavTarget::NewProduct).to_string(), "/new-product");
        assert_eq!(Route::Login {}.to_string(), "/login");
    }
}
