use dioxus::prelude::*;

use crate::icons::{FaBars, FaBox, FaHouse, FaRightFromBracket, FaUserGear, FaUsers};
use crate::{use_auth, Icon};

/// Destinations reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    NewClient,
    Clients,
    NewProduct,
    Products,
    NewUser,
    Users,
}

impl NavTarget {
    pub fn label(self) -> &'static str {
        match self {
            NavTarget::Home => "Dashboard",
            NavTarget::NewClient => "Nuevo cliente",
            NavTarget::Clients => "Clientes",
            NavTarget::NewProduct => "Nuevo producto",
            NavTarget::Products => "Productos",
            NavTarget::NewUser => "Nuevo usuario",
            NavTarget::Users => "Usuarios",
        }
    }
}

#[component]
fn NavLinkItem(
    target: NavTarget,
    current: Option<NavTarget>,
    on_navigate: EventHandler<NavTarget>,
) -> Element {
    rsx! {
        li {
            class: "nav-item",
            class: if current == Some(target) { "active" },
            a {
                class: "nav-link",
                href: "#",
                onclick: move |evt: Event<MouseData>| {
                    evt.prevent_default();
                    on_navigate.call(target);
                },
                "{target.label()}"
            }
        }
    }
}

/// A collapsible sidebar group ("Clientes", "Productos", ...).
#[component]
fn NavGroup(
    title: String,
    icon: Element,
    items: Vec<NavTarget>,
    current: Option<NavTarget>,
    on_navigate: EventHandler<NavTarget>,
) -> Element {
    let contains_current = current.is_some_and(|c| items.contains(&c));
    let mut open = use_signal(move || contains_current);

    rsx! {
        li { class: "nav-item",
            a {
                class: "nav-link nav-group-toggle",
                href: "#",
                onclick: move |evt: Event<MouseData>| {
                    evt.prevent_default();
                    open.toggle();
                },
                span { class: "link-icon", {icon} }
                span { class: "link-title", "{title}" }
            }
            if open() {
                ul { class: "nav sub-menu",
                    for target in items.iter().copied() {
                        NavLinkItem { key: "{target.label()}", target, current, on_navigate }
                    }
                }
            }
        }
    }
}

/// Sidebar, top bar and footer around the routed page.
///
/// The top bar shows the signed-in user's name and the logout action.
#[component]
pub fn AppLayoutView(
    current: Option<NavTarget>,
    on_navigate: EventHandler<NavTarget>,
    on_logout: EventHandler<()>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let mut sidebar_open = use_signal(|| false);
    let mut navigate = move |target: NavTarget| {
        sidebar_open.set(false);
        on_navigate.call(target);
    };

    rsx! {
        div { class: "main-wrapper",
            nav {
                class: "sidebar",
                class: if sidebar_open() { "sidebar-open" },
                div { class: "sidebar-header",
                    span { class: "sidebar-brand", "Yogurt " span { "MAFER" } }
                }
                ul { class: "nav",
                    li { class: "nav-category", "Principal" }
                    li {
                        class: "nav-item",
                        class: if current == Some(NavTarget::Home) { "active" },
                        a {
                            class: "nav-link",
                            href: "#",
                            onclick: move |evt: Event<MouseData>| {
                                evt.prevent_default();
                                navigate(NavTarget::Home);
                            },
                            span { class: "link-icon", Icon { icon: FaHouse, width: 16, height: 16 } }
                            span { class: "link-title", "{NavTarget::Home.label()}" }
                        }
                    }

                    li { class: "nav-category", "Mantenimiento" }
                    NavGroup {
                        title: "Clientes",
                        icon: rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
                        items: vec![NavTarget::NewClient, NavTarget::Clients],
                        current,
                        on_navigate: navigate,
                    }
                    NavGroup {
                        title: "Productos",
                        icon: rsx! { Icon { icon: FaBox, width: 16, height: 16 } },
                        items: vec![NavTarget::NewProduct, NavTarget::Products],
                        current,
                        on_navigate: navigate,
                    }

                    li { class: "nav-category", "Configuración" }
                    NavGroup {
                        title: "Usuarios",
                        icon: rsx! { Icon { icon: FaUserGear, width: 16, height: 16 } },
                        items: vec![NavTarget::NewUser, NavTarget::Users],
                        current,
                        on_navigate: navigate,
                    }
                }
            }

            div { class: "page-wrapper",
                header { class: "topbar",
                    button {
                        class: "sidebar-toggler",
                        title: "Menú",
                        onclick: move |_| sidebar_open.toggle(),
                        Icon { icon: FaBars, width: 18, height: 18 }
                    }
                    div { class: "topbar-user",
                        span { class: "topbar-user-name", "{auth().display_name()}" }
                        button {
                            class: "topbar-logout",
                            title: "Cerrar sesión",
                            onclick: move |_| on_logout.call(()),
                            Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                            span { "Salir" }
                        }
                    }
                }

                main { class: "page-content", {children} }

                footer { class: "footer",
                    p { "Copyright © 2024 YOGURT MAFER" }
                }
            }
        }
    }
}
