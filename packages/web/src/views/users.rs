use api::Role;
use dioxus::prelude::*;
use ui::views::{UserFormMode, UserFormView, UserListView};

#[component]
pub fn Users() -> Element {
    rsx! {
        UserListView { role: Role::SystemUser }
    }
}

#[component]
pub fn Clients() -> Element {
    rsx! {
        UserListView { role: Role::Client }
    }
}

#[component]
pub fn NewUser() -> Element {
    rsx! {
        UserFormView { mode: UserFormMode::NewUser }
    }
}

#[component]
pub fn NewClient() -> Element {
    rsx! {
        UserFormView { mode: UserFormMode::NewClient }
    }
}
