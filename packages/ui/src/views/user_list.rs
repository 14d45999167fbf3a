use api::{ApiError, Role, User};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Pagination};
use crate::flows::{delete_and_remove, load_list};
use crate::icons::{FaMagnifyingGlass, FaPenToSquare, FaTrashCan};
use crate::listing::{ListState, LoadState};
use crate::views::UserEditDialog;
use crate::{use_client, use_config, use_notice, ConfirmDialog, Icon, Notice};

fn title(role: Role) -> &'static str {
    match role {
        Role::SystemUser => "Lista de usuarios",
        Role::Client => "Lista de clientes",
    }
}

/// Searchable, paginated table of the users with `role`, with edit and
/// delete actions per row.
#[component]
pub fn UserListView(role: Role) -> Element {
    let client = use_client();
    let config = use_config();
    let mut notice = use_notice();
    let mut list = use_signal(|| {
        ListState::<User>::new(config.listing.page_size, config.listing.search_scope)
    });
    let mut editing = use_signal(|| Option::<User>::None);
    let mut deleting = use_signal(|| Option::<User>::None);
    let mut delete_busy = use_signal(|| false);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            let fetch = async {
                let users = client.list_users().await?;
                Ok::<Vec<User>, ApiError>(users.into_iter().filter(|u| u.rol == role).collect())
            };
            load_list(list, fetch).await;
        }
    });

    let confirm_delete = move |_: ()| {
        let Some(id) = deleting().and_then(|u| u.id_user) else {
            deleting.set(None);
            return;
        };
        let client = client.clone();
        delete_busy.set(true);
        spawn(async move {
            match delete_and_remove(list, id, client.delete_user(id)).await {
                Ok(msg) => notice.set(Some(Notice::success(msg))),
                Err(e) => notice.set(Some(Notice::from_api_error(&e))),
            }
            delete_busy.set(false);
            deleting.set(None);
        });
    };

    let state = list.read();
    let rows: Vec<User> = state.visible().into_iter().cloned().collect();
    let first_row = (state.page() - 1) * state.page_size();

    rsx! {
        div { class: "card",
            div { class: "list-header",
                h4 { class: "card-title", "{title(role)}" }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| loader.restart(),
                    "Actualizar"
                }
                div { class: "search-box",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    Input {
                        id: "search",
                        placeholder: "Buscar...",
                        value: state.search().to_string(),
                        oninput: move |evt: FormEvent| list.write().set_search(evt.value()),
                    }
                }
            }

            {match state.load_state() {
                LoadState::Loading => rsx! { p { class: "muted", "Cargando..." } },
                LoadState::Failed(message) => rsx! { p { class: "field-error", "{message}" } },
                LoadState::Ready => rsx! {},
            }}

            div { class: "table-responsive",
                table { class: "table",
                    thead {
                        tr {
                            th { "#" }
                            th { "Nombres" }
                            th { "Apellidos" }
                            th { "DNI" }
                            th { "Dirección" }
                            th { "Teléfono" }
                            th { "Correo" }
                            th { "Acciones" }
                        }
                    }
                    tbody {
                        for (i, user) in rows.into_iter().enumerate() {
                            tr { key: "{user.id_user:?}-{i}",
                                td { {(first_row + i + 1).to_string()} }
                                td { "{user.first_name}" }
                                td { "{user.last_name}" }
                                td { "{user.dni}" }
                                td { "{user.address}" }
                                td { "{user.phone}" }
                                td { "{user.mail}" }
                                td { class: "row-actions",
                                    button {
                                        class: "icon-button",
                                        title: "Editar",
                                        onclick: {
                                            let user = user.clone();
                                            move |_| editing.set(Some(user.clone()))
                                        },
                                        Icon { icon: FaPenToSquare, width: 14, height: 14 }
                                    }
                                    button {
                                        class: "icon-button danger",
                                        title: "Eliminar",
                                        onclick: {
                                            let user = user.clone();
                                            move |_| deleting.set(Some(user.clone()))
                                        },
                                        Icon { icon: FaTrashCan, width: 14, height: 14 }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            Pagination {
                page: state.page(),
                page_count: state.page_count(),
                on_previous: move |_| list.write().previous_page(),
                on_next: move |_| list.write().next_page(),
            }
        }

        if let Some(user) = editing() {
            UserEditDialog {
                user,
                on_saved: move |saved: User| {
                    list.write().replace(saved);
                    editing.set(None);
                },
                on_cancel: move |_| editing.set(None),
            }
        }

        if let Some(user) = deleting() {
            ConfirmDialog {
                message: format!("Se eliminará a {}. ¡No podrás revertir esto!", user.full_name()),
                busy: delete_busy(),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}
