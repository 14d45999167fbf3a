use api::Product;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Pagination};
use crate::flows::{delete_and_remove, load_list};
use crate::icons::{FaMagnifyingGlass, FaPenToSquare, FaTrashCan};
use crate::listing::{ListState, LoadState};
use crate::views::ProductEditDialog;
use crate::{use_client, use_config, use_notice, ConfirmDialog, Icon, Notice};

fn price_label(price: f64) -> String {
    format!("S/. {price:.2}")
}

/// Card grid of the catalogue with search, pagination and per-card edit and
/// delete actions. Every successful change refetches the catalogue.
#[component]
pub fn ProductListView() -> Element {
    let client = use_client();
    let config = use_config();
    let mut notice = use_notice();
    let mut list = use_signal(|| {
        ListState::<Product>::new(config.listing.page_size, config.listing.search_scope)
    });
    let mut editing = use_signal(|| Option::<Product>::None);
    let mut deleting = use_signal(|| Option::<Product>::None);
    let mut delete_busy = use_signal(|| false);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            load_list(list, client.list_products()).await;
        }
    });

    let confirm_delete = move |_: ()| {
        let Some(id) = deleting().and_then(|p| p.id_product) else {
            deleting.set(None);
            return;
        };
        let client = client.clone();
        delete_busy.set(true);
        spawn(async move {
            match delete_and_remove(list, id, client.delete_product(id)).await {
                Ok(msg) => {
                    notice.set(Some(Notice::success(msg)));
                    loader.restart();
                }
                Err(e) => notice.set(Some(Notice::from_api_error(&e))),
            }
            delete_busy.set(false);
            deleting.set(None);
        });
    };

    let state = list.read();
    let cards: Vec<Product> = state.visible().into_iter().cloned().collect();
    let empty = cards.is_empty() && *state.load_state() == LoadState::Ready;

    rsx! {
        div { class: "card",
            div { class: "list-header",
                h4 { class: "card-title", "Lista de productos" }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| loader.restart(),
                    "Actualizar"
                }
                div { class: "search-box",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    Input {
                        id: "search",
                        placeholder: "Buscar producto...",
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

            if empty {
                p { class: "muted", "No se encontraron productos." }
            }

            div { class: "product-grid",
                for product in cards {
                    div { key: "{product.id_product:?}", class: "product-card",
                        if !product.url_image.is_empty() {
                            img {
                                class: "product-image",
                                src: "{product.url_image}",
                                alt: "{product.name}",
                            }
                        }
                        div { class: "product-body",
                            h5 { class: "product-name", "{product.name}" }
                            span { class: "product-category", "{product.category}" }
                            p { class: "product-price", {price_label(product.price)} }
                            p { class: "muted", "Stock: {product.stock}" }
                            p { class: "product-description", "{product.description}" }
                        }
                        div { class: "row-actions",
                            button {
                                class: "icon-button",
                                title: "Editar",
                                onclick: {
                                    let product = product.clone();
                                    move |_| editing.set(Some(product.clone()))
                                },
                                Icon { icon: FaPenToSquare, width: 14, height: 14 }
                            }
                            button {
                                class: "icon-button danger",
                                title: "Eliminar",
                                onclick: {
                                    let product = product.clone();
                                    move |_| deleting.set(Some(product.clone()))
                                },
                                Icon { icon: FaTrashCan, width: 14, height: 14 }
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

        if let Some(product) = editing() {
            ProductEditDialog {
                product,
                on_saved: move |_| {
                    editing.set(None);
                    loader.restart();
                },
                on_cancel: move |_| editing.set(None),
            }
        }

        if let Some(product) = deleting() {
            ConfirmDialog {
                message: format!("Se eliminará el producto {}. ¡No podrás revertir esto!", product.name),
                busy: delete_busy(),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}
