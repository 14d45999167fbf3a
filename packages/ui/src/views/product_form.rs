use api::{Category, Product};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, FieldError, Label, TextField, Textarea};
use crate::flows::{save_product_changes, submit_product};
use crate::form::{FieldSpec, ProductField, ProductForm};
use crate::upload::{preview_url, read_first_file, PreviewUrl};
use crate::views::ModalOverlay;
use crate::{use_client, use_notice, Notice};

/// Inputs for every product field plus the image picker.
#[component]
fn ProductFields(
    mut form: Signal<ProductForm>,
    mut preview: Signal<PreviewUrl>,
    #[props(default)] current_image: Option<String>,
) -> Element {
    let state = form.read();
    let category = state.fields.value(ProductField::Category).to_string();
    let shown_image = preview.read().get().map(str::to_string).or(current_image);

    let text_error = |field| state.fields.error(field).map(str::to_string);

    rsx! {
        div { class: "form-grid",
            TextField {
                id: "Name",
                label: ProductField::Name.label().to_string(),
                placeholder: "Nombre del producto",
                value: state.fields.value(ProductField::Name).to_string(),
                error: text_error(ProductField::Name),
                oninput: move |v: String| form.write().set(ProductField::Name, v),
            }
            div { class: "form-group",
                Label { html_for: "Category", "{ProductField::Category.label()}" }
                select {
                    id: "Category",
                    class: "form-control",
                    value: "{category}",
                    onchange: move |evt: FormEvent| form.write().set(ProductField::Category, evt.value()),
                    for choice in Category::ALL {
                        option {
                            key: "{choice}",
                            value: "{choice}",
                            selected: category == choice.as_str(),
                            "{choice}"
                        }
                    }
                }
                FieldError { message: text_error(ProductField::Category) }
            }
            TextField {
                id: "Price",
                label: ProductField::Price.label().to_string(),
                r#type: "number",
                placeholder: "0.00",
                value: state.fields.value(ProductField::Price).to_string(),
                error: text_error(ProductField::Price),
                oninput: move |v: String| form.write().set(ProductField::Price, v),
            }
            TextField {
                id: "Stock",
                label: ProductField::Stock.label().to_string(),
                r#type: "number",
                placeholder: "0",
                value: state.fields.value(ProductField::Stock).to_string(),
                error: text_error(ProductField::Stock),
                oninput: move |v: String| form.write().set(ProductField::Stock, v),
            }
        }
        div { class: "form-group",
            Label { html_for: "Description", "{ProductField::Description.label()}" }
            Textarea {
                id: "Description",
                value: state.fields.value(ProductField::Description).to_string(),
                invalid: text_error(ProductField::Description).is_some(),
                oninput: move |evt: FormEvent| form.write().set(ProductField::Description, evt.value()),
            }
            FieldError { message: text_error(ProductField::Description) }
        }
        div { class: "form-group",
            Label { html_for: "NutritionalInformation", "{ProductField::NutritionalInformation.label()}" }
            Textarea {
                id: "NutritionalInformation",
                value: state.fields.value(ProductField::NutritionalInformation).to_string(),
                invalid: text_error(ProductField::NutritionalInformation).is_some(),
                oninput: move |evt: FormEvent| {
                    form.write().set(ProductField::NutritionalInformation, evt.value())
                },
            }
            FieldError { message: text_error(ProductField::NutritionalInformation) }
        }
        div { class: "form-group",
            Label { html_for: "file", "Imagen" }
            input {
                id: "file",
                r#type: "file",
                accept: "image/*",
                class: "form-control",
                onchange: move |evt: FormEvent| {
                    spawn(async move {
                        if let Some(upload) = read_first_file(evt).await {
                            let url = upload.is_image().then(|| preview_url(&upload)).flatten();
                            preview.write().replace(url);
                            form.write().set_image(upload);
                        }
                    });
                },
            }
            FieldError { message: state.image_error().map(str::to_string) }
            if let Some(src) = shown_image {
                img { class: "image-preview", src: "{src}", alt: "Vista previa" }
            }
        }
    }
}

/// Create form for a new product.
#[component]
pub fn ProductFormView() -> Element {
    let client = use_client();
    let mut notice = use_notice();
    let form = use_signal(ProductForm::new);
    let mut preview = use_signal(PreviewUrl::default);
    let submitting = form.read().fields.is_submitting();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            match submit_product(&client, form).await {
                Ok(msg) => {
                    tracing::info!("Product created: {}", msg);
                    preview.write().replace(None);
                    notice.set(Some(Notice::success(msg)));
                }
                Err(e) => notice.set(Some(Notice::from_submit_error(&e))),
            }
        });
    };

    rsx! {
        div { class: "card form-card",
            h4 { class: "card-title", "Nuevo producto" }
            form { onsubmit: handle_submit,
                ProductFields { form, preview }
                Button { r#type: "submit", disabled: submitting,
                    if submitting { "Guardando..." } else { "Registrar producto" }
                }
            }
        }
    }
}

/// Modal editor for an existing product. The stored image is kept unless a
/// new one is picked.
#[component]
pub fn ProductEditDialog(
    product: Product,
    on_saved: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let client = use_client();
    let mut notice = use_notice();
    let form = use_signal(|| ProductForm::for_edit(&product));
    let preview = use_signal(PreviewUrl::default);
    let submitting = form.read().fields.is_submitting();
    let current_image = Some(product.url_image.clone()).filter(|u| !u.is_empty());

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            match save_product_changes(&client, form).await {
                Ok(msg) => {
                    notice.set(Some(Notice::success(msg)));
                    on_saved.call(());
                }
                Err(e) => notice.set(Some(Notice::from_submit_error(&e))),
            }
        });
    };

    rsx! {
        ModalOverlay { wide: true, on_close: move |_| on_cancel.call(()),
            div { class: "dialog",
                h4 { class: "card-title", "Editar producto" }
                form { onsubmit: handle_submit,
                    ProductFields { form, preview, current_image }
                    div { class: "dialog-actions",
                        Button { r#type: "submit", disabled: submitting,
                            if submitting { "Guardando..." } else { "Guardar cambios" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| on_cancel.call(()),
                            "Cancelar"
                        }
                    }
                }
            }
        }
    }
}
