//! Small form and layout primitives shared by the views.

use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Destructive,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Secondary => "btn-secondary",
            ButtonVariant::Outline => "btn-outline",
            ButtonVariant::Destructive => "btn-destructive",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] class: String,
    #[props(default)] disabled: bool,
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let button_type = r#type;
    let variant_class = variant.class();
    rsx! {
        button {
            class: "btn {variant_class} {class}",
            r#type: button_type,
            disabled,
            onclick: move |evt| {
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "form-label", r#for: "{html_for}", {children} }
    }
}

#[component]
pub fn Input(
    id: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] disabled: bool,
    #[props(default)] invalid: bool,
    #[props(default)] oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    let input_type = r#type;
    rsx! {
        input {
            id: "{id}",
            name: "{id}",
            class: "form-control {class}",
            class: if invalid { "is-invalid" },
            r#type: input_type,
            placeholder: "{placeholder}",
            value: "{value}",
            disabled,
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Textarea(
    id: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default = 3)] rows: u32,
    #[props(default)] invalid: bool,
    #[props(default)] oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            name: "{id}",
            class: "form-control",
            class: if invalid { "is-invalid" },
            rows: "{rows}",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

/// Inline validation message under a field.
#[component]
pub fn FieldError(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "field-error", "{message}" }
        }
    }
}

/// Labelled text input bound to one form field.
#[component]
pub fn TextField(
    id: String,
    label: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    value: String,
    error: Option<String>,
    oninput: EventHandler<String>,
) -> Element {
    let input_type = r#type;
    rsx! {
        div { class: "form-group",
            Label { html_for: id.clone(), "{label}" }
            Input {
                id,
                r#type: input_type,
                placeholder,
                value,
                invalid: error.is_some(),
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            FieldError { message: error }
        }
    }
}

/// Previous / "Página x de y" / next controls for a list view.
#[component]
pub fn Pagination(
    page: usize,
    page_count: usize,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    let last_page = page_count.max(1);
    rsx! {
        div { class: "pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: page <= 1,
                onclick: move |_| on_previous.call(()),
                "Anterior"
            }
            span { class: "pagination-status", "Página {page} de {last_page}" }
            Button {
                variant: ButtonVariant::Outline,
                disabled: page >= page_count,
                onclick: move |_| on_next.call(()),
                "Siguiente"
            }
        }
    }
}
