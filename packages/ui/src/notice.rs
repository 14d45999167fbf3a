//! Modal notices and confirmation prompts.
//!
//! Views report outcomes through [`use_notice`]; [`NoticeProvider`] renders
//! the current notice in a modal until the user dismisses it.

use api::ApiError;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::flows::SubmitError;
use crate::form::{FieldSpec, FormError};
use crate::icons::{FaCircleCheck, FaCircleExclamation, FaTriangleExclamation};
use crate::views::ModalOverlay;
use crate::Icon;

pub const CONFIRM_TITLE: &str = "¿Estás seguro?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, "¡Éxito!", message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, "¡Atención!", message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, "¡Error!", message)
    }

    pub fn from_api_error(error: &ApiError) -> Self {
        Self::error(error.user_message())
    }

    /// Blocked submissions warn; failed calls are errors.
    pub fn from_submit_error<F: FieldSpec>(error: &SubmitError<F>) -> Self {
        match error {
            SubmitError::Form(e) => Self::from_form_error(e),
            SubmitError::Api(e) => Self::from_api_error(e),
        }
    }

    pub fn from_form_error<F: FieldSpec>(error: &FormError<F>) -> Self {
        Self::warning(error.user_message())
    }
}

pub fn use_notice() -> Signal<Option<Notice>> {
    use_context::<Signal<Option<Notice>>>()
}

#[component]
pub fn NoticeProvider(children: Element) -> Element {
    let mut notice = use_context_provider(|| Signal::new(Option::<Notice>::None));

    rsx! {
        {children}
        if let Some(current) = notice() {
            ModalOverlay { on_close: move |_| notice.set(None),
                NoticeCard {
                    notice: current,
                    on_dismiss: move |_| notice.set(None),
                }
            }
        }
    }
}

#[component]
fn NoticeCard(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    let kind_class = match notice.kind {
        NoticeKind::Success => "notice-success",
        NoticeKind::Warning => "notice-warning",
        NoticeKind::Error => "notice-error",
    };
    rsx! {
        div { class: "notice {kind_class}",
            div { class: "notice-icon",
                {match notice.kind {
                    NoticeKind::Success => rsx! { Icon { icon: FaCircleCheck, width: 40, height: 40 } },
                    NoticeKind::Warning => rsx! { Icon { icon: FaTriangleExclamation, width: 40, height: 40 } },
                    NoticeKind::Error => rsx! { Icon { icon: FaCircleExclamation, width: 40, height: 40 } },
                }}
            }
            h2 { class: "notice-title", "{notice.title}" }
            p { class: "notice-message", "{notice.message}" }
            Button { onclick: move |_| on_dismiss.call(()), "Aceptar" }
        }
    }
}

/// "Are you sure?" prompt for destructive actions.
#[component]
pub fn ConfirmDialog(
    message: String,
    #[props(default = "Sí, eliminar".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay { on_close: move |_| on_cancel.call(()),
            div { class: "notice notice-warning",
                div { class: "notice-icon",
                    Icon { icon: FaTriangleExclamation, width: 40, height: 40 }
                }
                h2 { class: "notice-title", "{CONFIRM_TITLE}" }
                p { class: "notice-message", "{message}" }
                div { class: "dialog-actions",
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancelar"
                    }
                }
            }
        }
    }
}
