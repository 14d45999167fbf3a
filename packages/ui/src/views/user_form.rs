use api::{Role, User};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, TextField};
use crate::flows::{save_user_changes, submit_user};
use crate::form::{FieldSpec, UserField, UserForm, USER_REQUIRED};
use crate::views::ModalOverlay;
use crate::{use_client, use_notice, Notice};

/// Which record a [`UserFormView`] creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFormMode {
    /// An internal user, created from the dashboard.
    NewUser,
    /// A shop client, created from the dashboard.
    NewClient,
    /// Self-registration from the public register page.
    Registration,
}

impl UserFormMode {
    fn title(self) -> &'static str {
        match self {
            UserFormMode::NewUser => "Nuevo usuario",
            UserFormMode::NewClient => "Nuevo cliente",
            UserFormMode::Registration => "Crear una cuenta",
        }
    }

    fn form(self) -> UserForm {
        match self {
            UserFormMode::NewUser => UserForm::new(Role::SystemUser, &USER_REQUIRED),
            UserFormMode::NewClient => UserForm::new(Role::Client, &USER_REQUIRED),
            UserFormMode::Registration => UserForm::registration(),
        }
    }

    fn fields(self) -> &'static [UserField] {
        const BASE: [UserField; 7] = USER_REQUIRED;
        const WITH_BIRTH_DATE: [UserField; 8] = crate::form::REGISTRATION_REQUIRED;
        match self {
            UserFormMode::Registration => &WITH_BIRTH_DATE,
            _ => &BASE,
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            UserFormMode::NewUser => "El usuario se registró correctamente!",
            UserFormMode::NewClient => "El cliente se registró correctamente!",
            UserFormMode::Registration => "Tu cuenta se creó correctamente!",
        }
    }
}

fn input_type(field: UserField) -> &'static str {
    match field {
        UserField::Password => "password",
        UserField::Mail => "email",
        UserField::Phone => "tel",
        UserField::BirthDate => "date",
        _ => "text",
    }
}

/// One labelled input per field, bound to `form`.
#[component]
fn UserFields(mut form: Signal<UserForm>, fields: Vec<UserField>) -> Element {
    rsx! {
        div { class: "form-grid",
            for field in fields {
                TextField {
                    key: "{field:?}",
                    id: format!("{field:?}"),
                    label: field.label().to_string(),
                    r#type: input_type(field).to_string(),
                    placeholder: field.label().to_string(),
                    value: form.read().fields.value(field).to_string(),
                    error: form.read().fields.error(field).map(str::to_string),
                    oninput: move |v: String| form.write().set(field, v),
                }
            }
        }
    }
}

/// Create form for users, clients and self-registration.
#[component]
pub fn UserFormView(
    mode: UserFormMode,
    #[props(default)] on_created: Option<EventHandler<()>>,
) -> Element {
    let client = use_client();
    let mut notice = use_notice();
    let form = use_signal(move || mode.form());
    let submitting = form.read().fields.is_submitting();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            match submit_user(&client, form).await {
                Ok(msg) => {
                    tracing::info!("{}: {}", mode.title(), msg);
                    notice.set(Some(Notice::success(mode.success_message())));
                    if let Some(handler) = on_created {
                        handler.call(());
                    }
                }
                Err(e) => notice.set(Some(Notice::from_submit_error(&e))),
            }
        });
    };

    rsx! {
        div { class: "card form-card",
            h4 { class: "card-title", "{mode.title()}" }
            form { onsubmit: handle_submit,
                UserFields { form, fields: mode.fields().to_vec() }
                Button { r#type: "submit", disabled: submitting,
                    if submitting { "Guardando..." } else { "Registrar" }
                }
            }
        }
    }
}

/// Modal editor for an existing user or client.
#[component]
pub fn UserEditDialog(user: User, on_saved: EventHandler<User>, on_cancel: EventHandler<()>) -> Element {
    let client = use_client();
    let mut notice = use_notice();
    let form = use_signal(|| UserForm::for_edit(&user));
    let submitting = form.read().fields.is_submitting();
    let mut fields = USER_REQUIRED.to_vec();
    fields.push(UserField::BirthDate);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            match save_user_changes(&client, form).await {
                Ok((msg, saved)) => {
                    notice.set(Some(Notice::success(msg)));
                    on_saved.call(saved);
                }
                Err(e) => notice.set(Some(Notice::from_submit_error(&e))),
            }
        });
    };

    rsx! {
        ModalOverlay { wide: true, on_close: move |_| on_cancel.call(()),
            div { class: "dialog",
                h4 { class: "card-title", "Editar {user.full_name()}" }
                form { onsubmit: handle_submit,
                    UserFields { form, fields }
                    p { class: "muted", "Deja la contraseña en blanco para mantener la actual." }
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
