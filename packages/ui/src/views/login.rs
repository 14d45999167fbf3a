use api::Credentials;
use dioxus::prelude::*;

use crate::components::{Button, TextField};
use crate::validation::validate_required;
use crate::{sign_in, use_auth, use_client, use_notice, Notice};

/// Email-or-DNI and password sign-in card.
///
/// On success the session is stored and `on_signed_in` fires; a rejected
/// login shows the server's message.
#[component]
pub fn LoginView(on_signed_in: EventHandler<()>, on_register: EventHandler<()>) -> Element {
    let client = use_client();
    let auth = use_auth();
    let mut notice = use_notice();
    let mut user_request = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut user_error = use_signal(|| Option::<String>::None);
    let mut password_error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        user_error.set(validate_required(Some(user_request().as_str())));
        password_error.set(validate_required(Some(password().as_str())));
        if user_error().is_some() || password_error().is_some() {
            return;
        }

        let client = client.clone();
        let credentials = Credentials {
            user_request: user_request().trim().to_string(),
            password: password(),
        };
        submitting.set(true);
        spawn(async move {
            match client.login(&credentials).await {
                Ok(user) => {
                    tracing::info!("Signed in as {}", user.mail);
                    let greeting = format!("Bienvenido {}", user.first_name);
                    sign_in(auth, user);
                    notice.set(Some(Notice::success(greeting)));
                    on_signed_in.call(());
                }
                Err(e) => notice.set(Some(Notice::from_api_error(&e))),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                div { class: "auth-brand", "Yogurt " span { "MAFER" } }
                h5 { class: "muted", "¡Bienvenido! Inicia sesión en tu cuenta." }
                form { onsubmit: handle_submit,
                    TextField {
                        id: "userEmail",
                        label: "Correo electrónico o DNI",
                        placeholder: "Email",
                        value: user_request(),
                        error: user_error(),
                        oninput: move |v: String| user_request.set(v),
                    }
                    TextField {
                        id: "userPassword",
                        label: "Contraseña",
                        r#type: "password",
                        placeholder: "Contraseña",
                        value: password(),
                        error: password_error(),
                        oninput: move |v: String| password.set(v),
                    }
                    Button { r#type: "submit", disabled: submitting(),
                        if submitting() { "Ingresando..." } else { "Iniciar sesión" }
                    }
                }
                p { class: "auth-switch",
                    "¿No tienes una cuenta? "
                    a {
                        href: "#",
                        onclick: move |evt: Event<MouseData>| {
                            evt.prevent_default();
                            on_register.call(());
                        },
                        "Regístrate"
                    }
                }
            }
        }
    }
}
