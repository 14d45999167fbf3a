//! Authentication context backed by the session flags in browser storage.
//!
//! The dashboard has no server-side session: logging in stores the user
//! record and an `isAuthenticated` flag through [`store::Session`], and every
//! route guard reads that flag.

use api::User;
use dioxus::prelude::*;
use store::{Session, SessionStore};

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub authenticated: bool,
}

impl AuthState {
    pub fn from_session<S: SessionStore>(session: &Session<S>) -> Self {
        Self {
            user: session.user(),
            authenticated: session.is_authenticated(),
        }
    }

    /// Name shown in the top bar.
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(User::full_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Usuario".to_string())
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
static FALLBACK_SESSION: std::sync::LazyLock<store::MemorySessionStore> =
    std::sync::LazyLock::new(store::MemorySessionStore::new);

/// Create a platform-appropriate session:
/// - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
/// - **Elsewhere**: a process-wide [`store::MemorySessionStore`]
pub fn make_session() -> Session<impl SessionStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Session::new(store::LocalStorageStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Session::new(FALLBACK_SESSION.clone())
    }
}

/// Get the current authentication state.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Record a successful login in storage and in the context.
pub fn sign_in(mut auth: Signal<AuthState>, user: User) {
    if let Err(e) = make_session().login(&user) {
        tracing::error!("Failed to persist session: {}", e);
    }
    auth.set(AuthState {
        user: Some(user),
        authenticated: true,
    });
}

/// Clear the session flags and the context.
pub fn sign_out(mut auth: Signal<AuthState>) {
    make_session().logout();
    auth.set(AuthState::default());
}

/// Provider component that exposes [`AuthState`] read from storage on mount.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let auth_state = use_signal(|| AuthState::from_session(&make_session()));
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}
