pub mod config;
pub mod session;

mod memory;
pub use memory::MemorySessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use config::{DashboardConfig, SearchScope};
pub use session::{Session, SessionStore, AUTHENTICATED_KEY, USER_KEY};

/// Errors raised by local persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize session data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("local storage unavailable: {0}")]
    Unavailable(String),
}
