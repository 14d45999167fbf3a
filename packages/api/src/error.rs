//! Uniform error type for every remote operation.

/// Message shown when a failure carries nothing a user can act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "Oppss, algo salió mal!";

/// Failure of a remote API call.
///
/// Every [`crate::ApiClient`] operation returns `Result<T, ApiError>`; a
/// `success: false` envelope is always surfaced as [`ApiError::Rejected`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, CORS, offline...).
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// Non-2xx response without a readable envelope.
    #[error("server responded with status {status}")]
    Status { status: u16 },
    /// The body was not the expected envelope or payload.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// `success: true` without the `data` the operation needs.
    #[error("response did not include data")]
    MissingData,
    /// The request could not be built from the given input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Text for the blocking notice: the server's message when it sent one,
    /// otherwise the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(msg) if !msg.trim().is_empty() => msg.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
