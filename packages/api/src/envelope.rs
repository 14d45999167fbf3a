//! The `{success, msg, data?}` wrapper every endpoint responds with.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::ApiResponse;
use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(msg: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            msg: msg.into(),
            data,
        }
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
            data: None,
        }
    }
}

/// A successful envelope: the server message plus the decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted<T> {
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Accepted<T> {
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData)
    }
}

/// Turn a raw response into an [`Accepted`] payload or an [`ApiError`].
///
/// The envelope is read loosely first so a `success: false` answer is reported
/// as [`ApiError::Rejected`] even when its `data` has an unexpected shape.
pub fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<Accepted<T>, ApiError> {
    let envelope: Envelope<serde_json::Value> = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(_) if !response.is_success_status() => {
            return Err(ApiError::Status {
                status: response.status,
            })
        }
        Err(e) => return Err(ApiError::Decode(e.to_string())),
    };

    if !envelope.success {
        return Err(ApiError::Rejected(envelope.msg));
    }
    if !response.is_success_status() {
        return Err(ApiError::Status {
            status: response.status,
        });
    }

    let data = match envelope.data {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => {
            Some(serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?)
        }
    };
    Ok(Accepted {
        msg: envelope.msg,
        data,
    })
}
