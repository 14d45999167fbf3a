//! # Transport abstraction
//!
//! [`HttpBackend`] is the one seam between [`crate::ApiClient`] and the network.
//! A request is a method, a path relative to the API base URL and a body; a
//! response is a status code and the raw body text. Envelope parsing stays in
//! the client so every backend behaves the same.
//!
//! Implementations: [`crate::ReqwestBackend`] (browser `fetch` on wasm, hyper
//! on native) and [`crate::MemoryBackend`] (in-process emulation for tests).

use crate::models::ImageUpload;
use crate::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, upload: ImageUpload },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, upload: ImageUpload) -> Self {
        FormPart::File {
            name: name.into(),
            upload,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn json(method: Method, path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Json(body),
        }
    }

    pub fn multipart(method: Method, path: impl Into<String>, parts: Vec<FormPart>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Multipart(parts),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async transport for API requests.
pub trait HttpBackend {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>>;
}
