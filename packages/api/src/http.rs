//! `reqwest`-backed transport. On wasm32 reqwest drives the browser's `fetch`.

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::backend::{ApiRequest, ApiResponse, FormPart, HttpBackend, Method, RequestBody};
use crate::ApiError;

/// Sends requests to a remote API rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
    base_url: String,
}

impl ReqwestBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL and a request path with exactly one slash.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn multipart_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, upload } => {
                let file = Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(&upload.content_type)
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path);
        tracing::debug!("{} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", request.method, url, e);
            ApiError::Transport(e.to_string())
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_with_one_slash() {
        let backend = ReqwestBackend::new("https://example.com/api/");
        assert_eq!(backend.url_for("/user"), "https://example.com/api/user");
        let backend = ReqwestBackend::new("https://example.com/api");
        assert_eq!(
            backend.url_for("user/Delete/3"),
            "https://example.com/api/user/Delete/3"
        );
    }
}
