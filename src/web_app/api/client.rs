// web_app/api/client.rs - HTTP client for the external product API
//
// The backend (image upload endpoint, product create endpoint) is a black
// box to this application. This module wraps it behind a typed client and
// provides the process-wide instance used by the server functions.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::web_app::model::{ApiErrorBody, ApiSuccess, FieldErrors, Product, ProductDraft};

static CLIENT: OnceLock<BackendClient> = OnceLock::new();
static TEST_CLIENT_OVERRIDE: Mutex<Option<BackendClient>> = Mutex::new(None);

/// Failure modes of a product API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 422 with a per-field error map; the draft was understood but refused.
    #[error("{message}")]
    Unprocessable {
        message: String,
        field_errors: FieldErrors,
    },
    /// Any other non-success status.
    #[error("product API returned {status}: {message}")]
    Backend { status: u16, message: String },
    /// The request never produced a response (connect, timeout, decode).
    #[error("request to product API failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the product API.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create the client from the environment: `BACKEND_API_URL`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("BACKEND_API_URL")
            .unwrap_or_else(|_| "http://localhost:4000".to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload one image as multipart form data. Resolves to the URL the
    /// backend stored it under.
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> std::result::Result<String, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(self.build_url("/admin/products/upload-image"))
            .multipart(form)
            .send()
            .await?;

        let body: ApiSuccess<String> = read_success(response).await?;
        Ok(body.data)
    }

    /// Submit the assembled draft as JSON.
    pub async fn create_product(
        &self,
        draft: &ProductDraft,
    ) -> std::result::Result<ApiSuccess<Product>, ApiError> {
        let response = self
            .client
            .post(self.build_url("/admin/products"))
            .json(draft)
            .send()
            .await?;

        read_success(response).await
    }
}

async fn read_success<T: DeserializeOwned>(
    response: reqwest::Response,
) -> std::result::Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(ApiError::from);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(error_from_body(status, &body))
}

/// Map a non-success response to a typed error. A 422 body carrying a field
/// map becomes `Unprocessable` with the server's messages preserved.
fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
            let field_errors = parsed
                .data
                .as_ref()
                .map(FieldErrors::from_wire)
                .unwrap_or_default();
            return ApiError::Unprocessable {
                message: parsed.message,
                field_errors,
            };
        }
    }

    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| body.to_string());

    ApiError::Backend {
        status: status.as_u16(),
        message,
    }
}

/// Install the process-wide client used by the server functions.
pub fn init_backend(client: BackendClient) {
    tracing::info!("Initializing product API client: {}", client.base_url());
    if CLIENT.set(client).is_err() {
        tracing::warn!("Product API client already initialized");
    }
}

/// Set a client override for testing.
pub fn set_test_backend(client: BackendClient) {
    let mut guard = TEST_CLIENT_OVERRIDE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(client);
}

/// Get the process-wide client, preferring the test override.
pub fn get_backend() -> Option<BackendClient> {
    {
        let guard = TEST_CLIENT_OVERRIDE
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(ref client) = *guard {
            return Some(client.clone());
        }
    }

    CLIENT.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web_app::model::Field;

    #[test]
    fn test_unprocessable_body_becomes_field_errors() {
        let body = r#"{"message":"Validation failed","data":{"price":"must be >= 0","name":"is required"}}"#;
        let error = error_from_body(StatusCode::UNPROCESSABLE_ENTITY, body);

        match error {
            ApiError::Unprocessable {
                message,
                field_errors,
            } => {
                assert_eq!(message, "Validation failed");
                assert_eq!(field_errors.get(Field::Price), Some("must be >= 0"));
                assert_eq!(field_errors.get(Field::Name), Some("is required"));
            }
            other => panic!("expected Unprocessable, got {:?}", other),
        }
    }

    #[test]
    fn test_unprocessable_body_without_map() {
        let error = error_from_body(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"nope"}"#);
        match error {
            ApiError::Unprocessable {
                message,
                field_errors,
            } => {
                assert_eq!(message, "nope");
                assert!(field_errors.is_empty());
            }
            other => panic!("expected Unprocessable, got {:?}", other),
        }
    }

    #[test]
    fn test_other_status_becomes_backend_error() {
        let error = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"boom"}"#);
        match error {
            ApiError::Backend { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Backend, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_body_is_passed_through() {
        let error = error_from_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        match error {
            ApiError::Backend { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("bad gateway"));
            }
            other => panic!("expected Backend, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");
        assert_eq!(
            client.build_url("/admin/products"),
            "http://localhost:4000/admin/products"
        );
    }
}
