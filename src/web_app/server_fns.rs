// web_app/server_fns.rs - Leptos server function declarations
//
// These are the server function declarations that are accessible from both
// client (WASM) and server (native Rust). The #[server] macro automatically
// generates:
// - On server: The actual function implementation
// - On client: A stub that makes HTTP POST requests to the server
//
// The server side forwards to the external product API through the shared
// BackendClient. A structured 422 rejection is returned in the Ok channel
// (CreateProductResult::Rejected) so the per-field messages survive the
// boundary; everything else fails the server function itself.

use leptos::prelude::*;

use crate::web_app::model::{CreateProductResult, ProductDraft, UploadedImage};

#[cfg(feature = "ssr")]
fn backend() -> Result<crate::web_app::api::client::BackendClient, ServerFnError> {
    use crate::web_app::api::client;

    // First try the reactive context (for testing or if manually provided)
    if let Some(client) = use_context::<client::BackendClient>() {
        return Ok(client);
    }

    // Then the process-wide client installed at startup
    if let Some(client) = client::get_backend() {
        return Ok(client);
    }

    // Last resort: construct from the environment
    client::BackendClient::from_env().map_err(|e| {
        tracing::error!("Product API client unavailable: {}", e);
        ServerFnError::new(format!("Product API client unavailable: {}", e))
    })
}

/// Upload one product image; resolves to the URL the backend stored it
/// under. The payload crosses the boundary base64-encoded.
#[server(UploadImage, "/api")]
pub async fn upload_image(
    file_name: String,
    content_base64: String,
) -> Result<UploadedImage, ServerFnError> {
    use base64::Engine;

    tracing::info!(
        "Upload request: file='{}', {} encoded bytes",
        file_name,
        content_base64.len()
    );

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(content_base64.as_bytes())
        .map_err(|e| ServerFnError::new(format!("Invalid file payload: {}", e)))?;

    let client = backend()?;

    match client.upload_image(&file_name, bytes).await {
        Ok(url) => {
            tracing::info!("Upload successful: {}", url);
            Ok(UploadedImage { url })
        }
        Err(e) => {
            tracing::error!("Upload failed: {}", e);
            Err(ServerFnError::new(e.to_string()))
        }
    }
}

/// Submit the assembled draft to the product create endpoint.
#[server(AddProduct, "/api")]
pub async fn add_product(draft: ProductDraft) -> Result<CreateProductResult, ServerFnError> {
    use crate::web_app::api::client::ApiError;

    tracing::info!(
        "Create request: name='{}', category='{}'",
        draft.name,
        draft.category
    );

    let client = backend()?;

    match client.create_product(&draft).await {
        Ok(body) => {
            tracing::info!("Create successful: {}", body.message);
            Ok(CreateProductResult::Created {
                message: body.message,
                product: body.data,
            })
        }
        Err(ApiError::Unprocessable {
            message,
            field_errors,
        }) => {
            tracing::warn!(
                "Create rejected: {} ({} field errors)",
                message,
                field_errors.len()
            );
            Ok(CreateProductResult::Rejected {
                message,
                field_errors,
            })
        }
        Err(e) => {
            tracing::error!("Create failed: {}", e);
            Err(ServerFnError::new(e.to_string()))
        }
    }
}
