//! Error types for the JSON API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docshelf_site::RenderError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No document with the given identifier.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Render error from docshelf-site.
    #[error("Render error: {0}")]
    Render(RenderError),
}

impl From<RenderError> for ServerError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::NotFound(id) => Self::PageNotFound(id),
            other => Self::Render(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PageNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "id": id}),
            ),
            Self::Render(e) => {
                tracing::error!(error = %e, "Failed to render page");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
