//! Server Error Types

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Errors that end a request with a 500
#[derive(Error, Debug)]
pub enum ServerError {
    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(#[from] tera::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Erro interno</h1>"),
        )
            .into_response()
    }
}
