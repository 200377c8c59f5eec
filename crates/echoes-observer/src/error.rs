//! Error types for the observer API.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use echoes_core::ReportError;

/// Errors that can occur in the observer layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The visitor's date was missing, malformed or in the future.
    #[error(transparent)]
    InvalidDate(#[from] ReportError),

    /// A page template failed to render.
    #[error("template error: {0}")]
    Template(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ObserverError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Self::Template(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<minijinja::Error> for ObserverError {
    fn from(e: minijinja::Error) -> Self {
        Self::Template(e.to_string())
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
