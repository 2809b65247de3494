//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use biblio_core::BiblioError;
use serde::Serialize;

/// Errors returned by API handlers
#[derive(Debug)]
pub enum ApiError {
    /// The path segment is not a recognizable ISBN
    InvalidIsbn(String),

    /// Neither upstream knows a title for this ISBN
    NoInfo(String),

    /// The cache store failed
    Lookup(BiblioError),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub retryable: bool,
}

impl From<BiblioError> for ApiError {
    fn from(e: BiblioError) -> Self {
        ApiError::Lookup(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidIsbn(raw) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: format!("Invalid ISBN: {}", raw),
                    isbn: None,
                    retryable: false,
                },
            ),
            ApiError::NoInfo(isbn) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "No information available for this ISBN".to_string(),
                    isbn: Some(isbn),
                    retryable: false,
                },
            ),
            ApiError::Lookup(e) => {
                tracing::error!("Book info lookup failed: {}", e);
                let retryable = e.is_retryable();
                let status = if retryable {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (
                    status,
                    ErrorResponse {
                        error: e.to_string(),
                        isbn: None,
                        retryable,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
