//! API error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Request-level errors, tagged by resulting HTTP status.
///
/// `BadRequest` and `LimitExceeded` are part of the public taxonomy but no
/// current handler constructs them; every failure in the data-serving
/// endpoints surfaces as `Internal`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request limit exceeded (410).
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Any unhandled failure (500). The detail is logged, never served.
    #[error("internal server error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::LimitExceeded(_) => StatusCode::GONE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message served to the client.
    ///
    /// `Internal` always masks its detail behind a fixed message.
    pub fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::LimitExceeded(msg) => msg,
            Self::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed");
        }
        (
            self.status_code(),
            Json(ErrorBody {
                message: self.public_message().to_string(),
            }),
        )
            .into_response()
    }
}
