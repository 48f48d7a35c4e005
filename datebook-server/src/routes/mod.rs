pub mod events;
pub mod health;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use datebook_core::DatebookError;

/// Standard API error response
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
}

/// Failures a handler can return.
///
/// Validation failures are the client's fault and carry their own message.
/// Storage failures are logged and reported with a fixed per-operation message.
pub enum AppError {
    Validation(String),
    Storage {
        msg: &'static str,
        source: DatebookError,
    },
}

impl AppError {
    /// Wrap a store error for an operation described by `msg`.
    pub fn storage(msg: &'static str, source: DatebookError) -> Self {
        match source {
            DatebookError::Validation(m) => AppError::Validation(m),
            source => AppError::Storage { msg, source },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Storage { msg, source } => {
                error!(error = %source, "{msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string())
            }
        };

        (status, Json(ErrorResponse { msg })).into_response()
    }
}

impl From<DatebookError> for AppError {
    fn from(err: DatebookError) -> Self {
        AppError::storage("Internal server error", err)
    }
}

/// Malformed or non-JSON bodies are client errors like any other invalid input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
