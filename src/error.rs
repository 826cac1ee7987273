use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::catalog::CatalogError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Password gate rejected the session
    Unauthorized(String),
    /// User input is missing or out of range
    Validation(String),
    /// Catalog file could not be read or validated
    Catalog(CatalogError),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Validation(msg) => write!(f, "Invalid input: {}", msg),
            Self::Catalog(err) => write!(f, "Catalog error: {}", err),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Catalog(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            Self::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::Unauthorized(_) => "unauthorized",
        AppError::Validation(_) => "validation_error",
        AppError::Catalog(_) => "catalog_error",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

/// Malformed or mistyped JSON bodies get the same error envelope as other input errors
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        Self::InternalError(format!("CSV error: {}", err))
    }
}
