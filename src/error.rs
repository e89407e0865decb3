use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("malformed request: {0}")]
    Parse(String),

    #[error("mobile client '{0}' not found")]
    NotFound(String),

    #[error("mobile client '{0}' already exists")]
    AlreadyExists(String),

    #[error("mobile client '{0}' was modified concurrently")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            ApiError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::Parse(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists(_) | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "Validation failed",
            ApiError::Parse(_) => "Bad request",
            ApiError::NotFound(_) => "Not found",
            ApiError::AlreadyExists(_) => "Already exists",
            ApiError::Conflict(_) => "Conflict",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the alphabetically first failing field so the answer does
        // not depend on hash map order.
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.keys().copied().collect();
        fields.sort_unstable();

        let Some(field) = fields.first() else {
            return ApiError::validation("", errors.to_string());
        };

        let message = field_errors[field]
            .first()
            .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| format!("{} is invalid", field));

        ApiError::validation(*field, message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Parse(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {:#}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        let mut body = ErrorResponse::new(self.kind(), self.to_string());
        if let Some(field) = self.field() {
            body = body.with_field(field);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::validation("name", "required").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Parse("eof".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("a".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::AlreadyExists("a".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::Conflict("a".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
