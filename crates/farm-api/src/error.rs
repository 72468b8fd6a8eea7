use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use farm_core::error::DomainError;

pub const FARMER_NOT_FOUND: &str = "Farmer not found";
pub const CPF_ALREADY_REGISTERED: &str = "CPF already registered";
pub const DELETE_FAILED: &str = "Failed to delete farmer";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(msg) => ApiError::BadRequest(msg),
            DomainError::InvalidState(msg) => ApiError::BadRequest(msg),
            DomainError::CpfAlreadyExists(_) | DomainError::ConstraintViolation(_) => {
                ApiError::Conflict(CPF_ALREADY_REGISTERED.to_string())
            }
            DomainError::FarmerNotFound(_) => ApiError::NotFound(FARMER_NOT_FOUND.to_string()),
            DomainError::DeleteFailed(_) => ApiError::InternalError(DELETE_FAILED.to_string()),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            },
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            },
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "Conflict", msg)
            },
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError", "Internal server error".to_string())
            },
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            },
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "ServiceUnavailable", msg)
            },
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_domain_error_status_codes() {
        assert_eq!(status_of(DomainError::ValidationError("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::CpfAlreadyExists("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(DomainError::ConstraintViolation("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(DomainError::FarmerNotFound(Uuid::nil())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::InvalidState("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::DeleteFailed(Uuid::nil())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(DomainError::DatabaseError("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
