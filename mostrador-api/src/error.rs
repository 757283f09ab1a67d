use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mostrador_catalog::{CommitError, SaleDiscountError};
use mostrador_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthorizationError(String),
    ValidationError(String),
    UnprocessableError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UnprocessableError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CommitError> for AppError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::AuthorizationRequired { .. } => {
                AppError::AuthorizationError(err.to_string())
            },
            CommitError::ReasonRequired => AppError::UnprocessableError(err.to_string()),
            CommitError::NothingToCommit | CommitError::AlreadyCommitted => {
                AppError::InternalServerError(err.to_string())
            },
        }
    }
}

impl From<SaleDiscountError> for AppError {
    fn from(err: SaleDiscountError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
