use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiResponse;
use crate::rules::{CouponRejection, MatchStateError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Coupon rejected: {0}")]
    CouponRejected(CouponRejection),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<CouponRejection> for AppError {
    fn from(reason: CouponRejection) -> Self {
        AppError::CouponRejected(reason)
    }
}

impl From<MatchStateError> for AppError {
    fn from(err: MatchStateError) -> Self {
        AppError::InvalidState(err.to_string())
    }
}

impl AppError {
    /// Stable machine-readable code returned in the error body
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::CouponRejected(reason) => reason.code(),
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CouponRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidState(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                msg.clone()
            }
            AppError::NotFound(msg) => {
                log::warn!("Not found: {msg}");
                msg.clone()
            }
            AppError::CouponRejected(reason) => {
                log::warn!("Coupon rejected: {reason}");
                reason.user_message().to_string()
            }
            AppError::InvalidState(msg) => {
                log::warn!("Invalid state: {msg}");
                msg.clone()
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            _ => {
                log::error!("Internal error: {self}");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(ApiResponse::error(self.error_code(), message))
    }
}
