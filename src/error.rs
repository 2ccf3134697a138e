use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{database::StoreError, protocol::ErrorResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation<S: ToString>(message: S) -> Self {
        ApiError::Validation(message.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DoctorNotFound(did) => {
                ApiError::NotFound(format!("Doctor with ID {} not found", did))
            }
            err @ StoreError::DepartmentMismatch { .. } => ApiError::Validation(err.to_string()),
            err => ApiError::Persistence(err.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Persistence(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Persistence(_) | ApiError::Internal(_) => {
                log::error!("{}", self);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse::err(message))
    }
}
