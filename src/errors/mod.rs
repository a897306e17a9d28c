use std::io::Error as IoError;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

pub mod alias;
pub mod config;
pub mod repository;
pub mod service;

pub use alias::AliasError;
pub use config::ConfigError;
pub use repository::RepositoryError;
pub use service::ServiceError;

/// Message shown for any failure whose details must stay server-side.
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    // Request-level errors
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found error: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
    // Infrastructure/system errors
    #[error("Server error: {0}")]
    Server(#[from] IoError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Logger error: {0}")]
    Logger(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => {
                log::debug!("Rejected submission: {}", msg);
                AppError::Validation("Invalid URL".to_string())
            }
            ServiceError::AliasNotFound(_) => AppError::NotFound("Short URL not found".to_string()),
            ServiceError::Encoding(e) => {
                error!("Alias allocation failed: {}", e);
                AppError::Internal(INTERNAL_MESSAGE.to_string())
            }
            ServiceError::Store(e) => {
                error!("Store failure: {}", e);
                AppError::Internal(INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_)
            | AppError::Server(_)
            | AppError::Config(_)
            | AppError::Logger(_)
            | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_type, message) = match self {
            AppError::Validation(msg) => ("VALIDATION ERROR", msg.as_str()),
            AppError::NotFound(msg) => ("NOT FOUND ERROR", msg.as_str()),
            AppError::Internal(msg) => ("INTERNAL ERROR", msg.as_str()),
            _ => ("INTERNAL ERROR", INTERNAL_MESSAGE),
        };

        let message = if message.is_empty() {
            "An error occurred"
        } else {
            message
        };

        let code = self.status_code().as_u16();
        HttpResponse::build(self.status_code()).json(json!({
            "type": error_type,
            "message": message,
            "status_code": code,
        }))
    }
}
