//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::PERSISTENCE_FAILURE, kind::ErrorKind};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row violates a domain invariant (e.g. negative stock)
    #[error("Invalid catalog row: {0}")]
    InvalidRow(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InternalServerError
    }

    /// Causes stay in the log; clients only see the fixed message.
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), PERSISTENCE_FAILURE)
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => tracing::error!(error = %e, "Catalog database error"),
            CatalogError::InvalidRow(msg) => tracing::error!(message = %msg, "Catalog data error"),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
