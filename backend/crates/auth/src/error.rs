//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::PERSISTENCE_FAILURE, kind::ErrorKind};
use platform::bearer::BearerError;
use platform::token::TokenCodecError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already registered (case-insensitive)
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Unknown email or wrong secret; the two are never distinguished
    #[error("Invalid email or secret")]
    InvalidCredentials,

    /// No `Authorization` header
    #[error("Missing bearer credential")]
    MissingCredential,

    /// `Authorization` header does not use the Bearer scheme
    #[error("Authorization scheme must be Bearer")]
    InvalidScheme,

    #[error("Token has expired")]
    ExpiredToken,

    /// Bad structure, header or signature
    #[error("Token is malformed or has an invalid signature")]
    MalformedToken,

    #[error("Token is not yet valid")]
    NotYetValid,

    /// Token subject no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Input validation failure (name, email or secret policy)
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateEmail | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::MissingCredential
            | AuthError::InvalidScheme
            | AuthError::ExpiredToken
            | AuthError::MalformedToken
            | AuthError::NotYetValid => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side causes are replaced by a fixed message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) => AppError::new(self.kind(), PERSISTENCE_FAILURE),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            AuthError::DuplicateEmail => AppError::new(self.kind(), self.to_string())
                .with_action("Log in instead, or register with a different email"),
            AuthError::ExpiredToken => AppError::new(self.kind(), self.to_string())
                .with_action("Log in again"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::MalformedToken => {
                tracing::warn!("Rejected malformed or forged token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let unauthorized = self.kind() == ErrorKind::Unauthorized;
        let mut response = self.to_app_error().into_response();
        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err.message().to_string())
        }
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => AuthError::MissingCredential,
            BearerError::InvalidScheme => AuthError::InvalidScheme,
        }
    }
}

impl From<TokenCodecError> for AuthError {
    fn from(_: TokenCodecError) -> Self {
        AuthError::MalformedToken
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task failed: {err}"))
    }
}
