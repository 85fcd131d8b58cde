//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Token service and use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, auth gate middleware
//!
//! ## Features
//! - Registration with display name, email and secret
//! - Login by email returning a signed bearer token
//! - Bearer-token gate that resolves the caller to a [`kernel::subject::Subject`]
//!
//! ## Security Model
//! - Secrets hashed with Argon2id, never stored or logged in clear text
//! - Emails compared case-insensitively (stored lower-cased)
//! - Unknown email and wrong secret are indistinguishable to the caller
//! - Tokens are HMAC-SHA256 signed and time limited (`iat`/`nbf`/`exp`)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token_service::{Claims, IssuedToken, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AuthGateState, require_bearer};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
