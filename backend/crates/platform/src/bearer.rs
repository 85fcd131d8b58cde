//! Bearer Credential Extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use axum::http::{HeaderMap, header};
use thiserror::Error;

const SCHEME: &str = "bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Authorization header is missing")]
    Missing,

    #[error("Authorization header must use the Bearer scheme")]
    InvalidScheme,
}

/// Extract the bearer token. The scheme name is matched case-insensitively
/// and must be followed by a single space and a non-empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?;

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::InvalidScheme)?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return Err(BearerError::InvalidScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::InvalidScheme);
    }

    Ok(token)
}
