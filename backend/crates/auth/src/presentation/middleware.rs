//! Auth Gate Middleware
//!
//! Requires a valid bearer token on protected routes. On success the verified
//! [`kernel::subject::Subject`] is stored in the request extensions; on failure the request is
//! answered with 401 and the inner handler never runs.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState {
    pub tokens: Arc<TokenService>,
}

impl AuthGateState {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(Arc::new(TokenService::new(config)))
    }
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer(
    State(gate): State<AuthGateState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers())?;
    let claims = gate.tokens.verify(token)?;
    let subject = claims.subject();

    tracing::debug!(user_id = %subject.user_id, "Bearer token accepted");

    req.extensions_mut().insert(subject);
    Ok(next.run(req).await)
}
