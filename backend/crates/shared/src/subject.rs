//! Authenticated subject
//!
//! The auth gate verifies the bearer token and stores a [`Subject`] in the
//! request extensions. Handlers behind the gate take `Subject` as an
//! extractor; a request that never passed the gate is rejected with 401.

use crate::id::UserId;

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    /// Owner of the token
    pub user_id: UserId,
}

impl Subject {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for Subject
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Subject>().copied().ok_or_else(|| {
            crate::error::app_error::AppError::unauthorized("Authentication required")
        })
    }
}
