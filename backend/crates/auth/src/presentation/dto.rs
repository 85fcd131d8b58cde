//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::Authenticated;
use crate::domain::entity::user::User;
use crate::domain::value_object::UserId;

// ============================================================================
// Register
// ============================================================================

/// Register request. No `Debug`: carries the clear-text secret.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(alias = "password")]
    pub secret: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request. No `Debug`: carries the clear-text secret.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    #[serde(alias = "password")]
    pub secret: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id,
            name: user.name.as_str().to_string(),
            email: user.email.into_db(),
            created_at: user.created_at,
        }
    }
}

/// Register / login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

impl From<Authenticated> for AuthResponse {
    fn from(auth: Authenticated) -> Self {
        Self {
            token: auth.token.token,
            expires_at: auth.token.expires_at,
            user: auth.user.into(),
        }
    }
}
