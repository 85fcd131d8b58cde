//! User Entity
//!
//! Public profile of an account. Immutable once created.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{DisplayName, Email, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: DisplayName,
    /// Canonical (lower-cased) email, unique
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: DisplayName, email: Email) -> Self {
        Self {
            user_id: UserId::new(),
            name,
            email,
            created_at: Utc::now(),
        }
    }
}
