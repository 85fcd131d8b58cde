//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{credential::UserCredential, user::User};
use crate::domain::value_object::{Email, UserId};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user and secret hash. Fails with `DuplicateEmail` when
    /// the canonical email is already taken, including under a race.
    async fn create(&self, credential: &UserCredential) -> AuthResult<()>;

    /// Check if an account with this email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Load user and secret hash by email (login)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserCredential>>;

    /// Load a user profile by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;
}
