//! Credential Entity
//!
//! A user together with the hash of their secret. Only the credential store
//! and the login use case ever see this; responses carry [`User`] alone.

use crate::domain::entity::user::User;
use crate::domain::value_object::UserPassword;

#[derive(Debug, Clone)]
pub struct UserCredential {
    pub user: User,
    pub password_hash: UserPassword,
}

impl UserCredential {
    pub fn new(user: User, password_hash: UserPassword) -> Self {
        Self {
            user,
            password_hash,
        }
    }
}
