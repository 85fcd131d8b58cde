//! Login Use Case
//!
//! Verifies email + secret and issues a bearer token.

use std::sync::Arc;

use crate::application::Authenticated;
use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub secret: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    /// Every failure is `InvalidCredentials`, and an unknown email still pays
    /// for one Argon2 run.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<Authenticated> {
        let credential = match Email::new(&input.email) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let raw_password = RawPassword::unchecked(input.secret);
        let pepper = self.config.password_pepper.clone();
        let stored_hash = credential.as_ref().map(|c| c.password_hash.clone());

        let verified = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hash.verify(&raw_password, pepper.as_deref()),
            None => UserPassword::dummy_verify(&raw_password, pepper.as_deref()),
        })
        .await?;

        let user = match credential {
            Some(credential) if verified => credential.user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let token = self.tokens.issue(user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(Authenticated { token, user })
    }
}
