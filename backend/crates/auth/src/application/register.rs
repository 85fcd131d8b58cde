//! Register Use Case
//!
//! Creates a new account and signs the caller in.

use std::sync::Arc;

use crate::application::Authenticated;
use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::entity::{credential::UserCredential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{DisplayName, Email, RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub secret: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<Authenticated> {
        let name = DisplayName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.secret)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let pepper = self.config.password_pepper.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            UserPassword::from_raw(&raw_password, pepper.as_deref())
        })
        .await??;

        let user = User::new(name, email);
        // The unique index still guards against a concurrent registration.
        self.repo
            .create(&UserCredential::new(user.clone(), password_hash))
            .await?;

        let token = self.tokens.issue(user.user_id)?;

        tracing::info!(
            user_id = %user.user_id,
            email_domain = user.email.domain(),
            "User registered"
        );

        Ok(Authenticated { token, user })
    }
}
