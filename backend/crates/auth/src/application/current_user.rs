//! Current User Use Case
//!
//! Resolves the authenticated subject to its profile.

use std::sync::Arc;

use kernel::subject::Subject;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct CurrentUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, subject: Subject) -> AuthResult<User> {
        self.repo
            .find_by_id(&subject.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
