//! Client Session
//!
//! Who is logged in, their bearer token, and their cart. Owned by a
//! `ShopClient` and persisted through a [`SessionStore`] after every change.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{ClientError, ClientResult};
use crate::models::User;

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    #[serde(default)]
    pub cart: Cart,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Forget the user and token; the cart survives.
    pub fn log_out(&mut self) {
        self.user = None;
        self.token = None;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("cart", &self.cart)
            .finish()
    }
}

/// Where a session survives between runs
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Stored session, or an empty one when nothing is stored
    async fn load(&self) -> ClientResult<Session>;

    async fn save(&self, session: &Session) -> ClientResult<()>;

    async fn clear(&self) -> ClientResult<()>;
}

/// Process-local store
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn snapshot(&self) -> Option<Session> {
        self.lock().ok().and_then(|s| s.clone())
    }

    fn lock(&self) -> ClientResult<MutexGuard<'_, Option<Session>>> {
        self.session.lock().map_err(|_| ClientError::StorePoisoned)
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> ClientResult<Session> {
        Ok(self.lock()?.clone().unwrap_or_default())
    }

    async fn save(&self, session: &Session) -> ClientResult<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> ClientResult<Session> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(session) => Ok(session),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "Discarding unreadable session");
                    Ok(Session::default())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
