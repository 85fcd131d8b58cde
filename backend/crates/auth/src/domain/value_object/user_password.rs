//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Maps policy and hashing
//! failures onto user-facing `AppError`s.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("s3cret1".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Secret as typed by the user. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new secret at registration.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Secret must be at least {} characters (got {})",
                min, actual
            ))
            .with_action("Please choose a longer secret"),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Secret must be at most {} characters (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter secret"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Secret cannot be empty").with_action("Please enter a secret")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Secret contains invalid characters")
                    .with_action("Please remove any control characters")
            }

            PasswordPolicyError::CommonPattern => {
                AppError::bad_request("Secret is too common or follows a predictable pattern")
                    .with_action("Please choose a more unique secret")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt. No policy is applied: a wrong secret must fail
    /// the same way whether or not it would pass registration rules.
    pub fn unchecked(raw: String) -> Self {
        Self(ClearTextPassword::unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash in PHC string format. Safe to store.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated secret (CPU bound).
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AppError::internal("Secret hashing failed").with_source(e))?;

        Ok(Self(hashed))
    }

    /// Load a PHC string from the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid secret hash in database",
            )
        })?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification (CPU bound).
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Spend one Argon2 computation without a stored hash, so that a login for
    /// an unknown email costs about as much as one with a wrong secret.
    pub fn dummy_verify(raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        let _ = raw.inner().hash(pepper);
        false
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
