//! Token Service
//!
//! Issues and verifies signed, time-limited bearer tokens. Pure: the result
//! depends only on the token, the signing key and the current time.

use chrono::{DateTime, TimeZone, Utc};
use kernel::subject::Subject;
use platform::token::TokenSigner;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Registered claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: UserId,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Not before, unix seconds
    pub nbf: i64,
    /// Expiration, unix seconds
    pub exp: i64,
    /// Token ID
    pub jti: Uuid,
}

impl Claims {
    pub fn subject(&self) -> Subject {
        Subject::new(self.sub)
    }
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub claims: Claims,
}

#[derive(Debug, Clone)]
pub struct TokenService {
    signer: TokenSigner,
    ttl_secs: i64,
    leeway_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            signer: TokenSigner::new(config.token_secret.clone()),
            ttl_secs: i64::try_from(config.token_ttl.as_secs()).unwrap_or(i64::MAX),
            leeway_secs: i64::try_from(config.token_leeway.as_secs()).unwrap_or(0),
        }
    }

    /// Issue a token for `subject`, valid from now until now + TTL.
    pub fn issue(&self, subject: UserId) -> AuthResult<IssuedToken> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(&self, subject: UserId, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let iat = now.timestamp();
        let exp = iat.saturating_add(self.ttl_secs);
        let claims = Claims {
            sub: subject,
            iat,
            nbf: iat,
            exp,
            jti: Uuid::new_v4(),
        };

        let token = self
            .signer
            .sign(&claims)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let expires_at = Utc
            .timestamp_opt(exp, 0)
            .single()
            .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at,
            claims,
        })
    }

    /// Verify signature and time window, returning the embedded claims.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let claims: Claims = self.signer.verify(token)?;
        let now = now.timestamp();

        if now >= claims.exp.saturating_add(self.leeway_secs) {
            return Err(AuthError::ExpiredToken);
        }
        if claims.nbf > now.saturating_add(self.leeway_secs) {
            return Err(AuthError::NotYetValid);
        }

        Ok(claims)
    }
}
