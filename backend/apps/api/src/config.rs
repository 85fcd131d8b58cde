//! Server Configuration
//!
//! Read once at startup from the environment (after `.env`).

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::MIN_TOKEN_SECRET_BYTES;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 3600;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_random_secret` lets development builds start without
    /// `AUTH_TOKEN_SECRET`; tokens then do not survive a restart.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        allow_random_secret: bool,
    ) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {v}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse()
            .with_context(|| format!("LISTEN_ADDR is not a socket address: {listen_addr}"))?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let auth = match lookup("AUTH_TOKEN_SECRET") {
            Some(encoded) => AuthConfig::new(decode_secret(&encoded)?),
            None if allow_random_secret => {
                tracing::warn!("AUTH_TOKEN_SECRET not set; using a random signing key");
                AuthConfig::with_random_secret()
            }
            None => bail!("AUTH_TOKEN_SECRET must be set in production"),
        };

        let ttl_secs = match lookup("AUTH_TOKEN_TTL_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("AUTH_TOKEN_TTL_SECS is not a number: {v}"))?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };
        if ttl_secs == 0 {
            bail!("AUTH_TOKEN_TTL_SECS must be positive");
        }

        let pepper = lookup("AUTH_PASSWORD_PEPPER")
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            frontend_origins,
            auth: auth
                .with_ttl(Duration::from_secs(ttl_secs))
                .with_pepper(pepper),
        })
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<Vec<u8>> {
    let secret = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("AUTH_TOKEN_SECRET is not valid base64")?;
    if secret.len() < MIN_TOKEN_SECRET_BYTES {
        bail!(
            "AUTH_TOKEN_SECRET must decode to at least {MIN_TOKEN_SECRET_BYTES} bytes (got {})",
            secret.len()
        );
    }
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn secret_b64(len: usize) -> String {
        general_purpose::STANDARD.encode(vec![7u8; len])
    }

    #[test]
    fn test_defaults() {
        let config =
            ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/shop")]), true)
                .unwrap();

        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.listen_addr.port(), 31113);
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(86400));
        assert!(config.auth.password_pepper.is_none());
    }

    #[test]
    fn test_explicit_values() {
        let secret = secret_b64(32);
        let config = ApiConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://db/shop"),
                ("DATABASE_MAX_CONNECTIONS", "12"),
                ("LISTEN_ADDR", "127.0.0.1:8080"),
                ("FRONTEND_ORIGINS", "https://shop.example, "),
                ("AUTH_TOKEN_SECRET", &secret),
                ("AUTH_TOKEN_TTL_SECS", "600"),
                ("AUTH_PASSWORD_PEPPER", "pepper"),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(config.database_max_connections, 12);
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.frontend_origins, vec!["https://shop.example"]);
        assert_eq!(config.auth.token_secret, vec![7u8; 32]);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(600));
        assert_eq!(config.auth.password_pepper.as_deref(), Some(&b"pepper"[..]));
    }

    #[test]
    fn test_rejections() {
        assert!(ApiConfig::from_lookup(lookup(&[]), true).is_err());

        let db = ("DATABASE_URL", "postgres://db/shop");
        assert!(ApiConfig::from_lookup(lookup(&[db]), false).is_err());

        let short = secret_b64(16);
        assert!(ApiConfig::from_lookup(lookup(&[db, ("AUTH_TOKEN_SECRET", &short)]), true).is_err());
        assert!(
            ApiConfig::from_lookup(lookup(&[db, ("AUTH_TOKEN_SECRET", "%%%")]), true).is_err()
        );
        assert!(
            ApiConfig::from_lookup(lookup(&[db, ("AUTH_TOKEN_TTL_SECS", "0")]), true).is_err()
        );
        assert!(ApiConfig::from_lookup(lookup(&[db, ("LISTEN_ADDR", "nowhere")]), true).is_err());
    }
}
