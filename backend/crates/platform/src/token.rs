//! Compact Signed Tokens
//!
//! `base64url(header) . base64url(claims) . base64url(HMAC-SHA256)`, the
//! JWS compact layout with the `HS256` algorithm. Claims are any serde type;
//! time-based validation is left to the caller.
//!
//! Only `HS256` is accepted on input. Tokens announcing any other algorithm
//! (including `none`) are rejected before the signature is looked at.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

/// Token encoding/decoding failures
#[derive(Debug, Error)]
pub enum TokenCodecError {
    #[error("Token must have three dot-separated segments")]
    Structure,

    #[error("Token segment is not valid base64url")]
    Encoding,

    #[error("Unsupported token header")]
    Header,

    #[error("Token signature mismatch")]
    Signature,

    #[error("Invalid token claims: {0}")]
    Claims(#[source] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct Header<'a> {
    alg: &'a str,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<&'a str>,
}

/// HMAC-SHA256 token signer/verifier bound to one secret key.
#[derive(Clone)]
pub struct TokenSigner {
    key: Zeroizing<Vec<u8>>,
}

impl TokenSigner {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: Zeroizing::new(key.into()),
        }
    }

    /// Serialize and sign `claims`.
    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenCodecError> {
        let header = serde_json::to_vec(&Header {
            alg: ALGORITHM,
            typ: Some(TOKEN_TYPE),
        })
        .map_err(TokenCodecError::Claims)?;
        let payload = serde_json::to_vec(claims).map_err(TokenCodecError::Claims)?;

        let signing_input = format!("{}.{}", to_base64url(&header), to_base64url(&payload));
        let signature = hmac_sha256(&self.key, signing_input.as_bytes());

        Ok(format!("{}.{}", signing_input, to_base64url(&signature)))
    }

    /// Check structure, header and signature, then decode the claims.
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenCodecError> {
        let mut segments = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenCodecError::Structure);
        };

        let header_bytes = from_base64url(header_b64).map_err(|_| TokenCodecError::Encoding)?;
        let header: Header<'_> =
            serde_json::from_slice(&header_bytes).map_err(|_| TokenCodecError::Header)?;
        if header.alg != ALGORITHM {
            return Err(TokenCodecError::Header);
        }

        let signature = from_base64url(signature_b64).map_err(|_| TokenCodecError::Encoding)?;
        let signing_input_len = header_b64.len() + 1 + payload_b64.len();
        let signing_input = &token.as_bytes()[..signing_input_len];
        if !verify_hmac_sha256(&self.key, signing_input, &signature) {
            return Err(TokenCodecError::Signature);
        }

        let payload = from_base64url(payload_b64).map_err(|_| TokenCodecError::Encoding)?;
        serde_json::from_slice(&payload).map_err(TokenCodecError::Claims)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").field("key", &"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    fn claims() -> Claims {
        Claims {
            sub: "user-1".to_string(),
            exp: 1_700_000_000,
        }
    }

    #[test]
    fn test_sign_then_verify() {
        let signer = TokenSigner::new(vec![7u8; 32]);
        let token = signer.sign(&claims()).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert!(token.starts_with("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9."));

        let decoded: Claims = signer.verify(&token).unwrap();
        assert_eq!(decoded, claims());
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let token = TokenSigner::new(vec![7u8; 32]).sign(&claims()).unwrap();
        let result = TokenSigner::new(vec![8u8; 32]).verify::<Claims>(&token);
        assert!(matches!(result, Err(TokenCodecError::Signature)));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let signer = TokenSigner::new(vec![7u8; 32]);
        let token = signer.sign(&claims()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_payload = to_base64url(br#"{"sub":"admin","exp":1700000000}"#);
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(
            signer.verify::<Claims>(&forged),
            Err(TokenCodecError::Signature)
        ));
    }

    #[test]
    fn test_alg_none_is_rejected() {
        let signer = TokenSigner::new(vec![7u8; 32]);
        let header = to_base64url(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = to_base64url(br#"{"sub":"user-1","exp":1700000000}"#);
        let token = format!("{header}.{payload}.");

        assert!(matches!(
            signer.verify::<Claims>(&token),
            Err(TokenCodecError::Header)
        ));
    }

    #[test]
    fn test_structure_errors() {
        let signer = TokenSigner::new(vec![7u8; 32]);
        for bad in ["", "abc", "a.b", "a.b.c.d"] {
            assert!(
                matches!(signer.verify::<Claims>(bad), Err(TokenCodecError::Structure)),
                "{bad:?}"
            );
        }
        assert!(matches!(
            signer.verify::<Claims>("!!.??.**"),
            Err(TokenCodecError::Encoding)
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let signer = TokenSigner::new(b"super-secret".to_vec());
        assert!(!format!("{signer:?}").contains("super"));
    }
}
