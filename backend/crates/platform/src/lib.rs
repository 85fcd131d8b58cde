//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the shop services:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, Base64)
//! - Password hashing (Argon2id)
//! - Compact signed tokens (JWT HS256 layout)
//! - Bearer credential extraction from request headers

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
