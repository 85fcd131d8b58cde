//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every shop crate:
//! - Common error types and result aliases
//! - Typed identifiers for users and orders
//! - The authenticated [`subject::Subject`] that the auth gate hands to
//!   downstream handlers
//! - A JSON body extractor whose rejections are `AppError`s
//!
//! Only things whose meaning is identical in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod subject;
