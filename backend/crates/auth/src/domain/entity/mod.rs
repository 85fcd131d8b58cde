//! Entity Module

pub mod credential;
pub mod user;

pub use credential::UserCredential;
pub use user::User;
