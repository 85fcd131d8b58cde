//! Infrastructure Layer

pub mod postgres;

pub use postgres::{PgCatalogRepository, decrement_stock, lock_for_update};
