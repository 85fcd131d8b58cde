//! Catalog Backend Module
//!
//! Read-only access to product records (id, name, unit price, stock).
//! Inventory is maintained elsewhere; this crate only reads snapshots, plus
//! the row-locking read and stock decrement used inside an order transaction.
//!
//! - `domain/` - `Product`, `ProductId`, repository trait
//! - `application/` - List use case
//! - `infra/` - PostgreSQL implementation and transactional helpers
//! - `presentation/` - `GET /products`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use domain::{Product, ProductId, ProductRepository};
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};
