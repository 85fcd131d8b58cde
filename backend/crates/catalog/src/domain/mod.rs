//! Domain Layer

pub mod product;
pub mod repository;

pub use product::{Product, ProductId};
pub use repository::ProductRepository;
