//! Application Layer

pub mod list_products;

pub use list_products::ListProductsUseCase;
