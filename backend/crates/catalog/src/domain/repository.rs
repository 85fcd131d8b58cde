//! Repository Traits

use crate::domain::product::Product;
use crate::error::CatalogResult;

/// Catalog reader
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// All products, ordered by ID
    async fn list_all(&self) -> CatalogResult<Vec<Product>>;
}
