//! API DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::product::{Product, ProductId};

/// Product as listed to clients. Price is a decimal string (`"12.50"`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
        }
    }
}
