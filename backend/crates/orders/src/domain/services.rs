//! Domain Services
//!
//! Stock allocation: checks an [`OrderRequest`] against a catalog snapshot and
//! prices every line from the catalog. Pure; the caller provides a snapshot
//! that stays valid until it writes (row locks in the store).

use std::collections::BTreeMap;

use catalog::{Product, ProductId};
use rust_decimal::Decimal;

use crate::domain::request::OrderRequest;
use crate::error::{OrderError, OrderResult};

/// A requested line resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Stock to take per product (duplicate lines summed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDecrement {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// One per requested line, in submission order
    pub lines: Vec<PricedLine>,
    /// One per distinct product, ascending ID
    pub decrements: Vec<StockDecrement>,
}

/// Resolve and stock-check every line.
///
/// All products are resolved before any stock is compared, so a request that
/// names an unknown product fails with `ProductNotFound` even if another line
/// is also short. Stock is compared per product against the summed quantity
/// of all lines naming it.
pub fn allocate(request: &OrderRequest, snapshot: &[Product]) -> OrderResult<Allocation> {
    let catalog: BTreeMap<ProductId, &Product> = snapshot.iter().map(|p| (p.id, p)).collect();

    let mut resolved = Vec::with_capacity(request.lines().len());
    // product -> (summed request, available)
    let mut requested: BTreeMap<ProductId, (u64, u32)> = BTreeMap::new();

    for line in request.lines() {
        let product = catalog
            .get(&line.product_id)
            .ok_or(OrderError::ProductNotFound {
                product_id: line.product_id,
            })?;

        let entry = requested.entry(product.id).or_insert((0, product.stock));
        entry.0 = entry.0.saturating_add(line.quantity.get());
        resolved.push((*product, line.quantity.get()));
    }

    let mut decrements = Vec::with_capacity(requested.len());
    for (product_id, (quantity, available)) in requested {
        decrements.push(StockDecrement {
            product_id,
            quantity: within_stock(product_id, quantity, available)?,
        });
    }

    // Every line is now bounded by its product's stock.
    let lines = resolved
        .into_iter()
        .map(|(product, quantity)| {
            Ok(PricedLine {
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: within_stock(product.id, quantity, product.stock)?,
                unit_price: product.price,
            })
        })
        .collect::<OrderResult<Vec<_>>>()?;

    Ok(Allocation { lines, decrements })
}

fn within_stock(product_id: ProductId, requested: u64, available: u32) -> OrderResult<u32> {
    u32::try_from(requested)
        .ok()
        .filter(|&q| q <= available)
        .ok_or(OrderError::InsufficientStock {
            product_id,
            requested,
            available,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, stock: u32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(cents, 2),
            stock,
        }
    }

    fn snapshot() -> Vec<Product> {
        vec![product(1, 5, 1250), product(2, 1, 800)]
    }

    fn request(lines: &[(i64, i64)]) -> OrderRequest {
        OrderRequest::new(lines.iter().map(|&(id, q)| (ProductId::new(id), q))).unwrap()
    }

    #[test]
    fn test_allocate_prices_from_catalog() {
        let allocation = allocate(&request(&[(1, 2), (2, 1)]), &snapshot()).unwrap();

        assert_eq!(allocation.lines.len(), 2);
        assert_eq!(allocation.lines[0].unit_price, Decimal::new(1250, 2));
        assert_eq!(allocation.lines[1].product_name, "Product 2");
        assert_eq!(
            allocation.decrements,
            vec![
                StockDecrement {
                    product_id: ProductId::new(1),
                    quantity: 2
                },
                StockDecrement {
                    product_id: ProductId::new(2),
                    quantity: 1
                },
            ]
        );
    }

    #[test]
    fn test_exact_stock_is_enough() {
        assert!(allocate(&request(&[(1, 5)]), &snapshot()).is_ok());
    }

    #[test]
    fn test_insufficient_stock_names_available() {
        let err = allocate(&request(&[(1, 1), (2, 2)]), &snapshot()).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InsufficientStock { product_id, requested: 2, available: 1 }
                if product_id == ProductId::new(2)
        ));
    }

    #[test]
    fn test_duplicate_lines_are_summed() {
        let err = allocate(&request(&[(1, 3), (1, 3)]), &snapshot()).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InsufficientStock { requested: 6, available: 5, .. }
        ));

        let allocation = allocate(&request(&[(1, 2), (1, 3)]), &snapshot()).unwrap();
        assert_eq!(allocation.lines.len(), 2);
        assert_eq!(allocation.decrements.len(), 1);
        assert_eq!(allocation.decrements[0].quantity, 5);
    }

    #[test]
    fn test_quantity_beyond_any_stock_is_a_shortage() {
        let err = allocate(&request(&[(1, 3_000_000_000)]), &snapshot()).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InsufficientStock { product_id, requested: 3_000_000_000, available: 5 }
                if product_id == ProductId::new(1)
        ));
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);

        let err = allocate(&request(&[(1, i64::MAX), (1, i64::MAX), (1, i64::MAX)]), &snapshot())
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InsufficientStock { requested: u64::MAX, available: 5, .. }
        ));
    }

    #[test]
    fn test_unknown_product_wins_over_stock() {
        let err = allocate(&request(&[(2, 9), (42, 1)]), &snapshot()).unwrap_err();
        assert!(matches!(
            err,
            OrderError::ProductNotFound { product_id } if product_id == ProductId::new(42)
        ));
    }
}
