//! Order Request
//!
//! The validated form of a cart submission: a non-empty list of
//! `(product, positive quantity)` pairs. Nothing else from the client is kept.

use catalog::ProductId;

use crate::error::{OrderError, OrderResult};

/// Positive unit count.
///
/// Unbounded above: a quantity no stock level can cover is a stock shortage,
/// reported by allocation, not a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(raw: i64) -> Option<Self> {
        u64::try_from(raw).ok().filter(|&q| q > 0).map(Self)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One requested line, as submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRequest {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    lines: Vec<LineRequest>,
}

impl OrderRequest {
    /// Validate raw `(product_id, quantity)` pairs in submission order.
    ///
    /// Fails with `EmptyCart` for no lines and `InvalidQuantity` for the first
    /// line whose quantity is not positive.
    pub fn new(raw: impl IntoIterator<Item = (ProductId, i64)>) -> OrderResult<Self> {
        let raw: Vec<(ProductId, i64)> = raw.into_iter().collect();

        if raw.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let lines = raw
            .into_iter()
            .map(|(product_id, quantity)| {
                Quantity::new(quantity)
                    .map(|quantity| LineRequest {
                        product_id,
                        quantity,
                    })
                    .ok_or(OrderError::InvalidQuantity {
                        product_id,
                        quantity,
                    })
            })
            .collect::<OrderResult<Vec<_>>>()?;

        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[LineRequest] {
        &self.lines
    }

    /// Distinct product IDs, ascending
    pub fn product_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self.lines.iter().map(|l| l.product_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Sum of requested quantities, saturating
    pub fn total_units(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.quantity.get()))
    }
}
