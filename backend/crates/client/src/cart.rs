//! Cart
//!
//! One line per product. Adding is capped by the stock the product had when
//! it was added; the server re-checks stock when the order is placed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::models::{LineRequest, Product};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    /// Display only; the server prices the order
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Stock when last added
    pub available: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` units, merging with an existing line for the product.
    pub fn add(&mut self, product: &Product, quantity: u32) -> ClientResult<()> {
        if quantity == 0 {
            return Err(ClientError::InvalidQuantity);
        }

        let in_cart = self.quantity_of(product.id);
        let requested = u64::from(in_cart) + u64::from(quantity);
        if requested > u64::from(product.stock) {
            return Err(ClientError::StockLimit {
                product_id: product.id,
                requested,
                available: product.stock,
            });
        }

        // Bounded by `product.stock`.
        let requested = requested as u32;
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => {
                line.quantity = requested;
                line.name = product.name.clone();
                line.unit_price = product.price;
                line.available = product.stock;
            }
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity: requested,
                available: product.stock,
            }),
        }

        Ok(())
    }

    /// Set a line's quantity; zero removes it.
    pub fn set_quantity(&mut self, product_id: i64, quantity: u32) -> ClientResult<()> {
        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return Err(ClientError::NotInCart { product_id });
        };

        if quantity == 0 {
            self.remove(product_id);
            return Ok(());
        }
        if quantity > line.available {
            return Err(ClientError::StockLimit {
                product_id,
                requested: u64::from(quantity),
                available: line.available,
            });
        }
        line.quantity = quantity;

        Ok(())
    }

    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Estimate at the prices seen when adding
    pub fn total_amount(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// What gets submitted: product and quantity only
    pub fn to_order_lines(&self) -> Vec<LineRequest> {
        self.lines
            .iter()
            .map(|l| LineRequest {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect()
    }
}
