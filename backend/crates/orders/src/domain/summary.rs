//! Order History Read Model
//!
//! What `GET /orders/mine` returns: each order with its lines, the price
//! captured at order time, and the product's name and price as of now.

use catalog::ProductId;
use chrono::{DateTime, Utc};
use kernel::id::OrderId;
use rust_decimal::Decimal;

use crate::domain::status::OrderStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub line_no: u32,
    pub product_id: ProductId,
    /// Current catalog name
    pub product_name: String,
    pub quantity: u32,
    /// Price captured when the order was placed
    pub unit_price: Decimal,
    /// Catalog price at query time
    pub current_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<SummaryLine>,
}

impl OrderSummary {
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Total at captured prices
    pub fn total_amount(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum()
    }
}
