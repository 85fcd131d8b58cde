//! Order Aggregate

use catalog::ProductId;
use chrono::{DateTime, Utc};
use kernel::id::{OrderId, OrderLineId, UserId};
use rust_decimal::Decimal;

use crate::domain::services::PricedLine;
use crate::domain::status::OrderStatus;

/// Persisted line item. `unit_price` is the catalog price when the order was
/// placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub order_line_id: OrderLineId,
    /// 1-based position within the order, in submission order
    pub line_no: u32,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order header with its lines. Always has at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// New pending order from allocated lines, numbered in the given order.
    pub fn pending(user_id: UserId, lines: Vec<PricedLine>) -> Self {
        let lines = lines
            .into_iter()
            .zip(1u32..)
            .map(|(line, line_no)| OrderLine {
                order_line_id: OrderLineId::new(),
                line_no,
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Self {
            order_id: OrderId::new(),
            user_id,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            lines,
        }
    }

    /// Sum of quantities (not distinct products)
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn total_amount(&self) -> Decimal {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(id: i64, quantity: u32, cents: i64) -> PricedLine {
        PricedLine {
            product_id: ProductId::new(id),
            product_name: format!("P{id}"),
            quantity,
            unit_price: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn test_pending_order_numbers_lines() {
        let order = Order::pending(
            UserId::new(),
            vec![priced(1, 2, 1250), priced(2, 1, 800)],
        );

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].line_no, 1);
        assert_eq!(order.lines[1].line_no, 2);
        assert_ne!(order.lines[0].order_line_id, order.lines[1].order_line_id);
    }

    #[test]
    fn test_totals() {
        let order = Order::pending(
            UserId::new(),
            vec![priced(1, 2, 1250), priced(2, 1, 800)],
        );
        assert_eq!(order.total_units(), 3);
        assert_eq!(order.total_amount(), Decimal::new(3300, 2));
    }
}
