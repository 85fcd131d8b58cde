//! API DTOs
//!
//! Requests carry only `productId` and `quantity`. Unknown fields such as a
//! client-side price are ignored, never read.

use catalog::ProductId;
use chrono::{DateTime, Utc};
use kernel::id::OrderId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderLine};
use crate::domain::status::OrderStatus;
use crate::domain::summary::{OrderSummary, SummaryLine};

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequestDto {
    pub product_id: ProductId,
    /// Signed so that zero and negatives reach validation as `InvalidQuantity`
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub lines: Vec<LineRequestDto>,
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub line_no: u32,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            line_total: line.line_total(),
            line_no: line.line_no,
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Result of `POST /orders`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResultResponse {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineResponse>,
    pub total_units: u64,
    pub total_amount: Decimal,
}

impl From<Order> for OrderResultResponse {
    fn from(order: Order) -> Self {
        Self {
            total_units: order.total_units(),
            total_amount: order.total_amount(),
            order_id: order.order_id,
            status: order.status,
            created_at: order.created_at,
            lines: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryLineResponse {
    pub line_no: u32,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub current_price: Decimal,
    pub line_total: Decimal,
}

impl From<SummaryLine> for SummaryLineResponse {
    fn from(line: SummaryLine) -> Self {
        Self {
            line_total: line.unit_price * Decimal::from(line.quantity),
            line_no: line.line_no,
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            current_price: line.current_price,
        }
    }
}

/// One entry of `GET /orders/mine`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryResponse {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<SummaryLineResponse>,
    pub total_units: u64,
    pub total_amount: Decimal,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        Self {
            total_units: summary.total_units(),
            total_amount: summary.total_amount(),
            order_id: summary.order_id,
            status: summary.status,
            created_at: summary.created_at,
            lines: summary.lines.into_iter().map(Into::into).collect(),
        }
    }
}
