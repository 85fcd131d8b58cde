//! Repository Traits

use kernel::id::UserId;

use crate::domain::order::Order;
use crate::domain::request::OrderRequest;
use crate::domain::summary::OrderSummary;
use crate::error::OrderResult;

/// Order store
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Atomically allocate stock for `request` against the current catalog,
    /// persist a pending order with all its lines, and decrement stock.
    /// On any error nothing is written.
    async fn place(&self, user_id: UserId, request: &OrderRequest) -> OrderResult<Order>;

    /// Orders owned by `user_id`, newest first. Empty when there are none.
    async fn list_for_user(&self, user_id: &UserId) -> OrderResult<Vec<OrderSummary>>;
}
