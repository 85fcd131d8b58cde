//! Place Order Use Case
//!
//! Validates the submitted lines, then hands the request to the repository,
//! which re-reads the catalog under lock and persists atomically.

use std::sync::Arc;

use catalog::ProductId;
use kernel::subject::Subject;

use crate::domain::order::Order;
use crate::domain::repository::OrderRepository;
use crate::domain::request::OrderRequest;
use crate::error::OrderResult;

/// Raw lines as submitted, in submission order
#[derive(Debug, Clone, Default)]
pub struct PlaceOrderInput {
    pub lines: Vec<(ProductId, i64)>,
}

pub struct PlaceOrderUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> PlaceOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Orders are always placed for the authenticated subject.
    pub async fn execute(&self, subject: Subject, input: PlaceOrderInput) -> OrderResult<Order> {
        let request = OrderRequest::new(input.lines)?;

        let order = self.repo.place(subject.user_id, &request).await?;

        tracing::info!(
            order_id = %order.order_id,
            user_id = %order.user_id,
            lines = order.lines.len(),
            total_units = order.total_units(),
            total_amount = %order.total_amount(),
            "Order placed"
        );

        Ok(order)
    }
}
