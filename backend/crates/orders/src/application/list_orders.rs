//! List Orders Use Case

use std::sync::Arc;

use kernel::subject::Subject;

use crate::domain::repository::OrderRepository;
use crate::domain::summary::OrderSummary;
use crate::error::OrderResult;

pub struct ListOrdersUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> ListOrdersUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The subject's own orders, newest first.
    pub async fn execute(&self, subject: Subject) -> OrderResult<Vec<OrderSummary>> {
        let orders = self.repo.list_for_user(&subject.user_id).await?;
        tracing::debug!(user_id = %subject.user_id, count = orders.len(), "Listed orders");
        Ok(orders)
    }
}
