//! HTTP Handlers
//!
//! Both routes expect the bearer gate in front of them; the `Subject`
//! extractor answers 401 when it is missing.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use kernel::extract::JsonBody;
use kernel::subject::Subject;
use std::sync::Arc;

use crate::application::{ListOrdersUseCase, PlaceOrderInput, PlaceOrderUseCase};
use crate::domain::repository::OrderRepository;
use crate::error::OrderResult;
use crate::presentation::dto::{OrderResultResponse, OrderSummaryResponse, PlaceOrderRequest};

#[derive(Clone)]
pub struct OrdersAppState<R>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// POST /orders
pub async fn place_order<R>(
    State(state): State<OrdersAppState<R>>,
    subject: Subject,
    JsonBody(req): JsonBody<PlaceOrderRequest>,
) -> OrderResult<(StatusCode, Json<OrderResultResponse>)>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let input = PlaceOrderInput {
        lines: req
            .lines
            .into_iter()
            .map(|l| (l.product_id, l.quantity))
            .collect(),
    };

    let order = PlaceOrderUseCase::new(state.repo.clone())
        .execute(subject, input)
        .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /orders/mine
pub async fn list_my_orders<R>(
    State(state): State<OrdersAppState<R>>,
    subject: Subject,
) -> OrderResult<Json<Vec<OrderSummaryResponse>>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let orders = ListOrdersUseCase::new(state.repo.clone())
        .execute(subject)
        .await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
