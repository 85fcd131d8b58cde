//! Orders Router
//!
//! Routes are returned without authentication; the caller layers the bearer
//! gate on top with `route_layer`.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::OrderRepository;
use crate::infra::postgres::PgOrderRepository;
use crate::presentation::handlers::{self, OrdersAppState};

/// Create the Orders router with PostgreSQL repository
pub fn orders_router(repo: PgOrderRepository) -> Router {
    orders_router_generic(repo)
}

/// Create a generic Orders router for any repository implementation
pub fn orders_router_generic<R>(repo: R) -> Router
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let state = OrdersAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/orders", post(handlers::place_order::<R>))
        .route("/orders/mine", get(handlers::list_my_orders::<R>))
        .with_state(state)
}
