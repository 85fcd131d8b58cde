//! Orders Backend Module
//!
//! Turns an authenticated cart into a persisted order, and lists a user's
//! order history.
//!
//! Clean Architecture structure:
//! - `domain/` - Order, lines, status, request validation, stock allocation
//! - `application/` - `PlaceOrderUseCase`, `ListOrdersUseCase`
//! - `infra/` - PostgreSQL implementation (single transaction per order)
//! - `presentation/` - `POST /orders`, `GET /orders/mine`
//!
//! ## Consistency
//! Placing an order locks the referenced product rows, re-validates stock
//! against them, inserts the header and every line, and decrements stock,
//! all in one transaction. Any failure rolls the whole attempt back. Client
//! supplied prices or names are never read; only `productId` + `quantity`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use domain::{Order, OrderLine, OrderRequest, OrderStatus, OrderSummary};
pub use error::{OrderError, OrderResult};
pub use infra::postgres::PgOrderRepository;
pub use presentation::router::{orders_router, orders_router_generic};
