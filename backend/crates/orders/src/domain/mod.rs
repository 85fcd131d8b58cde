//! Domain Layer

pub mod order;
pub mod repository;
pub mod request;
pub mod services;
pub mod status;
pub mod summary;

pub use order::{Order, OrderLine};
pub use repository::OrderRepository;
pub use request::{LineRequest, OrderRequest, Quantity};
pub use services::{Allocation, PricedLine, StockDecrement, allocate};
pub use status::OrderStatus;
pub use summary::{OrderSummary, SummaryLine};
