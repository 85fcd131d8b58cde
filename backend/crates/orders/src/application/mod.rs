//! Application Layer - Use Cases

pub mod list_orders;
pub mod place_order;

pub use list_orders::ListOrdersUseCase;
pub use place_order::{PlaceOrderInput, PlaceOrderUseCase};
