//! Shop Client
//!
//! Typed HTTP client for the shop API, with an explicit session (current
//! user, bearer token, cart) that lives in a pluggable [`SessionStore`]
//! instead of global state.
//!
//! - `models` - Wire types returned by the API
//! - `cart` - Client-side cart, capped by the stock seen when adding
//! - `session` - `Session` and its stores (memory, JSON file)
//! - `api` - `ShopClient`

pub mod api;
pub mod cart;
pub mod error;
pub mod models;
pub mod session;


pub use api::ShopClient;
pub use cart::{Cart, CartLine};
pub use error::{ClientError, ClientResult};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
