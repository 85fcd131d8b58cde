//! Client Error Types

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a problem document
    #[error("API error {status}: {detail}")]
    Api {
        status: u16,
        title: String,
        detail: String,
        action: Option<String>,
    },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Only {available} of product {product_id} in stock (requested {requested})")]
    StockLimit {
        product_id: i64,
        requested: u64,
        available: u32,
    },

    #[error("Quantity must be positive")]
    InvalidQuantity,

    #[error("Product {product_id} is not in the cart")]
    NotInCart { product_id: i64 },

    #[error("Session store error: {0}")]
    Store(#[from] std::io::Error),

    /// A thread panicked while holding the in-memory session
    #[error("Session store is poisoned")]
    StorePoisoned,

    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
