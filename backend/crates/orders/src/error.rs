//! Order Error Types
//!
//! Validation failures (400/404/409) are raised before anything is written.
//! Store failures (500) roll the transaction back and surface as the fixed
//! message `Persistence failure`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::{CatalogError, ProductId};
use kernel::error::{app_error::AppError, conversions::PERSISTENCE_FAILURE, kind::ErrorKind};
use thiserror::Error;

pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order must contain at least one line")]
    EmptyCart,

    #[error("Quantity for product {product_id} must be a positive integer (got {quantity})")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },

    #[error("Product {product_id} does not exist")]
    ProductNotFound { product_id: ProductId },

    #[error(
        "Insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Database error (transaction rolled back)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Catalog access failed inside the order transaction
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Stored data could not be mapped back to the domain
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::EmptyCart
            | OrderError::InvalidQuantity { .. } => ErrorKind::BadRequest,
            OrderError::ProductNotFound { .. } => ErrorKind::NotFound,
            OrderError::InsufficientStock { .. } => ErrorKind::Conflict,
            OrderError::Database(_) | OrderError::Catalog(_) | OrderError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            OrderError::Database(_) | OrderError::Catalog(_) | OrderError::Internal(_) => {
                AppError::new(self.kind(), PERSISTENCE_FAILURE)
                    .with_action("Nothing was ordered; it is safe to retry")
            }
            OrderError::EmptyCart => AppError::new(self.kind(), self.to_string())
                .with_action("Add a product to the cart first"),
            OrderError::ProductNotFound { .. } => AppError::new(self.kind(), self.to_string())
                .with_action("Remove the product from the cart"),
            OrderError::InsufficientStock { .. } => AppError::new(self.kind(), self.to_string())
                .with_action("Reduce the quantity and try again"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            OrderError::Database(e) => {
                tracing::error!(error = %e, "Order transaction failed");
            }
            OrderError::Catalog(e) => {
                tracing::error!(error = %e, "Catalog access failed while ordering");
            }
            OrderError::Internal(msg) => {
                tracing::error!(message = %msg, "Order internal error");
            }
            OrderError::InsufficientStock {
                product_id,
                requested,
                available,
            } => {
                tracing::info!(
                    product_id = %product_id,
                    requested,
                    available,
                    "Order rejected: insufficient stock"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Order rejected");
            }
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_mapping() {
        assert_eq!(OrderError::EmptyCart.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            OrderError::InvalidQuantity {
                product_id: ProductId::new(1),
                quantity: 0
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            OrderError::ProductNotFound {
                product_id: ProductId::new(9)
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            OrderError::InsufficientStock {
                product_id: ProductId::new(2),
                requested: 1,
                available: 0
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            OrderError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_insufficient_stock_message_names_available() {
        let err = OrderError::InsufficientStock {
            product_id: ProductId::new(2),
            requested: 1,
            available: 0,
        };
        assert_eq!(
            err.to_app_error().message(),
            "Insufficient stock for product 2: requested 1, available 0"
        );
    }

    #[test]
    fn test_store_errors_are_opaque() {
        let err = OrderError::Database(sqlx::Error::Protocol("order_lines_pkey".into()));
        assert_eq!(err.to_app_error().message(), PERSISTENCE_FAILURE);
    }
}
