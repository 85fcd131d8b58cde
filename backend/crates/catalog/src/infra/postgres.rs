//! PostgreSQL Repository Implementation
//!
//! Besides the pool-backed reader, exposes two connection-level helpers for
//! callers that already hold a transaction: [`lock_for_update`] and
//! [`decrement_stock`].

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::domain::product::{Product, ProductId};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog reader
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for PgCatalogRepository {
    async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product_id, name, price, stock
            FROM products
            ORDER BY product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}

// ============================================================================
// Transactional helpers
// ============================================================================

/// Read and row-lock the given products until the surrounding transaction
/// ends. Rows are locked in ID order so concurrent orders cannot deadlock.
pub async fn lock_for_update(
    conn: &mut PgConnection,
    ids: &[ProductId],
) -> CatalogResult<Vec<Product>> {
    let mut ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();
    ids.sort_unstable();
    ids.dedup();

    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT product_id, name, price, stock
        FROM products
        WHERE product_id = ANY($1)
        ORDER BY product_id
        FOR UPDATE
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(ProductRow::into_product).collect()
}

/// Subtract `quantity` from a product's stock. The caller must hold the row
/// lock and have checked availability; the `stock >= $2` guard only turns a
/// broken caller into an error instead of negative stock.
pub async fn decrement_stock(
    conn: &mut PgConnection,
    id: ProductId,
    quantity: u32,
) -> CatalogResult<()> {
    let quantity = i32::try_from(quantity)
        .map_err(|_| CatalogError::InvalidRow(format!("quantity {quantity} out of range")))?;

    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock = stock - $2
        WHERE product_id = $1 AND stock >= $2
        "#,
    )
    .bind(id.get())
    .bind(quantity)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() != 1 {
        return Err(CatalogError::InvalidRow(format!(
            "stock of product {id} could not be decremented by {quantity}"
        )));
    }

    Ok(())
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: i64,
    name: String,
    price: Decimal,
    stock: i32,
}

impl ProductRow {
    fn into_product(self) -> CatalogResult<Product> {
        let stock = u32::try_from(self.stock).map_err(|_| {
            CatalogError::InvalidRow(format!(
                "product {} has negative stock {}",
                self.product_id, self.stock
            ))
        })?;

        Ok(Product {
            id: ProductId::new(self.product_id),
            name: self.name,
            price: self.price,
            stock,
        })
    }
}
