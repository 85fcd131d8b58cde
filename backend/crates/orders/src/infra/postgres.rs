//! PostgreSQL Repository Implementation
//!
//! `place` runs in one transaction: lock products, allocate, insert header,
//! insert lines, decrement stock, commit. Returning early drops the
//! transaction, which rolls it back.

use catalog::ProductId;
use catalog::infra::{decrement_stock, lock_for_update};
use chrono::{DateTime, Utc};
use kernel::id::{OrderId, UserId};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::order::{Order, OrderLine};
use crate::domain::repository::OrderRepository;
use crate::domain::request::OrderRequest;
use crate::domain::services::allocate;
use crate::domain::status::OrderStatus;
use crate::domain::summary::{OrderSummary, SummaryLine};
use crate::error::{OrderError, OrderResult};

/// PostgreSQL-backed order store
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for PgOrderRepository {
    async fn place(&self, user_id: UserId, request: &OrderRequest) -> OrderResult<Order> {
        let mut tx = self.pool.begin().await?;

        let snapshot = lock_for_update(&mut *tx, &request.product_ids()).await?;
        let allocation = allocate(request, &snapshot)?;
        let order = Order::pending(user_id, allocation.lines);

        insert_header(&mut *tx, &order).await?;
        for line in &order.lines {
            insert_line(&mut *tx, order.order_id, line).await?;
        }
        for decrement in &allocation.decrements {
            decrement_stock(&mut *tx, decrement.product_id, decrement.quantity).await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    async fn list_for_user(&self, user_id: &UserId) -> OrderResult<Vec<OrderSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                o.order_id,
                o.status,
                o.created_at,
                l.line_no,
                l.product_id,
                p.name AS product_name,
                l.quantity,
                l.unit_price,
                p.price AS current_price
            FROM orders o
            JOIN order_lines l ON l.order_id = o.order_id
            JOIN products p ON p.product_id = l.product_id
            WHERE o.user_id = $1
            ORDER BY o.created_at DESC, o.order_id, l.line_no
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        fold_summaries(rows)
    }
}

// ============================================================================
// Writes
// ============================================================================

async fn insert_header(conn: &mut PgConnection, order: &Order) -> OrderResult<()> {
    sqlx::query(
        r#"
        INSERT INTO orders (order_id, user_id, status, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(order.order_id.as_uuid())
    .bind(order.user_id.as_uuid())
    .bind(order.status.id())
    .bind(order.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn insert_line(conn: &mut PgConnection, order_id: OrderId, line: &OrderLine) -> OrderResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_lines (
            order_line_id,
            order_id,
            line_no,
            product_id,
            quantity,
            unit_price
        ) VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(line.order_line_id.as_uuid())
    .bind(order_id.as_uuid())
    .bind(to_i32(line.line_no)?)
    .bind(line.product_id.get())
    .bind(to_i32(line.quantity)?)
    .bind(line.unit_price)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

fn to_i32(value: u32) -> OrderResult<i32> {
    i32::try_from(value).map_err(|_| OrderError::Internal(format!("{value} exceeds INTEGER")))
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct SummaryRow {
    order_id: Uuid,
    status: i16,
    created_at: DateTime<Utc>,
    line_no: i32,
    product_id: i64,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
    current_price: Decimal,
}

impl SummaryRow {
    fn line(&self) -> OrderResult<SummaryLine> {
        let line_no = u32::try_from(self.line_no)
            .map_err(|_| OrderError::Internal(format!("invalid line_no {}", self.line_no)))?;
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| OrderError::Internal(format!("invalid quantity {}", self.quantity)))?;

        Ok(SummaryLine {
            line_no,
            product_id: ProductId::new(self.product_id),
            product_name: self.product_name.clone(),
            quantity,
            unit_price: self.unit_price,
            current_price: self.current_price,
        })
    }
}

/// Group rows (sorted by order, then line) into summaries, keeping order.
fn fold_summaries(rows: Vec<SummaryRow>) -> OrderResult<Vec<OrderSummary>> {
    let mut summaries: Vec<OrderSummary> = Vec::new();

    for row in rows {
        let line = row.line()?;
        let order_id = OrderId::from_uuid(row.order_id);

        match summaries.last_mut() {
            Some(current) if current.order_id == order_id => current.lines.push(line),
            _ => {
                let status = OrderStatus::from_id(row.status).ok_or_else(|| {
                    OrderError::Internal(format!("unknown order status {}", row.status))
                })?;
                summaries.push(OrderSummary {
                    order_id,
                    status,
                    created_at: row.created_at,
                    lines: vec![line],
                });
            }
        }
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order_id: Uuid, line_no: i32, created_at: DateTime<Utc>) -> SummaryRow {
        SummaryRow {
            order_id,
            status: 0,
            created_at,
            line_no,
            product_id: 1,
            product_name: "Mug".to_string(),
            quantity: 2,
            unit_price: Decimal::new(1250, 2),
            current_price: Decimal::new(1300, 2),
        }
    }

    #[test]
    fn test_fold_groups_consecutive_rows() {
        let newer = Uuid::new_v4();
        let older = Uuid::new_v4();
        let now = Utc::now();

        let summaries = fold_summaries(vec![
            row(newer, 1, now),
            row(newer, 2, now),
            row(older, 1, now - chrono::Duration::hours(1)),
        ])
        .unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].order_id, OrderId::from_uuid(newer));
        assert_eq!(summaries[0].lines.len(), 2);
        assert_eq!(summaries[1].lines.len(), 1);
        assert_eq!(summaries[0].total_amount(), Decimal::new(5000, 2));
    }

    #[test]
    fn test_fold_rejects_bad_rows() {
        let mut bad_status = row(Uuid::new_v4(), 1, Utc::now());
        bad_status.status = 9;
        assert!(matches!(
            fold_summaries(vec![bad_status]),
            Err(OrderError::Internal(_))
        ));

        let mut bad_quantity = row(Uuid::new_v4(), 1, Utc::now());
        bad_quantity.quantity = -1;
        assert!(fold_summaries(vec![bad_quantity]).is_err());
    }

    #[test]
    fn test_fold_empty() {
        assert!(fold_summaries(Vec::new()).unwrap().is_empty());
    }
}
