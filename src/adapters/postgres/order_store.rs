//! PostgreSQL implementation of OrderStore.
//!
//! `settle` locks the order row, then the owning account row, inside one
//! transaction. A concurrent delivery blocks on the order lock and then
//! observes PAID.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::premium::{settle_order, Order, Settlement};
use crate::ports::OrderStore;

use super::rows::{
    account_not_found, db_error, lock_account, write_account_state, OrderRow, ORDER_COLUMNS,
};

pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_not_found(provider_order_id: &str) -> DomainError {
    DomainError::new(ErrorCode::OrderNotFound, "Order not found")
        .with_detail("provider_order_id", provider_order_id.to_string())
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, provider_order_id, account_id, amount_minor, currency, status,
                provider_payment_id, created_at, paid_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(&order.provider_order_id)
        .bind(order.account_id.as_uuid())
        .bind(order.amount_minor)
        .bind(&order.currency)
        .bind(order.status.as_str())
        .bind(&order.provider_payment_id)
        .bind(order.created_at.as_datetime())
        .bind(order.paid_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("orders_provider_order_id_key") {
                    return DomainError::new(
                        ErrorCode::DuplicateOrder,
                        "Provider order id already tracked",
                    )
                    .with_detail("provider_order_id", order.provider_order_id.clone());
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert order: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_provider_order_id(
        &self,
        provider_order_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE provider_order_id = $1",
            ORDER_COLUMNS
        ))
        .bind(provider_order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find order"))?;

        row.map(Order::try_from).transpose()
    }

    async fn settle(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        now: Timestamp,
    ) -> Result<Settlement, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE provider_order_id = $1 FOR UPDATE",
            ORDER_COLUMNS
        ))
        .bind(provider_order_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock order"))?;

        let mut order = row
            .map(Order::try_from)
            .transpose()?
            .ok_or_else(|| order_not_found(provider_order_id))?;
        if order.is_paid() {
            return Ok(Settlement::AlreadyPaid);
        }

        let mut account = lock_account(&mut tx, order.account_id)
            .await?
            .ok_or_else(|| account_not_found(order.account_id))?;

        let settlement = settle_order(&mut order, &mut account, provider_payment_id, now)?;

        sqlx::query(
            r#"
            UPDATE orders SET
                status = $2,
                provider_payment_id = $3,
                paid_at = $4
            WHERE id = $1
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.status.as_str())
        .bind(&order.provider_payment_id)
        .bind(order.paid_at.map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update order"))?;

        write_account_state(&mut tx, &account).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        tracing::debug!(provider_order_id = %provider_order_id, "Order settled in transaction");
        Ok(settlement)
    }
}
