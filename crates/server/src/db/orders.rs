//! Order repository.
//!
//! Orders are written once at checkout, inside one transaction, and never
//! mutated here. Status changes belong to an external fulfillment process.

use rust_decimal::Decimal;
use sqlx::PgPool;

use clementine_core::UserId;

use super::RepositoryError;
use crate::models::order::{NewOrderLine, Order, OrderDetails, OrderLine};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order with its snapshot lines.
    ///
    /// Header and lines are written in one transaction; a failure leaves
    /// no partial order behind. The caller validates the inputs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(
        &self,
        user: UserId,
        lines: &[NewOrderLine],
        total_amount: Decimal,
        shipping_address: &str,
    ) -> Result<OrderDetails, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO shop.orders (user_id, total_amount, shipping_address)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, total_amount, shipping_address, status, created_at
            ",
        )
        .bind(user)
        .bind(total_amount)
        .bind(shipping_address)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let item = sqlx::query_as::<_, OrderLine>(
                r"
                INSERT INTO shop.order_lines (order_id, product_id, name, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, order_id, product_id, name, quantity, unit_price
                ",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.unit_price)
            .fetch_one(&mut *tx)
            .await?;

            items.push(item);
        }

        tx.commit().await?;

        Ok(OrderDetails { order, items })
    }

    /// Orders placed by a user, newest first, with lines resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<OrderDetails>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_amount, shipping_address, status, created_at
            FROM shop.orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            let items = sqlx::query_as::<_, OrderLine>(
                r"
                SELECT id, order_id, product_id, name, quantity, unit_price
                FROM shop.order_lines
                WHERE order_id = $1
                ORDER BY id ASC
                ",
            )
            .bind(order.id)
            .fetch_all(self.pool)
            .await?;

            details.push(OrderDetails { order, items });
        }

        Ok(details)
    }
}
