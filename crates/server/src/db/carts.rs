//! Cart repository.
//!
//! The cart is the set of `shop.cart_lines` rows for a user, keyed by
//! (user, product). Every mutation is a single atomic statement: two
//! concurrent adds of the same product merge into one line with the
//! summed quantity, never two lines and never a dropped increment.

use sqlx::PgPool;

use clementine_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::ResolvedCartLine;

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add `quantity` units of a product, merging with an existing line.
    ///
    /// A single conditional upsert: inserts a new line, or atomically
    /// increments the existing one. The caller validates `quantity >= 1`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        user: UserId,
        product: ProductId,
        quantity: i32,
    ) -> Result<Vec<ResolvedCartLine>, RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.cart_lines (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = shop.cart_lines.quantity + EXCLUDED.quantity,
                          updated_at = NOW()
            ",
        )
        .bind(user)
        .bind(product)
        .bind(quantity)
        .execute(self.pool)
        .await
        .map_err(product_not_found)?;

        self.resolved_lines(user).await
    }

    /// Set the quantity of an existing line.
    ///
    /// Unlike [`Self::add_item`] this never creates a line; a missing line
    /// is `NotFound`. The caller validates `quantity >= 1`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no line exists for the
    /// product. Returns `RepositoryError::Database` for other errors.
    pub async fn set_quantity(
        &self,
        user: UserId,
        product: ProductId,
        quantity: i32,
    ) -> Result<Vec<ResolvedCartLine>, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shop.cart_lines
            SET quantity = $3, updated_at = NOW()
            WHERE user_id = $1 AND product_id = $2
            ",
        )
        .bind(user)
        .bind(product)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("cart line"));
        }

        self.resolved_lines(user).await
    }

    /// Remove the line for a product. A no-op if the line is absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_item(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<Vec<ResolvedCartLine>, RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM shop.cart_lines
            WHERE user_id = $1 AND product_id = $2
            ",
        )
        .bind(user)
        .bind(product)
        .execute(self.pool)
        .await?;

        self.resolved_lines(user).await
    }

    /// Empty the cart. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, user: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM shop.cart_lines
            WHERE user_id = $1
            ",
        )
        .bind(user)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// The user's cart lines with product details resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user: UserId) -> Result<Vec<ResolvedCartLine>, RepositoryError> {
        self.resolved_lines(user).await
    }

    /// Lines joined with the catalog. The inner join excludes lines whose
    /// product row vanished.
    async fn resolved_lines(
        &self,
        user: UserId,
    ) -> Result<Vec<ResolvedCartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, ResolvedCartLine>(
            r"
            SELECT l.product_id, l.quantity, l.updated_at,
                   p.name, p.price, p.category, p.images,
                   p.quantity AS in_stock
            FROM shop.cart_lines l
            JOIN shop.products p ON p.id = l.product_id
            WHERE l.user_id = $1
            ORDER BY l.product_id ASC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }
}

/// Map a foreign-key violation on the product reference to `NotFound`.
pub(super) fn product_not_found(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound("product");
    }
    RepositoryError::Database(e)
}
