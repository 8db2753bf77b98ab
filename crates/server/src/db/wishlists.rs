//! Wishlist repository.
//!
//! A wishlist is the set of `shop.wishlist_entries` rows for a user. Set
//! semantics come from the (user, product) primary key: add is an
//! idempotent `ON CONFLICT DO NOTHING`, remove is a keyed delete.

use sqlx::PgPool;

use clementine_core::{ProductId, UserId};

use super::RepositoryError;
use super::carts::product_not_found;
use crate::models::product::Product;

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a product to the wishlist. Idempotent; the first call for a
    /// user lazily creates the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_product(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<Vec<Product>, RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.wishlist_entries (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            ",
        )
        .bind(user)
        .bind(product)
        .execute(self.pool)
        .await
        .map_err(product_not_found)?;

        self.resolved_products(user).await
    }

    /// Remove a product from the wishlist. A no-op if absent or if the
    /// user has no wishlist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_product(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<Vec<Product>, RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM shop.wishlist_entries
            WHERE user_id = $1 AND product_id = $2
            ",
        )
        .bind(user)
        .bind(product)
        .execute(self.pool)
        .await?;

        self.resolved_products(user).await
    }

    /// The user's wishlist with product details resolved. Empty when the
    /// user never added anything.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user: UserId) -> Result<Vec<Product>, RepositoryError> {
        self.resolved_products(user).await
    }

    async fn resolved_products(&self, user: UserId) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT p.id, p.name, p.price, p.quantity, p.category, p.images,
                   p.owner_id, p.created_at
            FROM shop.wishlist_entries w
            JOIN shop.products p ON p.id = w.product_id
            WHERE w.user_id = $1
            ORDER BY w.added_at ASC, p.id ASC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
