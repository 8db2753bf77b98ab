//! Product catalog repository.

use sqlx::PgPool;

use clementine_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::product::{
    CatalogFilter, CategorySummary, NewProduct, PAGE_SIZE, Product, ProductPage, total_pages,
};

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of products.
    ///
    /// An empty page is a valid result; the HTTP layer decides how to
    /// present it. The sort fragment comes from the fixed [`SortKey`] set,
    /// never from user input.
    ///
    /// [`SortKey`]: crate::models::product::SortKey
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, filter: &CatalogFilter) -> Result<ProductPage, RepositoryError> {
        let page = filter.page.max(1);
        let offset = (page - 1) * PAGE_SIZE;

        let (total_items,): (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*)
            FROM shop.products
            WHERE ($1::TEXT IS NULL OR category = $1)
            ",
        )
        .bind(filter.category.as_deref())
        .fetch_one(self.pool)
        .await?;

        let query = format!(
            r"
            SELECT id, name, price, quantity, category, images, owner_id, created_at
            FROM shop.products
            WHERE ($1::TEXT IS NULL OR category = $1)
            ORDER BY {}
            OFFSET $2 LIMIT $3
            ",
            filter.sort.order_by()
        );

        let items = sqlx::query_as::<_, Product>(&query)
            .bind(filter.category.as_deref())
            .bind(offset)
            .bind(PAGE_SIZE)
            .fetch_all(self.pool)
            .await?;

        Ok(ProductPage {
            items,
            current_page: page,
            total_pages: total_pages(total_items, PAGE_SIZE),
            total_items,
        })
    }

    /// Distinct category names, each with a representative image.
    ///
    /// The representative is the first image of the lowest-ID product in
    /// the category, so the choice is deterministic. Sorted by name
    /// ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<CategorySummary>, RepositoryError> {
        let categories = sqlx::query_as::<_, CategorySummary>(
            r"
            SELECT DISTINCT ON (category)
                category AS name,
                (CASE WHEN cardinality(images) > 0 THEN images[1] END) AS image
            FROM shop.products
            ORDER BY category ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Single product lookup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, quantity, category, images, owner_id, created_at
            FROM shop.products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Persist a new product.
    ///
    /// Field validation happens at the HTTP layer; the table's CHECK
    /// constraints are the backstop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        new: &NewProduct,
        owner: UserId,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO shop.products (name, price, quantity, category, images, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, price, quantity, category, images, owner_id, created_at
            ",
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.quantity)
        .bind(&new.category)
        .bind(&new.images)
        .bind(owner)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }
}
