//! Catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use clementine_core::{ProductId, UserId};

/// Number of products per catalog page.
pub const PAGE_SIZE: i64 = 8;

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price. Non-negative.
    pub price: Decimal,
    /// Units in stock. Non-negative.
    pub quantity: i32,
    /// Category name (free-form, used for filtering and grouping).
    pub category: String,
    /// Public image URLs, at least one.
    pub images: Vec<String>,
    /// Admin that created the product.
    pub owner_id: UserId,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
    pub images: Vec<String>,
}

/// A category paired with a representative image.
///
/// The image is the first image of the first product (lowest ID) in the
/// category, which keeps the choice deterministic across requests.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategorySummary {
    /// Category name.
    pub name: String,
    /// Representative image URL, if the product carries any.
    pub image: Option<String>,
}

/// Sort order for catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most recently created first.
    #[default]
    Newest,
}

impl SortKey {
    /// Parse the query-string form. Unknown values fall back to newest-first.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::PriceAsc,
            Some("desc") => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    /// The ORDER BY fragment for this key. A secondary ID sort keeps
    /// pagination stable when prices tie.
    #[must_use]
    pub const fn order_by(self) -> &'static str {
        match self {
            Self::PriceAsc => "price ASC, id ASC",
            Self::PriceDesc => "price DESC, id ASC",
            Self::Newest => "created_at DESC, id DESC",
        }
    }
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// 1-based page number.
    pub page: i64,
    /// Sort order.
    pub sort: SortKey,
    /// Restrict to a category. `None` (or "all" at the HTTP layer) means
    /// no restriction.
    pub category: Option<String>,
}

/// One page of catalog results.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage<T = Product> {
    /// Products on this page.
    pub items: Vec<T>,
    /// The requested page (1-based).
    pub current_page: i64,
    /// Total pages for the filtered set.
    pub total_pages: i64,
    /// Total products matching the filter.
    pub total_items: i64,
}

/// Total pages for `total_items` items at `page_size` per page.
#[must_use]
pub fn total_pages(total_items: i64, page_size: i64) -> i64 {
    (total_items + page_size - 1) / page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_from_query() {
        assert_eq!(SortKey::from_query(Some("asc")), SortKey::PriceAsc);
        assert_eq!(SortKey::from_query(Some("desc")), SortKey::PriceDesc);
        assert_eq!(SortKey::from_query(Some("newest")), SortKey::Newest);
        assert_eq!(SortKey::from_query(Some("garbage")), SortKey::Newest);
        assert_eq!(SortKey::from_query(None), SortKey::Newest);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(8, PAGE_SIZE), 1);
        assert_eq!(total_pages(9, PAGE_SIZE), 2);
        assert_eq!(total_pages(20, PAGE_SIZE), 3);
    }

    #[test]
    fn test_order_by_fragments_are_static() {
        // Sort fragments are interpolated into SQL; they must come from
        // this fixed set, never from user input.
        for key in [SortKey::PriceAsc, SortKey::PriceDesc, SortKey::Newest] {
            assert!(!key.order_by().is_empty());
        }
    }
}
