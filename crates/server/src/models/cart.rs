//! Cart domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use clementine_core::ProductId;

/// A cart line resolved against the catalog.
///
/// Joins the stored (product, quantity) pair with current product details.
/// Lines whose product no longer exists in the catalog are excluded from
/// resolved views.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ResolvedCartLine {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Units of the product in the cart. Always positive.
    pub quantity: i32,
    /// When this line was last changed.
    pub updated_at: DateTime<Utc>,
    /// Current product name.
    pub name: String,
    /// Current unit price.
    pub price: Decimal,
    /// Product category.
    pub category: String,
    /// Product image URLs.
    pub images: Vec<String>,
    /// Units currently in stock.
    pub in_stock: i32,
}

/// The cart as returned to clients.
///
/// A user who never added anything gets an empty view, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    /// Cart lines, one per product.
    pub items: Vec<ResolvedCartLine>,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }
}

impl From<Vec<ResolvedCartLine>> for CartView {
    fn from(items: Vec<ResolvedCartLine>) -> Self {
        Self { items }
    }
}
