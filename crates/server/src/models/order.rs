//! Order domain types.
//!
//! An order is an immutable snapshot: line items copy the product name and
//! unit price at checkout time so later catalog edits never rewrite order
//! history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use clementine_core::{OrderId, OrderLineId, OrderStatus, ProductId, UserId};

/// An order header.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User that placed the order.
    pub user_id: UserId,
    /// Total amount as submitted at checkout.
    pub total_amount: Decimal,
    /// Shipping address as submitted at checkout.
    pub shipping_address: String,
    /// Fulfillment status. Always `Pending` at creation.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// A single order line (snapshot).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderLine {
    /// Unique line ID.
    pub id: OrderLineId,
    /// Order this line belongs to.
    pub order_id: OrderId,
    /// Soft reference to the catalog product. Kept for traceability only;
    /// the snapshot fields below are authoritative.
    pub product_id: Option<ProductId>,
    /// Product name at checkout time.
    pub name: String,
    /// Units ordered. Always positive.
    pub quantity: i32,
    /// Unit price at checkout time.
    pub unit_price: Decimal,
}

/// Input for a single order line at checkout.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// An order with its lines, as returned from checkout.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    /// The order header.
    #[serde(flatten)]
    pub order: Order,
    /// The snapshot line items.
    pub items: Vec<OrderLine>,
}
