//! Checkout and order route handlers.
//!
//! Checkout converts a client-submitted cart snapshot into an immutable
//! order. The snapshot and total are persisted as-is; the cart is not
//! cleared as a side effect (clients call `DELETE /shop/cart` when they
//! want that).

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use clementine_core::ProductId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::order::{NewOrderLine, OrderDetails};
use crate::response::ApiResponse;
use crate::state::AppState;

/// One line of the submitted cart snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotItem {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<SnapshotItem>,
    pub total_amount: Decimal,
    pub shipping_address: String,
}

/// Payment-intent request body.
#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub amount: Decimal,
    pub email: String,
}

/// Payment-intent response payload.
#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Create an order from the submitted snapshot.
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn checkout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<OrderDetails>>> {
    let lines = validate_checkout(&body)?;

    let repo = OrderRepository::new(state.pool());
    let order = repo
        .create(
            user.id,
            &lines,
            body.total_amount,
            body.shipping_address.trim(),
        )
        .await?;

    tracing::info!(order_id = %order.order.id, "order placed");
    Ok(ApiResponse::ok_with_message(order, "Order placed"))
}

/// The current user's order history, newest first.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn orders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderDetails>>>> {
    let repo = OrderRepository::new(state.pool());
    let orders = repo.list_for_user(user.id).await?;

    Ok(ApiResponse::ok(orders))
}

/// Ask the payment collaborator for an intent and relay its client secret.
#[instrument(skip(state, body))]
pub async fn payment_intent(
    State(state): State<AppState>,
    Json(body): Json<PaymentIntentRequest>,
) -> Result<Json<ApiResponse<PaymentIntentResponse>>> {
    if body.email.is_empty() {
        return Err(AppError::Validation("email is required".to_owned()));
    }

    let client_secret = state.payments().create_intent(body.amount, &body.email).await?;

    Ok(ApiResponse::ok(PaymentIntentResponse { client_secret }))
}

/// Validate the snapshot and convert it to order lines.
///
/// All three inputs must be present and non-empty; the total is persisted
/// as submitted, without recomputation from the catalog.
fn validate_checkout(body: &CheckoutRequest) -> Result<Vec<NewOrderLine>> {
    if body.items.is_empty() {
        return Err(AppError::Validation(
            "order must contain at least one item".to_owned(),
        ));
    }

    if body.shipping_address.trim().is_empty() {
        return Err(AppError::Validation(
            "shipping address is required".to_owned(),
        ));
    }

    if body.total_amount < Decimal::ZERO {
        return Err(AppError::Validation(
            "total amount must be non-negative".to_owned(),
        ));
    }

    let mut lines = Vec::with_capacity(body.items.len());
    for item in &body.items {
        if item.name.trim().is_empty() {
            return Err(AppError::Validation("item name is required".to_owned()));
        }
        if item.quantity < 1 {
            return Err(AppError::Validation(
                "item quantity must be a positive integer".to_owned(),
            ));
        }
        if item.price < Decimal::ZERO {
            return Err(AppError::Validation(
                "item price must be non-negative".to_owned(),
            ));
        }

        lines.push(NewOrderLine {
            product_id: item.product_id,
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.price,
        });
    }

    Ok(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            items: vec![SnapshotItem {
                product_id: Some(ProductId::new(1)),
                name: "Espresso cup".to_owned(),
                quantity: 2,
                price: Decimal::new(10000, 2),
            }],
            total_amount: Decimal::new(20000, 2),
            shipping_address: "12 Orchard Lane".to_owned(),
        }
    }

    #[test]
    fn test_validate_checkout_accepts_well_formed_snapshot() {
        let lines = validate_checkout(&request()).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().quantity, 2);
        assert_eq!(lines.first().unwrap().unit_price, Decimal::new(10000, 2));
    }

    #[test]
    fn test_validate_checkout_rejects_empty_items() {
        let mut req = request();
        req.items.clear();
        assert!(matches!(
            validate_checkout(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_checkout_rejects_blank_address() {
        let mut req = request();
        req.shipping_address = "   ".to_owned();
        assert!(matches!(
            validate_checkout(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_checkout_rejects_non_positive_quantity() {
        let mut req = request();
        req.items.first_mut().unwrap().quantity = 0;
        assert!(matches!(
            validate_checkout(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_checkout_rejects_negative_total() {
        let mut req = request();
        req.total_amount = Decimal::new(-1, 0);
        assert!(matches!(
            validate_checkout(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_checkout_keeps_submitted_prices() {
        // The snapshot is trusted as-is: no recomputation against the
        // live catalog happens at this layer.
        let mut req = request();
        req.items.first_mut().unwrap().price = Decimal::new(1, 2);
        let lines = validate_checkout(&req).unwrap();
        assert_eq!(lines.first().unwrap().unit_price, Decimal::new(1, 2));
    }
}
