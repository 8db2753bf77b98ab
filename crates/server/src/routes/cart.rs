//! Cart route handlers.
//!
//! Quantities are validated here; the repository then applies each change
//! as one atomic statement, so concurrent requests for the same user can
//! interleave freely without corrupting the cart.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use clementine_core::ProductId;

use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::cart::CartView;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    /// Defaults to one unit.
    pub quantity: Option<i32>,
}

/// Set-quantity request body.
#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Quantities entering the cart must be positive integers.
fn validate_quantity(quantity: i32) -> Result<i32> {
    if quantity < 1 {
        return Err(AppError::Validation(
            "quantity must be a positive integer".to_owned(),
        ));
    }
    Ok(quantity)
}

/// The current cart, resolved against the catalog.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CartView>>> {
    let repo = CartRepository::new(state.pool());
    let items = repo.get(user.id).await?;

    Ok(ApiResponse::ok(CartView::from(items)))
}

/// Add an item, merging with an existing line for the same product.
#[instrument(skip(state, user, body), fields(user_id = %user.id, product_id = %body.product_id))]
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<ApiResponse<CartView>>> {
    let quantity = validate_quantity(body.quantity.unwrap_or(1))?;

    let repo = CartRepository::new(state.pool());
    let items = repo.add_item(user.id, body.product_id, quantity).await?;

    Ok(ApiResponse::ok(CartView::from(items)))
}

/// Set the quantity of an existing line.
///
/// Unlike [`add`], a missing line is a 404, not an upsert.
#[instrument(skip(state, user, body), fields(user_id = %user.id, product_id = %body.product_id))]
pub async fn set_quantity(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<SetQuantityRequest>,
) -> Result<Json<ApiResponse<CartView>>> {
    let quantity = validate_quantity(body.quantity)?;

    let repo = CartRepository::new(state.pool());
    let items = repo
        .set_quantity(user.id, body.product_id, quantity)
        .await?;

    Ok(ApiResponse::ok(CartView::from(items)))
}

/// Remove a line. Succeeds (as a no-op) when the line is absent.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ApiResponse<CartView>>> {
    let repo = CartRepository::new(state.pool());
    let items = repo.remove_item(user.id, product_id).await?;

    Ok(ApiResponse::ok_with_message(
        CartView::from(items),
        "Item removed from cart",
    ))
}

/// Empty the cart. Idempotent.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn clear(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CartView>>> {
    let repo = CartRepository::new(state.pool());
    repo.clear(user.id).await?;

    Ok(ApiResponse::ok_with_message(
        CartView::empty(),
        "Cart cleared successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity_accepts_positive() {
        assert_eq!(validate_quantity(1).ok(), Some(1));
        assert_eq!(validate_quantity(99).ok(), Some(99));
    }

    #[test]
    fn test_validate_quantity_rejects_zero_and_negative() {
        assert!(matches!(validate_quantity(0), Err(AppError::Validation(_))));
        assert!(matches!(
            validate_quantity(-5),
            Err(AppError::Validation(_))
        ));
    }
}
