//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use clementine_core::ProductId;

use crate::db::WishlistRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::product::Product;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Add-to-wishlist request body.
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub product_id: ProductId,
}

/// The wishlist as returned to clients.
#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub products: Vec<Product>,
}

/// The current wishlist, resolved against the catalog. A user who never
/// added anything gets an empty list, not an error.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WishlistView>>> {
    let repo = WishlistRepository::new(state.pool());
    let products = repo.get(user.id).await?;

    Ok(ApiResponse::ok_with_message(
        WishlistView { products },
        "Wishlist fetched successfully",
    ))
}

/// Add a product. Idempotent: adding twice leaves a single entry.
#[instrument(skip(state, user, body), fields(user_id = %user.id, product_id = %body.product_id))]
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<AddProductRequest>,
) -> Result<Json<ApiResponse<WishlistView>>> {
    let repo = WishlistRepository::new(state.pool());
    let products = repo.add_product(user.id, body.product_id).await?;

    Ok(ApiResponse::ok_with_message(
        WishlistView { products },
        "Item added to wishlist",
    ))
}

/// Remove a product. Succeeds (as a no-op) when absent.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ApiResponse<WishlistView>>> {
    let repo = WishlistRepository::new(state.pool());
    let products = repo.remove_product(user.id, product_id).await?;

    Ok(ApiResponse::ok_with_message(
        WishlistView { products },
        "Item removed from wishlist",
    ))
}
