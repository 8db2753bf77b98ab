//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings database)
//!
//! # Auth
//! POST /auth/signup                     - Register (establishes session)
//! POST /auth/signin                     - Login
//! POST /auth/logout                     - Logout
//! GET  /auth/profile                    - Current user (requires auth)
//!
//! # Catalog
//! GET  /shop/products                   - Paged listing (page, sort, category)
//! GET  /shop/products/{id}              - Product detail
//! GET  /shop/categories                 - Category names with images
//! POST /shop/admin/products             - Create product (admin, multipart)
//!
//! # Cart (requires auth)
//! GET    /shop/cart                     - Resolved cart
//! DELETE /shop/cart                     - Clear cart
//! POST   /shop/cart/items               - Add item (merges existing line)
//! PUT    /shop/cart/items               - Set line quantity
//! DELETE /shop/cart/items/{product_id}  - Remove line
//!
//! # Wishlist (requires auth)
//! GET    /shop/wishlist                 - Resolved wishlist
//! POST   /shop/wishlist/items           - Add product (idempotent)
//! DELETE /shop/wishlist/items/{product_id} - Remove product
//!
//! # Checkout (requires auth)
//! POST /shop/checkout                   - Create order from cart snapshot
//! GET  /shop/orders                     - Order history
//! POST /shop/payment-intent             - Payment collaborator pass-through
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/logout", post(auth::logout))
        .route("/profile", get(auth::profile))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add).put(cart::set_quantity))
        .route("/items/{product_id}", delete(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/items", post(wishlist::add))
        .route("/items/{product_id}", delete(wishlist::remove))
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list))
        .route("/products/{id}", get(products::detail))
        .route("/categories", get(products::categories))
        .route("/admin/products", post(products::create))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", post(checkout::checkout))
        .route("/orders", get(checkout::orders))
        .route("/payment-intent", post(checkout::payment_intent))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/shop", shop_routes())
}
