//! Database operations for the shop `PostgreSQL` database.
//!
//! ## Tables (schema `shop`)
//!
//! - `users` - Accounts, argon2 password hashes, single-admin partial index
//! - `products` - Catalog
//! - `cart_lines` - One row per (user, product); the primary key is the
//!   cart's uniqueness invariant
//! - `wishlist_entries` - Set semantics via the (user, product) primary key
//! - `orders` / `order_lines` - Immutable checkout snapshots
//! - `session` - tower-sessions storage (created by the session store)
//!
//! All mutations are single statements (conditional upsert, conditional
//! update, keyed delete) or a single transaction, so concurrent requests
//! for the same user cannot interleave into lost updates.
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run at startup via
//! `sqlx::migrate!`.

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlists;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;
pub use wishlists::WishlistRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Constraint violation (e.g., unique email, second admin).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
