//! Domain types for the shop.
//!
//! These types represent validated domain objects. Row decoding happens
//! directly into them via `sqlx::FromRow` where the shapes match.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use session::{CurrentUser, session_keys};
