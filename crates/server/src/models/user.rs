//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use clementine_core::{Email, Role, UserId};

/// A shop user.
///
/// The password hash never leaves the database layer; this type is safe to
/// serialize into API responses.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (globally unique).
    pub email: Email,
    /// Account role. At most one admin exists system-wide.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
