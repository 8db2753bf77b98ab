//! Integration tests for Clementine.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and the server
//! docker compose up -d db
//! cargo run -p clementine-server &
//!
//! # Run integration tests
//! cargo test -p clementine-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default: they need a running server with a
//! database behind it. Each test registers its own throwaway user so runs
//! don't interfere with each other.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CLEMENTINE_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A fresh HTTP client with a cookie store (sessions ride on cookies).
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email so test runs never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@test.clementine.shop", Uuid::new_v4())
}

/// Register a throwaway user and leave the client logged in.
///
/// # Panics
///
/// Panics if the signup request fails.
pub async fn signup(client: &Client, email: &str) -> Value {
    let resp = client
        .post(format!("{}/auth/signup", base_url()))
        .json(&json!({ "email": email, "password": "integration-pass-1" }))
        .send()
        .await
        .expect("Failed to sign up");

    assert!(
        resp.status().is_success(),
        "signup failed: {}",
        resp.status()
    );
    resp.json().await.expect("signup response was not JSON")
}

/// A logged-in client for a brand-new throwaway user.
pub async fn logged_in_client(prefix: &str) -> Client {
    let client = client();
    let email = unique_email(prefix);
    signup(&client, &email).await;
    client
}

/// A product ID known to exist in the test catalog.
///
/// Cart and wishlist tests need a real product row behind the foreign
/// key; seed one and point `CLEMENTINE_TEST_PRODUCT_ID` at it (defaults
/// to 1).
#[must_use]
pub fn test_product_id() -> i64 {
    std::env::var("CLEMENTINE_TEST_PRODUCT_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
}
