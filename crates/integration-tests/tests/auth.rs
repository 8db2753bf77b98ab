//! Integration tests for signup/signin and the admin invariant.
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

use serde_json::{Value, json};

use clementine_integration_tests::{base_url, client, unique_email};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signup_then_profile() {
    let client = client();
    let base = base_url();
    let email = unique_email("auth-profile");

    let resp = client
        .post(format!("{base}/auth/signup"))
        .json(&json!({ "email": email, "password": "integration-pass-1" }))
        .send()
        .await
        .expect("signup failed");
    assert!(resp.status().is_success());

    let body: Value = client
        .get(format!("{base}/auth/profile"))
        .send()
        .await
        .expect("profile failed")
        .json()
        .await
        .expect("not json");

    assert_eq!(body["success"], true);
    assert_eq!(body["response"]["email"], email.as_str());
    assert_eq!(body["response"]["role"], "user");
    assert!(
        body["response"].get("password_hash").is_none(),
        "hashes must never be serialized"
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_email_conflicts() {
    let base = base_url();
    let email = unique_email("auth-dup");
    let payload = json!({ "email": email, "password": "integration-pass-1" });

    let first = client()
        .post(format!("{base}/auth/signup"))
        .json(&payload)
        .send()
        .await
        .expect("signup failed");
    assert!(first.status().is_success());

    let second = client()
        .post(format!("{base}/auth/signup"))
        .json(&payload)
        .send()
        .await
        .expect("signup failed");
    assert_eq!(second.status(), 409);

    let body: Value = second.json().await.expect("not json");
    assert_eq!(body["success"], false);
    assert!(
        body["message"].as_str().unwrap_or("").contains("email"),
        "conflict should name the offending field"
    );
}

#[tokio::test]
#[ignore = "Requires running server and a database with an existing admin"]
async fn test_second_admin_signup_conflicts() {
    // Precondition: the seeded database already has its one admin.
    let resp = client()
        .post(format!("{}/auth/signup", base_url()))
        .json(&json!({
            "email": unique_email("auth-admin"),
            "password": "integration-pass-1",
            "role": "admin"
        }))
        .send()
        .await
        .expect("signup failed");

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.expect("not json");
    assert!(body["message"].as_str().unwrap_or("").contains("admin"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_weak_password_is_rejected_before_account_creation() {
    let base = base_url();
    let email = unique_email("auth-weak");

    let resp = client()
        .post(format!("{base}/auth/signup"))
        .json(&json!({ "email": email, "password": "short" }))
        .send()
        .await
        .expect("signup failed");
    assert_eq!(resp.status(), 400);

    // The rejected signup must not have created the account.
    let retry = client()
        .post(format!("{base}/auth/signup"))
        .json(&json!({ "email": email, "password": "integration-pass-1" }))
        .send()
        .await
        .expect("signup failed");
    assert!(retry.status().is_success());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signin_with_wrong_password_is_401() {
    let base = base_url();
    let email = unique_email("auth-wrongpw");

    client()
        .post(format!("{base}/auth/signup"))
        .json(&json!({ "email": email, "password": "integration-pass-1" }))
        .send()
        .await
        .expect("signup failed");

    let resp = client()
        .post(format!("{base}/auth/signin"))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("signin failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_profile_requires_authentication() {
    let resp = client()
        .get(format!("{}/auth/profile", base_url()))
        .send()
        .await
        .expect("profile failed");
    assert_eq!(resp.status(), 401);
}
