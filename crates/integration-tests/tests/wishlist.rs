//! Integration tests for wishlist set semantics.
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

use serde_json::{Value, json};

use clementine_integration_tests::{base_url, logged_in_client, test_product_id};

fn products(body: &Value) -> &Vec<Value> {
    body["response"]["products"]
        .as_array()
        .expect("wishlist response has no products array")
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_add_is_idempotent() {
    let client = logged_in_client("wish-idem").await;
    let base = base_url();
    let product = test_product_id();

    let mut last = Value::Null;
    for _ in 0..2 {
        last = client
            .post(format!("{base}/shop/wishlist/items"))
            .json(&json!({ "product_id": product }))
            .send()
            .await
            .expect("add failed")
            .json()
            .await
            .expect("not json");
    }

    assert_eq!(
        products(&last).len(),
        1,
        "adding the same product twice must leave a single entry"
    );
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_empty_wishlist_is_an_empty_list_not_an_error() {
    let client = logged_in_client("wish-empty").await;

    let body: Value = client
        .get(format!("{}/shop/wishlist", base_url()))
        .send()
        .await
        .expect("get failed")
        .json()
        .await
        .expect("not json");

    assert_eq!(body["success"], true);
    assert!(products(&body).is_empty());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_remove_absent_product_is_a_successful_no_op() {
    let client = logged_in_client("wish-remove").await;

    let resp = client
        .delete(format!(
            "{}/shop/wishlist/items/{}",
            base_url(),
            test_product_id()
        ))
        .send()
        .await
        .expect("remove failed");

    assert!(resp.status().is_success());
    let body: Value = resp.json().await.expect("not json");
    assert!(products(&body).is_empty());
}
