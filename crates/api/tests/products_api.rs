//! HTTP-level tests for product listing, the per-row editor and the
//! replace-all endpoint.

mod common;

use std::collections::BTreeSet;

use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::Router;
use common::{admin_token, body_json, delete, get, post_json, put_json, user_token};
use serde_json::{json, Value};
use vitrine_core::product::ProductOrder;
use vitrine_core::store::CatalogStore;
use vitrine_db::MemoryCatalogStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn stored_ids(store: &MemoryCatalogStore) -> BTreeSet<String> {
    store.product_ids().await.unwrap().into_iter().collect()
}

async fn replace_catalog(app: Router, token: Option<&str>, body: Value) -> Response<Body> {
    post_json(app, "/admin/products", token, body).await
}

fn products_body(ids: &[&str]) -> Value {
    let products: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({"id": id, "name": format!("Produit {id}"), "price": 1500, "category": "sacs"})
        })
        .collect();
    json!({ "products": products })
}

// ---------------------------------------------------------------------------
// Replace-all: authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn replace_without_token_is_401_and_store_unchanged() {
    let (app, store) = common::build_test_app();
    let response = replace_catalog(app.clone(), Some(&admin_token()), products_body(&["a"])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = replace_catalog(app, None, products_body(&["b"])).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");

    assert_eq!(stored_ids(&store).await, BTreeSet::from(["a".to_string()]));
}

#[tokio::test]
async fn replace_with_bad_token_is_401() {
    let (app, store) = common::build_test_app();

    let response = replace_catalog(app, Some("not-a-jwt"), products_body(&["a"])).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(stored_ids(&store).await.is_empty());
}

#[tokio::test]
async fn replace_by_non_admin_is_403_and_store_unchanged() {
    let (app, store) = common::build_test_app();

    let response = replace_catalog(app, Some(&user_token()), products_body(&["a"])).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert!(stored_ids(&store).await.is_empty());
}

// ---------------------------------------------------------------------------
// Replace-all: behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn replace_with_non_array_is_400() {
    let (app, store) = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/admin/products",
        Some(&admin_token()),
        json!({"products": {"id": "a", "name": "A"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INPUT");

    let response = post_json(app, "/admin/products", Some(&admin_token()), json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(stored_ids(&store).await.is_empty());
}

#[tokio::test]
async fn replace_reports_outcome_and_skipped_records() {
    let (app, store) = common::build_test_app();
    replace_catalog(app.clone(), Some(&admin_token()), products_body(&["a", "b"])).await;

    let response = post_json(
        app,
        "/admin/products",
        Some(&admin_token()),
        json!({"products": [
            {"id": "b", "name": "Sac"},
            {"name": "Sans id"},
            {"id": "c", "name": "Montre", "price": "25000"}
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["previous"], 2);
    assert_eq!(json["removed"], 1);
    assert_eq!(json["written"], 2);
    assert_eq!(json["skipped"][0]["index"], 1);
    assert_eq!(json["skipped"][0]["reason"], "missing_id");

    assert_eq!(
        stored_ids(&store).await,
        BTreeSet::from(["b".to_string(), "c".to_string()])
    );
    let montre = store.find_product("c").await.unwrap().unwrap();
    assert_eq!(montre.price, 25_000);
}

#[tokio::test]
async fn replace_failure_is_500_and_prior_state_kept() {
    let (app, store) = common::build_test_app();
    replace_catalog(app.clone(), Some(&admin_token()), products_body(&["a", "b"])).await;
    let before = store.list_products(ProductOrder::Id).await.unwrap();

    store.fail_next_commit_after(1).await;
    let response = replace_catalog(app, Some(&admin_token()), products_body(&["c"])).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "REPLACE_FAILED");
    assert_eq!(store.list_products(ProductOrder::Id).await.unwrap(), before);
}

// ---------------------------------------------------------------------------
// Public listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_reflects_replace_through_the_cache() {
    let (app, _) = common::build_test_app();
    replace_catalog(app.clone(), Some(&admin_token()), products_body(&["a"])).await;

    // Warm the cache.
    let json = body_json(get(app.clone(), "/products").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    replace_catalog(app.clone(), Some(&admin_token()), products_body(&["x", "y"])).await;

    let json = body_json(get(app, "/products").await).await;
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["x", "y"]);
}

#[tokio::test]
async fn listing_uses_camel_case_fields() {
    let (app, _) = common::build_test_app();
    post_json(
        app.clone(),
        "/admin/products",
        Some(&admin_token()),
        json!({"products": [
            {"id": "p1", "name": "Sac", "imageUrl": "https://cdn.example/sac.png"}
        ]}),
    )
    .await;

    let json = body_json(get(app, "/products/p1").await).await;
    assert_eq!(json["imageUrl"], "https://cdn.example/sac.png");
    assert_eq!(json["price"], 0);
}

#[tokio::test]
async fn listing_filters_and_orders() {
    let (app, _) = common::build_test_app();
    post_json(
        app.clone(),
        "/admin/products",
        Some(&admin_token()),
        json!({"products": [
            {"id": "1", "name": "Zèbre", "price": 300, "category": "sacs"},
            {"id": "2", "name": "Agenda", "price": 100, "category": "sacs"},
            {"id": "3", "name": "Montre", "price": 200, "category": "montres"}
        ]}),
    )
    .await;

    let json = body_json(get(app.clone(), "/products?category=sacs").await).await;
    let names: Vec<_> = json.as_array().unwrap().iter().map(|p| p["name"].clone()).collect();
    assert_eq!(names, [json!("Agenda"), json!("Zèbre")]);

    let json = body_json(get(app, "/products?order=price").await).await;
    let ids: Vec<_> = json.as_array().unwrap().iter().map(|p| p["id"].clone()).collect();
    assert_eq!(ids, [json!("2"), json!("3"), json!("1")]);
}

#[tokio::test]
async fn missing_product_is_404() {
    let (app, _) = common::build_test_app();
    let response = get(app, "/products/ghost").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn listing_is_500_when_store_unavailable() {
    let (app, store) = common::build_test_app();
    store.set_unavailable(true);

    let response = get(app, "/products").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "STORE_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Per-row editor
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_assigns_id_and_defaults() {
    let (app, _) = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/admin/products/new",
        Some(&admin_token()),
        json!({"name": "Parfum", "price": 12000, "category": "beaute"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let id = json["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("prod_"));
    assert_eq!(json["imageUrl"], "https://placehold.co/600x400.png");

    let response = get(app, &format!("/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn put_overwrites_and_invalidates_cache() {
    let (app, _) = common::build_test_app();
    let token = admin_token();

    let response = put_json(
        app.clone(),
        "/admin/products/p1",
        Some(&token),
        json!({"name": "Sac", "price": 5000}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.clone(), "/products").await).await;
    assert_eq!(json[0]["name"], "Sac");

    put_json(
        app.clone(),
        "/admin/products/p1",
        Some(&token),
        json!({"id": "ignored", "name": "Sac cuir", "price": 7000}),
    )
    .await;

    let json = body_json(get(app, "/products").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "p1");
    assert_eq!(json[0]["name"], "Sac cuir");
}

#[tokio::test]
async fn put_with_blank_name_is_400() {
    let (app, store) = common::build_test_app();

    let response = put_json(
        app,
        "/admin/products/p1",
        Some(&admin_token()),
        json!({"name": "   ", "price": 5000}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(stored_ids(&store).await.is_empty());
}

#[tokio::test]
async fn delete_removes_product_and_is_idempotent() {
    let (app, store) = common::build_test_app();
    let token = admin_token();
    post_json(app.clone(), "/admin/products", Some(&token), products_body(&["a", "b"])).await;

    let response = delete(app.clone(), "/admin/products/a", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete(app.clone(), "/admin/products/a", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(stored_ids(&store).await, BTreeSet::from(["b".to_string()]));

    let response = delete(app, "/admin/products/b", Some(&user_token())).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn replace_keeps_products_with_unusable_prices() {
    let (app, store) = common::build_test_app();

    let response = replace_catalog(
        app,
        Some(&admin_token()),
        json!({"products": [
            {"id": "1", "name": "Pagne", "price": "12 500"},
            {"id": "2", "name": "Bracelet", "price": "gratuit"}
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["written"], 2);
    assert_eq!(json["skipped"], json!([]));
    assert_eq!(json["price_defaulted"], json!([1]));

    assert_eq!(store.find_product("1").await.unwrap().unwrap().price, 12_500);
    assert_eq!(store.find_product("2").await.unwrap().unwrap().price, 0);
}

#[tokio::test]
async fn put_with_nul_character_is_400() {
    let (app, store) = common::build_test_app();

    let response = put_json(
        app,
        "/admin/products/p1",
        Some(&admin_token()),
        json!({"name": "Sac\u{0}", "price": 5000}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(stored_ids(&store).await.is_empty());
}
