//! HTTP-level tests: JSON → router → services → in-memory stores → JSON.

mod storage_harness;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use estyle::config::AppConfig;
use estyle::core::donation::DonationRequest;
use estyle::core::item::Item;
use estyle::core::user::User;
use estyle::server::ServerBuilder;
use estyle::storage::InMemoryTableStore;
use serde_json::{Value, json};
use storage_harness::sample_catalog;

fn make_server_with(config: AppConfig) -> TestServer {
    let router = ServerBuilder::new()
        .with_config(config)
        .with_catalog_store(InMemoryTableStore::<Item>::with_rows(sample_catalog()))
        .with_user_store(InMemoryTableStore::<User>::new())
        .with_donation_store(InMemoryTableStore::<DonationRequest>::new())
        .build()
        .unwrap();
    TestServer::new(router)
}

fn make_server() -> TestServer {
    make_server_with(AppConfig::default_config())
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

/// Sign up and log in `username`; returns the session token
async fn login_as(server: &TestServer, username: &str) -> String {
    server
        .post("/signup")
        .json(&json!({
            "username": username,
            "password": "pw",
            "email": format!("{}@example.com", username)
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/login")
        .json(&json!({ "identifier": username, "password": "pw" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"].as_str().unwrap().to_string()
}

fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = make_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "e-style");
}

// =============================================================================
// Catalog browsing
// =============================================================================

#[tokio::test]
async fn test_list_items_unfiltered() {
    let server = make_server();
    let response = server.get("/items").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(body["pagination"]["total"], 6);
    assert_eq!(body["pagination"]["limit"], 24);
    assert_eq!(body["grid"], json!([[1, 4], [2, 5], [3, 6]]));
}

#[tokio::test]
async fn test_price_and_brand_filters() {
    let server = make_server();
    let response = server
        .get("/items")
        .add_query_param("min_price", "0")
        .add_query_param("max_price", "1000")
        .add_query_param("brand", "Zara")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(ids(&body), vec![1, 5]);
}

#[tokio::test]
async fn test_colour_alias_and_sort() {
    let server = make_server();
    let response = server
        .get("/items")
        .add_query_param("color", "Red")
        .add_query_param("sort", "price:desc")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(ids(&body), vec![6, 1]);
}

#[tokio::test]
async fn test_text_search_modes() {
    let server = make_server();

    let by_fields: Value = server
        .get("/items")
        .add_query_param("q", "DRESS")
        .await
        .json();
    assert_eq!(ids(&by_fields), vec![1]);

    // Prices are only searchable in whole-row mode
    let by_fields: Value = server
        .get("/items")
        .add_query_param("q", "1500")
        .await
        .json();
    assert!(ids(&by_fields).is_empty());

    let by_row: Value = server
        .get("/items")
        .add_query_param("q", "1500")
        .add_query_param("search", "row")
        .await
        .json();
    assert_eq!(ids(&by_row), vec![2]);
}

#[tokio::test]
async fn test_pagination_and_grid() {
    let server = make_server();
    let response = server
        .get("/items")
        .add_query_param("page", "2")
        .add_query_param("limit", "4")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(ids(&body), vec![5, 6]);
    assert_eq!(body["grid"], json!([[5], [6], []]));
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["pagination"]["has_prev"], true);
    assert_eq!(body["pagination"]["has_next"], false);
}

#[tokio::test]
async fn test_configured_grid_and_search() {
    let mut config = AppConfig::default_config();
    config.catalog.grid_columns = 2;
    config.catalog.search_mode = "row".to_string();
    let server = make_server_with(config);

    let body: Value = server
        .get("/items")
        .add_query_param("q", "9000")
        .await
        .json();
    assert_eq!(ids(&body), vec![3]);
    assert_eq!(body["grid"], json!([[3], []]));
}

#[tokio::test]
async fn test_invalid_query_is_400() {
    let server = make_server();
    let response = server
        .get("/items")
        .add_query_param("sort", "weight")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_get_item() {
    let server = make_server();

    let response = server.get("/items/3").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Evening gown");
    assert_eq!(body["status"], "available");

    let response = server.get("/items/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn test_non_finite_price_is_400() {
    let server = make_server();
    let response = server
        .get("/items")
        .add_query_param("min_price", "NaN")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_non_numeric_item_id_is_400() {
    let server = make_server();

    let response = server.get("/items/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_PATH");

    let token = login_as(&server, "alice").await;
    let response = server
        .post("/items/abc/rent")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_PATH");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_signup_conflicts() {
    let server = make_server();
    login_as(&server, "alice").await;

    let response = server
        .post("/signup")
        .json(&json!({ "username": "alice", "password": "x" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["details"]["field"], "username");

    let response = server
        .post("/signup")
        .json(&json!({ "username": "alicia", "password": "x", "email": "alice@example.com" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["details"]["field"], "email");
}

#[tokio::test]
async fn test_signup_requires_fields() {
    let server = make_server();

    let response = server
        .post("/signup")
        .json(&json!({ "username": "  ", "password": "x" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.post("/signup").json(&json!({ "password": "x" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_login_failures_are_401() {
    let server = make_server();
    login_as(&server, "alice").await;

    let response = server
        .post("/login")
        .json(&json!({ "identifier": "alice", "password": "wrong" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/login")
        .json(&json!({ "identifier": "nobody", "password": "pw" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_email_and_me() {
    let server = make_server();
    login_as(&server, "alice").await;

    let response = server
        .post("/login")
        .json(&json!({ "username": "alice@example.com", "password": "pw" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    let token = body["token"].as_str().unwrap();

    let response = server
        .get("/me")
        .add_header(header::AUTHORIZATION, bearer(token))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "username": "alice", "email": "alice@example.com" }));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = make_server();
    let token = login_as(&server, "alice").await;

    server
        .post("/logout")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .get("/me")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_protected_routes_need_session() {
    let server = make_server();

    server.get("/me").await.assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/items/1/rent")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/donations")
        .add_header(header::AUTHORIZATION, bearer(&uuid::Uuid::new_v4().to_string()))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Listing and renting
// =============================================================================

#[tokio::test]
async fn test_list_and_rent_item() {
    let server = make_server();
    let token = login_as(&server, "alice").await;

    let response = server
        .post("/items")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({
            "name": "Party dress",
            "brand": "Zara",
            "color": "Gold",
            "price": 750
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["id"], 7);
    assert_eq!(body["owner"], "alice");
    assert_eq!(body["colour"], "Gold");

    let response = server
        .post("/items/7/rent")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "rented");

    let response = server
        .post("/items/7/rent")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "ITEM_NOT_AVAILABLE");
    assert_eq!(body["details"]["status"], "rented");
}

#[tokio::test]
async fn test_invalid_item_is_400() {
    let server = make_server();
    let token = login_as(&server, "alice").await;

    let response = server
        .post("/items")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "name": "Bad", "brand": "X", "colour": "Y", "price": -1 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_ITEM");
}

// =============================================================================
// Donations
// =============================================================================

#[tokio::test]
async fn test_donations_are_private() {
    let server = make_server();
    let alice = login_as(&server, "alice").await;
    let bob = login_as(&server, "bob").await;

    let response = server
        .post("/donations")
        .add_header(header::AUTHORIZATION, bearer(&alice))
        .json(&json!({ "description": "Winter coats", "quantity": 3 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["quantity"], 3);

    let mine: Value = server
        .get("/donations")
        .add_header(header::AUTHORIZATION, bearer(&alice))
        .await
        .json();
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let theirs: Value = server
        .get("/donations")
        .add_header(header::AUTHORIZATION, bearer(&bob))
        .await
        .json();
    assert!(theirs.as_array().unwrap().is_empty());

    let response = server
        .post("/donations")
        .add_header(header::AUTHORIZATION, bearer(&bob))
        .json(&json!({ "description": "socks", "quantity": 0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_DONATION");
}
