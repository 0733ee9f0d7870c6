//! Integration tests for role and scope enforcement on protected routes.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

fn widget() -> Value {
    json!({ "name": "Widget", "description": "A useful widget", "price": 9.99 })
}

async fn create_product(app: &TestApp, token: &str) -> String {
    let client = app.fresh_client();
    let response = app
        .request_as(&client, "POST", "/api/products", Some(widget()), Some(token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_user_can_write_but_not_delete() {
    let app = TestApp::new();
    let (user_id, token) = app.user_with_role("alice", "user").await;

    let response = app
        .request("POST", "/api/products", Some(widget()), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], "Widget");
    assert_eq!(response.body["created_by"], user_id.as_str());
    let id = response.body["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/products/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["price"], 9.99);

    let response = app
        .request(
            "PUT",
            &format!("/api/products/{id}"),
            Some(json!({ "name": "Gadget", "description": "Renamed", "price": 12.5 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Gadget");
    assert_eq!(response.body["id"], id.as_str());

    let response = app
        .request("DELETE", &format!("/api/products/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "SCOPE_MISSING");
    assert_eq!(
        response.body["message"],
        "Insufficient permissions. Required scope: delete"
    );

    let response = app.request("GET", "/api/products", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_guest_is_read_only() {
    let app = TestApp::new();
    let (_, user) = app.user_with_role("bob", "user").await;
    let (_, guest) = app.user_with_role("carol", "guest").await;
    let id = create_product(&app, &user).await;

    let response = app.request("GET", "/api/products", None, Some(&guest)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/products/{id}"), None, Some(&guest))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/api/products", Some(widget()), Some(&guest))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "SCOPE_MISSING");

    let response = app
        .request("PUT", &format!("/api/products/{id}"), Some(widget()), Some(&guest))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "SCOPE_MISSING");
}

#[tokio::test]
async fn test_authorization_runs_before_field_rules() {
    let app = TestApp::new();
    let (_, guest) = app.user_with_role("dave", "guest").await;
    let (_, user) = app.user_with_role("erin", "user").await;
    let invalid = json!({ "name": "x", "description": "", "price": -1.0 });

    let response = app
        .request("POST", "/api/products", Some(invalid.clone()), Some(&guest))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("POST", "/api/products", Some(invalid), Some(&user))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_and_malformed_product_ids() {
    let app = TestApp::new();
    let (_, token) = app.user_with_role("frank", "user").await;

    for path in [
        "/api/products/7d9f5c1e-2b8a-4c3e-9f1d-0a6b5e4c3d2f",
        "/api/products/not-a-uuid",
    ] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.error_code(), "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let app = TestApp::with_admin().await;
    let (_, user) = app.user_with_role("grace", "user").await;
    let (_, guest) = app.user_with_role("heidi", "guest").await;

    for token in [&user, &guest] {
        let response = app.request("GET", "/api/admin/users", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.error_code(), "ROLE_MISMATCH");
        assert_eq!(
            response.body["message"],
            "Insufficient permissions. Required role: admin"
        );
    }

    let admin = app.admin_token().await;
    let response = app.request("GET", "/api/admin/users", None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    let users = response.body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    assert!(users.iter().any(|u| u["role"] == "admin"));
}

#[tokio::test]
async fn test_admin_can_delete_products_and_users() {
    let app = TestApp::with_admin().await;
    let admin = app.admin_token().await;
    let (user_id, user) = app.user_with_role("ivan", "user").await;
    let product = create_product(&app, &user).await;

    let response = app
        .request("DELETE", &format!("/api/products/{product}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/products/{product}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let path = format!("/api/admin/users/{user_id}");
    let response = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_elevation_applies_to_new_tokens_only() {
    let app = TestApp::with_admin().await;
    let admin = app.admin_token().await;
    let (id, stale) = app.user_with_role("judy", "user").await;

    let response = app
        .request("POST", &format!("/api/admin/elevate/{id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User elevated to admin");
    assert_eq!(response.body["user_id"], id.as_str());

    let response = app.request("GET", "/api/admin/users", None, Some(&stale)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "ROLE_MISMATCH");

    let response = app
        .request("POST", &format!("/api/admin/elevate/{id}"), None, Some(&stale))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "SCOPE_MISSING");

    let response = app.request("GET", "/api/me", None, Some(&stale)).await;
    assert_eq!(response.body["role"], "user");

    let fresh = app.login("judy@example.com", "password123").await;
    let response = app.request("GET", "/api/me", None, Some(&fresh)).await;
    assert_eq!(response.body["role"], "admin");
    assert_eq!(
        response.body["scopes"],
        json!(["read", "write", "delete", "admin"])
    );

    let response = app.request("GET", "/api/admin/users", None, Some(&fresh)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_elevating_unknown_user_is_not_found() {
    let app = TestApp::with_admin().await;
    let admin = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/admin/elevate/7d9f5c1e-2b8a-4c3e-9f1d-0a6b5e4c3d2f",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
