//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use chrono::DateTime;
use http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use tokengate_api::{AppState, build_app};
use tokengate_core::config::{AppConfig, BootstrapAdmin};
use tokengate_core::traits::ManualClock;

/// Caller address used when a test does not care which client it is.
pub const DEFAULT_CLIENT: &str = "198.51.100.1";

/// Bootstrap administrator credentials seeded by [`TestApp::with_admin`].
pub const ADMIN_EMAIL: &str = "root@example.com";
pub const ADMIN_PASSWORD: &str = "root-password";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct access to services and repositories
    pub state: AppState,
    /// Hand-driven time source shared by tokens and rate windows
    pub clock: ManualClock,
    next_client: AtomicU32,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application from an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let start = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        let clock = ManualClock::new(start);
        let state = AppState::new(config, Arc::new(clock.clone()));
        let router = build_app(state.clone());

        Self {
            router,
            state,
            clock,
            next_client: AtomicU32::new(1),
        }
    }

    /// Create a test application with the bootstrap administrator seeded
    pub async fn with_admin() -> Self {
        let app = Self::new();
        app.state
            .auth_service
            .ensure_bootstrap_admin(&BootstrapAdmin {
                email: ADMIN_EMAIL.to_string(),
                username: "root".to_string(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .await
            .expect("Failed to seed admin")
            .expect("Admin already present");
        app
    }

    /// A fresh caller address, so setup traffic never shares a rate window
    /// with the requests under test.
    pub fn fresh_client(&self) -> String {
        let n = self.next_client.fetch_add(1, Ordering::SeqCst);
        format!("10.0.{}.{}", n / 250, n % 250 + 1)
    }

    /// Move the shared clock forward
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Register a user and return its id
    pub async fn register(&self, email: &str, username: &str, password: &str, role: &str) -> String {
        let client = self.fresh_client();
        let response = self
            .request_as(
                &client,
                "POST",
                "/api/auth/register",
                Some(json!({
                    "email": email,
                    "username": username,
                    "password": password,
                    "role": role,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "register failed: {}",
            response.body
        );
        response.body["user_id"]
            .as_str()
            .expect("user_id in response")
            .to_string()
    }

    /// Log in and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let client = self.fresh_client();
        let response = self
            .request_as(
                &client,
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["access_token"]
            .as_str()
            .expect("access_token in response")
            .to_string()
    }

    /// Register a user with the given role and return `(user_id, token)`
    pub async fn user_with_role(&self, name: &str, role: &str) -> (String, String) {
        let email = format!("{name}@example.com");
        let id = self.register(&email, name, "password123", role).await;
        let token = self.login(&email, "password123").await;
        (id, token)
    }

    /// Log in as the bootstrap administrator
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Make a request from [`DEFAULT_CLIENT`]
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_as(DEFAULT_CLIENT, method, path, body, token)
            .await
    }

    /// Make a request from a specific caller address
    pub async fn request_as(
        &self,
        client: &str,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let auth = token.map(|t| format!("Bearer {t}"));
        self.send(client, method, path, body, auth.as_deref()).await
    }

    /// Make a request with a raw Authorization header value
    pub async fn send(
        &self,
        client: &str,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let headers: Vec<(&str, &str)> = authorization
            .map(|value| vec![("Authorization", value)])
            .unwrap_or_default();
        self.send_with_headers(client, method, path, body, &headers)
            .await
    }

    /// Make a request from the TCP peer `client` with extra headers
    pub async fn send_with_headers(
        &self,
        client: &str,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let peer: IpAddr = client.parse().expect("client must be an IP address");
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .extension(ConnectInfo(SocketAddr::new(peer, 40_000)));

        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as JSON (`Null` when empty)
    pub body: Value,
}

impl TestResponse {
    /// The machine-readable error code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// A header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Default configuration with a fixed signing secret
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}
