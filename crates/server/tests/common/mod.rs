//! Common test utilities for API testing.
//!
//! This module provides a test fixture that drives the router in-process
//! against a SQLite store in a temporary directory.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use queuedesk_core::{
    create_authenticator, load_config_from_str, QueueService, SqliteQueueStore, WaitEstimator,
};
use queuedesk_server::{create_router, AppState};

/// Admin key used when the fixture runs with API key auth.
pub const ADMIN_KEY: &str = "test-admin-key";

/// Test fixture for API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_ticket_creation() {
///     let fixture = TestFixture::new();
///     let service_id = fixture.create_service("Counter A").await;
///
///     let response = fixture.post("/api/tickets", json!({ "service_id": service_id })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Temporary directory holding the test database
    pub temp_dir: TempDir,
    /// Key sent on admin requests, if auth is enabled
    admin_key: Option<&'static str>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Fixture without authentication.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let auth = if test_config.require_api_key {
            format!("method = \"api_key\"\napi_key = \"{ADMIN_KEY}\"")
        } else {
            "method = \"none\"".to_string()
        };
        let config = load_config_from_str(&format!(
            r#"
[auth]
{auth}

[server]
host = "127.0.0.1"
port = 8080
static_dir = "{static_dir}"

[database]
path = "{db_path}"

[queue]
minutes_per_position = {minutes:?}
"#,
            static_dir = temp_dir.path().join("static").display(),
            db_path = db_path.display(),
            minutes = test_config.minutes_per_position,
        ))
        .expect("Invalid test config");

        let authenticator =
            create_authenticator(&config.auth).expect("Failed to create authenticator");
        let store =
            Arc::new(SqliteQueueStore::new(&db_path).expect("Failed to create queue store"));
        let queue = QueueService::new(
            store.clone(),
            store,
            WaitEstimator::new(config.queue.minutes_per_position),
        );

        let state = Arc::new(AppState::new(config, authenticator, queue));
        let router = create_router(state);

        Self {
            router,
            temp_dir,
            admin_key: test_config.require_api_key.then_some(ADMIN_KEY),
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None, None).await
    }

    /// Send a POST request carrying the admin key (if any).
    pub async fn admin_post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), self.admin_key).await
    }

    /// Send a DELETE request carrying the admin key (if any).
    pub async fn admin_delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None, self.admin_key).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Create a service through the API and return its id.
    pub async fn create_service(&self, name: &str) -> i64 {
        let response = self.admin_post("/api/services", json!({ "name": name })).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().expect("service id")
    }

    /// Take a ticket through the API and return the response body.
    pub async fn create_ticket(&self, service_id: i64) -> Value {
        let response = self
            .post("/api/tickets", json!({ "service_id": service_id }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        api_key: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(key) = api_key {
            request_builder = request_builder.header("X-API-Key", key);
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into()))
        };

        TestResponse { status, body }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Protect admin routes with [`ADMIN_KEY`]
    pub require_api_key: bool,
    pub minutes_per_position: f64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            require_api_key: false,
            minutes_per_position: 5.0,
        }
    }
}

impl TestConfig {
    pub fn with_api_key() -> Self {
        Self {
            require_api_key: true,
            ..Self::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
