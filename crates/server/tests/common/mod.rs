//! Common test utilities for API testing.
//!
//! Builds the full router in-process over a fresh in-memory ticket store, so
//! each test starts with an empty queue and ids counting from 1.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use triage_core::{AgentsConfig, Config, PriorityWeights};
use triage_server::{api::create_router, state::AppState};

/// Test fixture wrapping an in-process server.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_ticket_creation() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/tickets", json!({
///         "product_name": "Mouse",
///         "severity": 3
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state, for inspecting the store directly
    pub state: Arc<AppState>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when empty or not JSON
    pub body: Value,
    /// Raw body text
    pub text: String,
}

/// Test configuration options
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Override the agent roster (None keeps the default roster)
    pub roster: Option<Vec<String>>,
    /// Override the priority weights
    pub weights: Option<PriorityWeights>,
}

impl TestFixture {
    /// Create a fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let mut config = Config::default();
        if let Some(roster) = test_config.roster {
            config.agents = AgentsConfig { roster };
        }
        if let Some(weights) = test_config.weights {
            config.triage = weights;
        }

        let state = Arc::new(AppState::from_config(config));
        let router = create_router(Arc::clone(&state));

        Self { router, state }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Create a ticket with an explicit severity and return its id.
    pub async fn create_ticket(&self, product: &str, severity: i64) -> u64 {
        let response = self
            .post(
                "/api/v1/tickets",
                serde_json::json!({ "product_name": product, "severity": severity }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.body["id"].as_u64().expect("ticket id")
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

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

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Assert a response status, printing the body on mismatch.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
