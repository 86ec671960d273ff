//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock collaborators injected, so the HTTP surface can be exercised
//! without model access or network.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use reelsmith_core::{
    testing::{MockDiscovery, MockPromptGenerator, MockPublisher, MockRenderer},
    AgentConfig, AuditLog, AutomationAgent, Config, Discovery, PromptGenerator, Publisher,
    Renderer, SqliteAuditLog,
};
use reelsmith_server::state::AppState;

/// Re-export fixtures for test convenience
pub use reelsmith_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Discovery, prompt generation, rendering and publishing are mocks; the
/// run log is a real SQLite database in a temporary directory.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_run() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/agent/run", json!({ "limit": 2 })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock discovery - configure trending candidates
    pub discovery: Arc<MockDiscovery>,
    /// Mock prompt generator
    pub prompts: Arc<MockPromptGenerator>,
    /// Mock renderer - script render outcomes
    pub renderer: Arc<MockRenderer>,
    /// Mock publisher
    pub publisher: Arc<MockPublisher>,
    /// Run log backing the audit endpoints
    pub audit: Arc<SqliteAuditLog>,
    /// Agent shared with the router
    pub agent: Arc<AutomationAgent>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a fixture with five trending candidates.
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    /// Create a fixture with custom configuration.
    pub async fn with_config(mut config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        config.database.path = db_path.clone();
        if config.agent.stage_timeout_secs == AgentConfig::default().stage_timeout_secs {
            config.agent.stage_timeout_secs = 10;
        }

        let discovery = Arc::new(MockDiscovery::with_candidates(fixtures::candidates(5)));
        let prompts = Arc::new(MockPromptGenerator::new());
        let renderer = Arc::new(MockRenderer::new());
        let publisher = Arc::new(MockPublisher::new());
        let audit = Arc::new(SqliteAuditLog::new(&db_path).expect("Failed to open run log"));

        let agent = Arc::new(AutomationAgent::new(
            config.agent.clone(),
            Arc::clone(&discovery) as Arc<dyn Discovery>,
            Arc::clone(&prompts) as Arc<dyn PromptGenerator>,
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            Arc::clone(&publisher) as Arc<dyn Publisher>,
            Arc::clone(&audit) as Arc<dyn AuditLog>,
        ));

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&agent),
            Arc::clone(&discovery) as Arc<dyn Discovery>,
            Arc::clone(&audit) as Arc<dyn AuditLog>,
        ));

        let router = reelsmith_server::api::create_router(state);

        Self {
            router,
            discovery,
            prompts,
            renderer,
            publisher,
            audit,
            agent,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
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

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
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

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
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
