use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::json;
use tower::ServiceExt;
use vocab_api::{config::Environment, router, state::ApiState};
use vocab_srs::{Card, SchedulerConfig};

/// Test state builder backed by a private in-memory database
pub struct TestStateBuilder {
    scheduler: SchedulerConfig,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
        }
    }

    pub fn scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Build a test ApiState with a freshly migrated database
    pub async fn build(self) -> anyhow::Result<ApiState> {
        let pool = vocab_db::create_pool("sqlite::memory:", 1).await?;
        vocab_db::migrate(&pool).await?;

        Ok(ApiState::from_pool(
            pool,
            self.scheduler,
            Environment::Development,
        ))
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a state and a client over the bare router
pub async fn setup() -> (ApiState, TestClient) {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let client = TestClient::new(router::router().with_state(state.clone()));
    (state, client)
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a DELETE request
    pub async fn delete(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");
        self.post_raw(uri, json_body).await
    }

    /// Send a POST request with a raw JSON body
    pub async fn post_raw(&self, uri: &str, body: impl Into<String>) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.into()))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Create a card through the API
    pub async fn create_card(&self, word: &str, translation: &str) -> Card {
        let response = self
            .post_json(
                "/api/cards",
                &json!({ "word": word, "translation": translation }),
            )
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    /// Submit a review through the API
    pub async fn review(&self, card_id: i64, quality: i64) -> TestResponse {
        self.post_json(
            &format!("/api/review/{card_id}"),
            &json!({ "quality": quality }),
        )
        .await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Error message of a JSON error body
    pub fn error(&self) -> String {
        let body: serde_json::Value = self.json();
        body["error"]
            .as_str()
            .expect("Error body should have an 'error' string")
            .to_string()
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}
