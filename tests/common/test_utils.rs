use super::MockLlmClient;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use molecule_assistant::{
    assistant::Assistant,
    config::{Config, LlmConfig, LlmProvider, LogsConfig, ServerConfig},
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

pub const FRONTEND_HTML: &str = "<html><body>Molecule Editor</body></html>";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            static_dir: "static".to_string(),
            frontend_file: "User_Interface.html".to_string(),
        },
        llm: LlmConfig {
            provider: LlmProvider::Gemini,
            base_url: String::new(),
            api_key: Some("test-api-key".to_string()),
            model: "gemini-1.5-flash".to_string(),
            temperature: None,
        },
    }
}

/// Create a temporary static folder holding a frontend page
pub fn create_static_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("User_Interface.html"), FRONTEND_HTML).unwrap();
    std::fs::write(dir.path().join("app.css"), "body { color: black; }").unwrap();
    dir
}

/// Router backed by the given mock client
pub fn create_test_app(mock: MockLlmClient) -> (Router, TempDir) {
    let static_dir = create_static_dir();
    let state = AppState {
        assistant: Some(Arc::new(Assistant::new(Arc::new(mock), None))),
        static_dir: static_dir.path().to_path_buf(),
        frontend_file: "User_Interface.html".to_string(),
    };
    (server::router(state), static_dir)
}

/// Router for a server started without an API key
pub fn create_unconfigured_app() -> (Router, TempDir) {
    let static_dir = create_static_dir();
    let mut config = create_test_config();
    config.llm.api_key = None;
    config.server.static_dir = static_dir.path().to_string_lossy().to_string();

    let state = AppState::from_config(&config);
    assert!(state.assistant.is_none());
    (server::router(state), static_dir)
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sends a request and decodes the JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Sends a request and returns the raw body text
pub async fn send_text(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}
