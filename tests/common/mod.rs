#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use gemini_relay::{
    build_app,
    config::{AppConfig, GeminiConfig},
    AppState,
};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-2.0-flash";

pub const RAYLEIGH_BODY: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"Because of Rayleigh scattering."}]}}]}"#;

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub action: String,
    pub key: Option<String>,
    pub body: serde_json::Value,
}

pub struct MockUpstream {
    status: StatusCode,
    body: String,
    calls: AtomicUsize,
    recorded: Mutex<Vec<RecordedCall>>,
}

impl MockUpstream {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn last_prompt_text(&self) -> Option<String> {
        let calls = self.recorded();
        let text = calls.last()?.body["contents"][0]["parts"][0]["text"].as_str()?;
        Some(text.to_string())
    }
}

async fn generate_content(
    State(mock): State<Arc<MockUpstream>>,
    Path(action): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> impl IntoResponse {
    mock.calls.fetch_add(1, Ordering::SeqCst);
    mock.recorded.lock().unwrap().push(RecordedCall {
        action,
        key: query.get("key").cloned(),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.body.clone(),
    )
}

/// Starts a fake Gemini API and returns its `/v1beta` base URL.
pub async fn spawn_mock_gemini(status: StatusCode, body: &str) -> (String, Arc<MockUpstream>) {
    let mock = Arc::new(MockUpstream {
        status,
        body: body.to_string(),
        calls: AtomicUsize::new(0),
        recorded: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/v1beta/models/{action}", post(generate_content))
        .with_state(mock.clone());
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1beta", addr), mock)
}

pub fn test_config(api_base: &str, system_instruction: Option<&str>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        gemini: GeminiConfig::new(TEST_API_KEY, api_base, TEST_MODEL),
        system_instruction: system_instruction.map(str::to_string),
    }
}

pub fn build_test_app(api_base: &str, system_instruction: Option<&str>) -> Router {
    build_app(Arc::new(AppState::from_config(&test_config(
        api_base,
        system_instruction,
    ))))
}
