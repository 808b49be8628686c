use super::{MockLlmClient, StubScorer};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use heal_assistant::{
    chat::ChatRelay,
    config::{ExchangeMode, LlmConfig, ScorerConfig},
    predict::Scorer,
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::{path::Path, sync::Arc};

pub const TEST_SYSTEM_PROMPT: &str = "You are a test health assistant.";

pub fn create_test_llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "llama-3.3-70b-versatile".to_string(),
        system_prompt: TEST_SYSTEM_PROMPT.to_string(),
        temperature: None,
        max_tokens: None,
    }
}

/// Scorer config that runs `script` through `sh -c` inside `dir`.
pub fn sh_scorer_config(dir: &Path, script: &str, exchange: ExchangeMode) -> ScorerConfig {
    ScorerConfig {
        command: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        working_dir: dir.to_path_buf(),
        exchange,
        ..ScorerConfig::default()
    }
}

pub fn create_state(llm: MockLlmClient, scorer: Arc<dyn Scorer>) -> AppState {
    let config = create_test_llm_config("");
    AppState {
        chat: Arc::new(ChatRelay::new(Arc::new(llm), &config)),
        scorer,
    }
}

pub fn create_test_app(llm: MockLlmClient, scorer: StubScorer) -> Router {
    server::router(create_state(llm, Arc::new(scorer)), "*").unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
