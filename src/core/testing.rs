//! Stub backends for tests: real axum servers on an ephemeral port

use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::config::TranslatorConfig;

/// Requests seen by a stub, as `{"authorization": .., "body": ..}`
pub(crate) type Recorded = Arc<Mutex<Vec<Value>>>;

/// Serve `router` on 127.0.0.1 and return its base URL
pub(crate) async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Config pointing both backends at `base`
pub(crate) fn stub_config(base: &str) -> TranslatorConfig {
    TranslatorConfig {
        openai_base_url: format!("{}/v1", base),
        ollama_host: base.to_string(),
        openai_api_key: Some("sk-test".to_string()),
        timeout_ms: 5_000,
        ..Default::default()
    }
}

fn record(recorded: &Recorded, headers: &HeaderMap, body: Value) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    recorded
        .lock()
        .unwrap()
        .push(json!({ "authorization": authorization, "body": body }));
}

/// Both backends answer every request with `content`
pub(crate) fn fixed_reply(content: &str) -> (Router, Recorded) {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let openai_seen = recorded.clone();
    let ollama_seen = recorded.clone();
    let openai_content = content.to_string();
    let ollama_content = content.to_string();

    let router = Router::new()
        .route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = openai_seen.clone();
                let content = openai_content.clone();
                async move {
                    record(&seen, &headers, body);
                    Json(json!({
                        "id": "chatcmpl-test",
                        "object": "chat.completion",
                        "choices": [{
                            "index": 0,
                            "message": { "role": "assistant", "content": content },
                            "finish_reason": "stop"
                        }]
                    }))
                }
            }),
        )
        .route(
            "/api/chat",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = ollama_seen.clone();
                let content = ollama_content.clone();
                async move {
                    record(&seen, &headers, body);
                    Json(json!({
                        "model": "stub",
                        "message": { "role": "assistant", "content": content },
                        "done": true
                    }))
                }
            }),
        );

    (router, recorded)
}

/// Delay in milliseconds encoded in a model name such as `sleep-300`
fn delay_for(model: &str) -> u64 {
    model
        .strip_prefix("sleep-")
        .and_then(|ms| ms.parse().ok())
        .unwrap_or(0)
}

/// Both backends answer `"<model> says hi"` after the delay named by the model
pub(crate) fn echo_model() -> Router {
    async fn openai(Json(body): Json<Value>) -> Json<Value> {
        let model = body["model"].as_str().unwrap_or_default().to_string();
        tokio::time::sleep(Duration::from_millis(delay_for(&model))).await;
        Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": format!("{} says hi", model) } }]
        }))
    }

    async fn ollama(Json(body): Json<Value>) -> Json<Value> {
        let model = body["model"].as_str().unwrap_or_default().to_string();
        tokio::time::sleep(Duration::from_millis(delay_for(&model))).await;
        Json(json!({
            "message": { "role": "assistant", "content": format!("{} says hi", model) }
        }))
    }

    Router::new()
        .route("/v1/chat/completions", post(openai))
        .route("/api/chat", post(ollama))
}

/// Both backends fail with `status` and `message`
pub(crate) fn failing(status: StatusCode, message: &'static str) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(move || async move { (status, message) }))
        .route("/api/chat", post(move || async move { (status, message) }))
}

/// Both backends answer 200 with a body lacking the message
pub(crate) fn malformed() -> Router {
    async fn reply() -> Json<Value> {
        Json(json!({ "unexpected": true }))
    }

    Router::new()
        .route("/v1/chat/completions", post(reply))
        .route("/api/chat", post(reply))
}
