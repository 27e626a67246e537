//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::core::client::Translator;
use crate::core::languages::{DEFAULT_TARGET_LANGUAGE, TARGET_LANGUAGES};
use crate::core::models::{Backend, EngineTranslation};

/// Application state
#[derive(Clone)]
pub struct AppState {
    translator: Arc<Translator>,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Engines list response
#[derive(Serialize)]
struct EnginesResponse {
    engines: Vec<EngineInfo>,
}

#[derive(Serialize)]
struct EngineInfo {
    label: String,
    backend: Backend,
    model: String,
}

#[derive(Serialize)]
struct LanguagesResponse {
    languages: Vec<&'static str>,
}

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

/// Single-engine translation request
#[derive(Deserialize)]
pub struct TranslateRequest {
    /// Source text
    #[serde(default)]
    pub text: String,
    /// Engine label
    #[serde(default)]
    pub engine: String,
    /// Target language name
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

/// Multi-engine comparison request
#[derive(Deserialize)]
pub struct CompareRequest {
    /// Source text
    #[serde(default)]
    pub text: String,
    /// Engine labels, in display order
    #[serde(default)]
    pub engines: Vec<String>,
    /// Target language name
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

/// Comparison response
#[derive(Serialize)]
pub struct CompareResponse {
    /// One entry per distinct requested engine
    pub results: Vec<EngineTranslation>,
}

/// Browser front end
async fn index() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        include_str!("index.html"),
    )
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Get engines handler
async fn get_engines(State(state): State<AppState>) -> Json<EnginesResponse> {
    let engines = state
        .translator
        .catalog()
        .entries()
        .map(|(label, model)| EngineInfo {
            label: label.to_string(),
            backend: Backend::from_label(label),
            model: model.to_string(),
        })
        .collect();

    Json(EnginesResponse { engines })
}

async fn get_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: TARGET_LANGUAGES.to_vec(),
    })
}

/// Translation handler; failures are part of the returned text
async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Json<EngineTranslation> {
    let translation = state
        .translator
        .translate(&payload.text, &payload.engine, &payload.target_language)
        .await;

    Json(EngineTranslation {
        engine: payload.engine,
        translation,
    })
}

async fn compare(
    State(state): State<AppState>,
    Json(payload): Json<CompareRequest>,
) -> Json<CompareResponse> {
    let results = state
        .translator
        .compare(&payload.text, &payload.engines, &payload.target_language)
        .await;

    Json(CompareResponse { results })
}

/// Build the application router
pub fn router(translator: Arc<Translator>) -> Router {
    let state = AppState { translator };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/engines", get(get_engines))
        .route("/api/languages", get(get_languages))
        .route("/api/translate", post(translate))
        .route("/api/compare", post(compare))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16, translator: Arc<Translator>) -> anyhow::Result<()> {
    let app = router(translator);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
