//! HTTP clients for the two chat backends

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::ChatMessage;
use crate::core::prompt;

/// Chat-completion request body
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

/// Ollama `/api/chat` request body
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions client
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiBackend {
    /// Create a client for `base_url` (up to and including `/v1`)
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Translate `text` with a system instruction and a user message
    pub async fn translate(&self, model: &str, text: &str, target_lang: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TranslationError::MissingApiKey {
                backend: "OpenAI",
                variable: "OPENAI_API_KEY",
            })?;

        let body = CompletionRequest {
            model,
            messages: vec![
                ChatMessage::system(prompt::instruction(target_lang)),
                ChatMessage::user(text),
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {} (model {})", url, model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(TranslationError::from_transport)?;

        let json: CompletionResponse = read_json(response).await?;

        json.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "No translation in response".to_string(),
            })
    }
}

/// Ollama chat client
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    host: String,
}

impl OllamaBackend {
    /// Create a client for the server at `host`
    pub fn new(client: reqwest::Client, host: &str) -> Self {
        Self {
            client,
            host: host.trim_end_matches('/').to_string(),
        }
    }

    /// Translate `text` with a single templated user message
    pub async fn translate(&self, model: &str, text: &str, target_lang: &str) -> Result<String> {
        let body = OllamaChatRequest {
            model,
            messages: vec![ChatMessage::user(prompt::inline_prompt(text, target_lang))],
            stream: false,
        };

        let url = format!("{}/api/chat", self.host);
        debug!("POST {} (model {})", url, model);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(TranslationError::from_transport)?;

        let json: OllamaChatResponse = read_json(response).await?;

        json.message
            .content
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "No message content in response".to_string(),
            })
    }
}

/// Map non-2xx statuses to `ApiError` and decode the body otherwise
async fn read_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(TranslationError::ApiError {
            status: status.as_u16(),
            message: error_text,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(TranslationError::from_transport)?;

    serde_json::from_slice(&bytes).map_err(|e| TranslationError::InvalidResponseError {
        message: e.to_string(),
    })
}
