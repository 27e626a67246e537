//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote inference backend implied by an engine label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    /// OpenAI-compatible chat completions API
    #[serde(rename = "OpenAI")]
    OpenAi,
    /// Ollama-compatible chat API
    Ollama,
    /// Prefix that matches no supported backend
    #[serde(rename = "unrecognized")]
    Unrecognized,
}

impl Backend {
    /// Derive the backend from the part of `label` before the first `/`
    pub fn from_label(label: &str) -> Self {
        match label.split('/').next().unwrap_or(label) {
            "OpenAI" => Backend::OpenAi,
            "Ollama" => Backend::Ollama,
            _ => Backend::Unrecognized,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::OpenAi => write!(f, "OpenAI"),
            Backend::Ollama => write!(f, "Ollama"),
            Backend::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Source text
    pub text: String,
    /// Engine label, `Backend/ModelName`
    pub engine: String,
    /// Target language name, e.g. `Japanese`
    pub target_lang: String,
}

impl TranslationRequest {
    /// Build a request for one engine
    pub fn new(
        text: impl Into<String>,
        engine: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            engine: engine.into(),
            target_lang: target_lang.into(),
        }
    }

    /// Backend this request will be dispatched to
    pub fn backend(&self) -> Backend {
        Backend::from_label(&self.engine)
    }
}

/// Display string produced for one engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineTranslation {
    /// Engine label the result belongs to
    pub engine: String,
    /// Translation, guidance or error message
    pub translation: String,
}

/// Chat message shared by both wire formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`
    pub role: String,
    /// Message body
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}
