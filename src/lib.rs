//! LLM Compare Translator - side-by-side translation across LLM engines
//!
//! Engines are configured as `Backend/ModelName` labels mapped to model
//! identifiers; each translation is dispatched to an OpenAI-compatible or an
//! Ollama-compatible backend and always yields a display string.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use core::{
    catalog::EngineCatalog,
    client::{Translator, ENTER_TEXT_PROMPT, ERROR_PREFIX, NO_ENGINE_SELECTED},
    config::TranslatorConfig,
    errors::TranslationError,
    models::{Backend, EngineTranslation, TranslationRequest},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
