//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::catalog::DEFAULT_CATALOG_PATH;
use crate::core::errors::{Result, TranslationError};

/// Settings file looked up when none is given, extension resolved by `config`
pub const DEFAULT_SETTINGS_NAME: &str = "configs/translator";

/// Default OpenAI-compatible endpoint
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

const OLLAMA_DEFAULT_PORT: u16 = 11434;
const DEFAULT_TIMEOUT_MS: u64 = 120_000;
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// YAML file mapping engine labels to model identifiers
    pub catalog_path: PathBuf,
    /// Base URL of the OpenAI-compatible API, up to and including `/v1`
    pub openai_base_url: String,
    /// Base URL of the Ollama server
    pub ollama_host: String,
    /// Per-request timeout
    pub timeout_ms: u64,
    /// Upper bound on simultaneous backend requests within one comparison
    pub max_concurrent: usize,
    /// Bearer token for the OpenAI-compatible API, only ever read from the environment
    #[serde(skip)]
    pub openai_api_key: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            openai_api_key: None,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration: defaults, then the settings file, then `TRANSLATOR_*`
    /// variables, then the variables the official client libraries read.
    pub fn load(settings_file: Option<&Path>) -> Result<Self> {
        let mut config = Self::from_sources(settings_file)?;
        config.apply_env_overrides();
        config.validate()?;
        config.ollama_host = normalize_host(&config.ollama_host);

        info!(
            "Configuration loaded (catalog: {}, OpenAI: {}, Ollama: {})",
            config.catalog_path.display(),
            config.openai_base_url,
            config.ollama_host
        );
        if config.openai_api_key.is_none() {
            debug!("OPENAI_API_KEY is not set; OpenAI engines will report an error");
        }

        Ok(config)
    }

    /// Defaults layered with the settings file and `TRANSLATOR_*` variables
    fn from_sources(settings_file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default(
                "catalog_path",
                defaults.catalog_path.to_string_lossy().into_owned(),
            )?
            .set_default("openai_base_url", defaults.openai_base_url)?
            .set_default("ollama_host", defaults.ollama_host)?
            .set_default("timeout_ms", defaults.timeout_ms as i64)?
            .set_default("max_concurrent", defaults.max_concurrent as i64)?;

        let builder = match settings_file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_SETTINGS_NAME).required(false)),
        };

        let settings = builder
            .add_source(config::Environment::with_prefix("TRANSLATOR"))
            .build()?;

        Ok(settings.try_deserialize::<Self>()?)
    }

    fn apply_env_overrides(&mut self) {
        self.openai_api_key = non_empty_env("OPENAI_API_KEY");

        if let Some(url) = non_empty_env("OPENAI_BASE_URL") {
            self.openai_base_url = url;
        }

        if let Some(host) = non_empty_env("OLLAMA_HOST") {
            self.ollama_host = host;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.openai_base_url.trim().is_empty() {
            return Err(config_error("openai_base_url must not be empty"));
        }

        if self.ollama_host.trim().is_empty() {
            return Err(config_error("ollama_host must not be empty"));
        }

        if self.timeout_ms == 0 {
            return Err(config_error("timeout_ms must be greater than 0"));
        }

        if self.max_concurrent == 0 {
            return Err(config_error("max_concurrent must be greater than 0"));
        }

        Ok(())
    }

    /// Builder-style override for the catalog location
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }
}

/// Accept `host`, `host:port` and full URLs like the Ollama client does:
/// scheme defaults to http, port to 11434 (443 for https), no trailing slash
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let (scheme, rest) = host.split_once("://").unwrap_or(("http", host));
    let (authority, path) = match rest.find('/') {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    };

    // The colons inside a bracketed IPv6 literal are not a port separator
    let has_port = match authority.rfind(']') {
        Some(end) => authority[end..].contains(':'),
        None => authority.contains(':'),
    };
    if has_port {
        return format!("{}://{}{}", scheme, authority, path);
    }

    let port = if scheme == "https" { 443 } else { OLLAMA_DEFAULT_PORT };
    format!("{}://{}:{}{}", scheme, authority, port, path)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn config_error(message: &str) -> TranslationError {
    TranslationError::ConfigError {
        message: message.to_string(),
    }
}
