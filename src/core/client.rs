//! Translation dispatcher: one engine label in, one display string out

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::core::backends::{OllamaBackend, OpenAiBackend};
use crate::core::catalog::EngineCatalog;
use crate::core::config::TranslatorConfig;
use crate::core::errors::Result;
use crate::core::languages;
use crate::core::models::{Backend, EngineTranslation, TranslationRequest};

/// Returned in place of a translation when the input is blank
pub const ENTER_TEXT_PROMPT: &str = "Please enter or paste the text to be translated.";

/// Returned when the engine label names no supported backend
pub const NO_ENGINE_SELECTED: &str = "No translation engine selected.";

/// Prefix of every failure shown to the user
pub const ERROR_PREFIX: &str = "Error occurred during translation: ";

/// Dispatches translation requests to the backend implied by the engine label
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<EngineCatalog>,
    config: Arc<TranslatorConfig>,
    openai: OpenAiBackend,
    ollama: OllamaBackend,
    semaphore: Arc<Semaphore>,
}

impl Translator {
    /// Create a translator over an already loaded catalog
    pub fn new(config: TranslatorConfig, catalog: EngineCatalog) -> Result<Self> {
        config.validate()?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        let openai = OpenAiBackend::new(
            client.clone(),
            &config.openai_base_url,
            config.openai_api_key.clone(),
        );
        let ollama = OllamaBackend::new(client, &config.ollama_host);
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent));

        Ok(Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            openai,
            ollama,
            semaphore,
        })
    }

    /// Load the catalog named by `config` and create a translator.
    ///
    /// A missing or malformed catalog is a `ConfigError`.
    pub fn from_config(config: TranslatorConfig) -> Result<Self> {
        let catalog = EngineCatalog::load(&config.catalog_path)?;
        Self::new(config, catalog)
    }

    /// Engine catalog
    pub fn catalog(&self) -> &EngineCatalog {
        &self.catalog
    }

    /// Active configuration
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate `text` with `engine` into `target_lang`.
    ///
    /// Never fails: guidance, placeholder and error messages come back as the
    /// display string itself.
    pub async fn translate(&self, text: &str, engine: &str, target_lang: &str) -> String {
        self.translate_request(&TranslationRequest::new(text, engine, target_lang))
            .await
    }

    /// Same as [`Translator::translate`], for a prepared request
    pub async fn translate_request(&self, request: &TranslationRequest) -> String {
        match self.try_translate(request).await {
            Ok(translation) => translation,
            Err(e) => {
                warn!("Translation with {} failed: {}", request.engine, e);
                format!("{}{}", ERROR_PREFIX, e)
            }
        }
    }

    /// Structured form of [`Translator::translate_request`]
    pub async fn try_translate(&self, request: &TranslationRequest) -> Result<String> {
        if request.text.trim().is_empty() {
            return Ok(ENTER_TEXT_PROMPT.to_string());
        }

        let backend = request.backend();
        if backend == Backend::Unrecognized {
            debug!("No backend for engine label {:?}", request.engine);
            return Ok(NO_ENGINE_SELECTED.to_string());
        }

        let model = self.catalog.model_id(&request.engine)?;

        if !languages::is_listed(&request.target_lang) {
            warn!("Target language {:?} is not in the offered list", request.target_lang);
        }

        info!(
            "Translating {} chars with {} ({}) into {}",
            request.text.chars().count(),
            request.engine,
            model,
            request.target_lang
        );
        let start = Instant::now();

        let translation = match backend {
            Backend::OpenAi => {
                self.openai
                    .translate(model, &request.text, &request.target_lang)
                    .await?
            }
            Backend::Ollama => {
                self.ollama
                    .translate(model, &request.text, &request.target_lang)
                    .await?
            }
            Backend::Unrecognized => return Ok(NO_ENGINE_SELECTED.to_string()),
        };

        debug!("{} answered in {:?}", request.engine, start.elapsed());
        Ok(translation)
    }

    /// Translate `text` with every engine in `engines`, concurrently.
    ///
    /// Results follow the order of `engines`, each paired with its own label;
    /// a repeated label is translated once.
    pub async fn compare(
        &self,
        text: &str,
        engines: &[String],
        target_lang: &str,
    ) -> Vec<EngineTranslation> {
        let mut seen = HashSet::new();
        let engines: Vec<&String> = engines
            .iter()
            .filter(|engine| seen.insert(engine.as_str()))
            .collect();

        info!("Comparing {} engines", engines.len());

        let handles: Vec<_> = engines
            .iter()
            .map(|engine| {
                let translator = self.clone();
                let request = TranslationRequest::new(text, engine.as_str(), target_lang);
                tokio::spawn(async move {
                    // The semaphore is never closed
                    let _permit = translator.semaphore.acquire().await;
                    translator.translate_request(&request).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (engine, handle) in engines.into_iter().zip(handles) {
            let translation = match handle.await {
                Ok(translation) => translation,
                Err(e) => {
                    warn!("Comparison task for {} did not finish: {}", engine, e);
                    format!("{}{}", ERROR_PREFIX, e)
                }
            };
            results.push(EngineTranslation {
                engine: engine.clone(),
                translation,
            });
        }

        results
    }
}
