//! CLI command definitions and handlers

use chrono::{DateTime, Utc};
use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::cli::layout::{self, Layout};
use crate::core::client::Translator;
use crate::core::languages::TARGET_LANGUAGES;
use crate::core::models::{Backend, EngineTranslation};

/// Commands for the translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text with one engine
    Translate {
        /// Engine label, e.g. "OpenAI/GPT-4o"
        #[arg(short, long)]
        engine: String,

        /// Target language (default: Japanese)
        #[arg(short, long, default_value = "Japanese")]
        target_lang: String,

        /// Text to translate (read from --file or stdin when omitted)
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// File containing the text to translate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Translate text with several engines and show the results side by side
    Compare {
        /// Engine labels, repeated or comma separated
        #[arg(short, long = "engine", value_delimiter = ',')]
        engines: Vec<String>,

        /// Target language (default: Japanese)
        #[arg(short, long, default_value = "Japanese")]
        target_lang: String,

        /// Text to translate (read from --file or stdin when omitted)
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// File containing the text to translate
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Comparison layout
        #[arg(long, value_enum, default_value_t = Layout::Horizontal)]
        layout: Layout,

        /// Terminal width used by the horizontal layout
        #[arg(long, default_value_t = 120)]
        width: usize,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// List configured translation engines
    Engines,

    /// List offered target languages
    Languages,

    /// Start the browser front end and HTTP API
    Server {
        /// Bind address (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port (default: 8501)
        #[arg(short, long, default_value_t = 8501)]
        port: u16,
    },
}

/// JSON output of `compare --json`
#[derive(Serialize)]
struct ComparisonReport<'a> {
    generated_at: DateTime<Utc>,
    target_language: &'a str,
    results: &'a [EngineTranslation],
}

/// Run `command`; the translator is only loaded for commands that use it
pub async fn execute<F>(command: Commands, load_translator: F) -> anyhow::Result<()>
where
    F: FnOnce() -> anyhow::Result<Translator>,
{
    match command {
        Commands::Translate {
            engine,
            target_lang,
            text,
            file,
        } => {
            let translator = load_translator()?;
            handle_translate(&translator, engine, target_lang, text, file).await
        }
        Commands::Compare {
            engines,
            target_lang,
            text,
            file,
            layout,
            width,
            json,
        } => {
            let translator = load_translator()?;
            handle_compare(
                &translator,
                engines,
                target_lang,
                text,
                file,
                layout,
                width,
                json,
            )
            .await
        }
        Commands::Engines => {
            handle_engines(&load_translator()?);
            Ok(())
        }
        Commands::Languages => {
            handle_languages();
            Ok(())
        }
        Commands::Server { host, port } => handle_server(load_translator()?, host, port).await,
    }
}

/// Source text from `--text`, `--file` or stdin, in that order
fn read_source_text(text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(file) = file {
        return std::fs::read_to_string(&file)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", file.display(), e));
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Handle single-engine translation command
pub async fn handle_translate(
    translator: &Translator,
    engine: String,
    target_lang: String,
    text: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = read_source_text(text, file)?;

    let translation = translator.translate(&text, &engine, &target_lang).await;
    println!("{}", translation);

    Ok(())
}

/// Handle comparison command
#[allow(clippy::too_many_arguments)]
pub async fn handle_compare(
    translator: &Translator,
    engines: Vec<String>,
    target_lang: String,
    text: Option<String>,
    file: Option<PathBuf>,
    layout: Layout,
    width: usize,
    json: bool,
) -> anyhow::Result<()> {
    let text = read_source_text(text, file)?;
    let start_time = Instant::now();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.set_message(format!("Translating with {} engines", engines.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let results = translator.compare(&text, &engines, &target_lang).await;

    spinner.finish_and_clear();
    info!("Compared {} engines in {:?}", results.len(), start_time.elapsed());

    if json {
        let report = ComparisonReport {
            generated_at: Utc::now(),
            target_language: &target_lang,
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", layout::render(&results, layout, width));
    }

    Ok(())
}

/// Handle engines listing command
pub fn handle_engines(translator: &Translator) {
    let catalog = translator.catalog();
    if catalog.is_empty() {
        println!("No translation engines configured in {}", translator.config().catalog_path.display());
        return;
    }

    let label_width = catalog.labels().iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for (label, model) in catalog.entries() {
        let note = match Backend::from_label(label) {
            Backend::Unrecognized => "  (unsupported backend)",
            _ => "",
        };
        println!("{:<width$}  {}{}", label, model, note, width = label_width);
    }
}

/// Handle languages listing command
pub fn handle_languages() {
    for language in TARGET_LANGUAGES {
        println!("{}", language);
    }
}

/// Handle server command
pub async fn handle_server(translator: Translator, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(host, port, Arc::new(translator)).await?;

    Ok(())
}
