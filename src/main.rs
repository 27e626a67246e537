//! Main entry point for the LLM Compare Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use llm_compare_translator::cli::commands::{self, Commands};
use llm_compare_translator::{Translator, TranslatorConfig};

/// LLM Compare Translator - translate with OpenAI and Ollama engines side by side
#[derive(Parser, Debug)]
#[command(name = "llm-compare-translator", version, about, long_about = None)]
struct Args {
    /// Settings file (defaults to configs/translator.* when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Engine catalog, overriding the configured catalog_path
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .ok()
                .filter(|_| !args.verbose)
                .unwrap_or_else(|| format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match args.command {
        Some(command) => command,
        None => {
            println!("Please specify a command. Use --help for more information.");
            return Ok(());
        }
    };

    // A missing or malformed catalog ends the process; only `languages` runs without one
    let load_translator = || -> anyhow::Result<Translator> {
        let mut config = TranslatorConfig::load(args.config.as_deref())?;
        if let Some(catalog) = &args.catalog {
            config = config.with_catalog_path(catalog);
        }
        Ok(Translator::from_config(config)?)
    };

    commands::execute(command, load_translator).await
}
