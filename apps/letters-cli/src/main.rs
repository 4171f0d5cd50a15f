//! `letters` binary
//!
//! Entry point for the command-line letter renderer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use letter_core::BundleLoader;
use letters_cli::{language_lines, load_config, render_letter, FsBundleSource, LetterKind};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "letters")]
#[command(version, about = "Render GDPR requests and withdrawal notices from translation files")]
struct Args {
    /// Directory holding languages.json and the translation documents
    #[arg(long)]
    translations: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded languages as `code<TAB>name`
    Languages,
    /// Print a rendered letter
    Render {
        #[arg(value_enum)]
        kind: LetterKind,

        /// Language code; the first loaded language when omitted
        #[arg(long)]
        lang: Option<String>,

        /// JSON object of form fields
        #[arg(long)]
        form: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries only letter text
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(args.config.as_deref(), args.translations)?;
    let source = FsBundleSource::current_dir();
    let bundles = BundleLoader::new(&source, &config).load().await;
    if bundles.is_empty() {
        tracing::warn!("No translations loaded from {}", config.base_path);
    }

    match args.command {
        Command::Languages => {
            for line in language_lines(&bundles) {
                println!("{}", line);
            }
        }
        Command::Render { kind, lang, form } => {
            let form = match form {
                Some(path) => {
                    let contents = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read form file {}", path.display()))?;
                    let value: serde_json::Value = serde_json::from_str(&contents)
                        .with_context(|| format!("Failed to parse form file {}", path.display()))?;
                    Some(value)
                }
                None => None,
            };
            let text = render_letter(
                bundles,
                kind,
                lang.as_deref(),
                form.as_ref(),
                &config.default_locale,
            );
            println!("{}", text);
        }
    }

    Ok(())
}
