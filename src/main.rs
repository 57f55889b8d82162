//! Entry point: translates the marked elements of an HTML file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{
    Parser,
    ValueEnum,
};
use i18n_swap::HtmlDocument;
use i18n_swap::config::ConfigManager;
use i18n_swap::engine::{
    Engine,
    Strategy,
};
use i18n_swap::input::load_dir;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "i18n-swap", version, about = "Translate marked elements of an HTML document")]
struct Cli {
    /// HTML file to translate.
    input: PathBuf,

    /// Workspace root searched for `.i18n-swap.json` (defaults to the current directory).
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Settings file to use instead of searching the workspace.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory searched for translation files (defaults to the workspace).
    #[arg(short, long)]
    translations: Option<PathBuf>,

    /// Language to apply (defaults to the configured fallback language).
    #[arg(short, long)]
    language: Option<String>,

    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Fail when any key has no translation.
    #[arg(long)]
    strict: bool,

    /// Load all translation files into one table, ignoring languages.
    #[arg(long)]
    flat: bool,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Command-line spelling of [`Strategy`].
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Leave untranslated elements unchanged.
    Static,
    /// Write a placeholder into untranslated elements.
    Dynamic,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Static => Self::Static,
            StrategyArg::Dynamic => Self::Dynamic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let workspace = match cli.workspace {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let mut config_manager = ConfigManager::new();
    match &cli.config {
        Some(path) => config_manager.load_settings_file(path)?,
        None => config_manager.load_settings(Some(&workspace))?,
    }
    let mut settings = config_manager.get_settings().clone();
    if let Some(strategy) = cli.strategy {
        settings.strategy = strategy.into();
    }
    settings.strict |= cli.strict;
    settings.flat |= cli.flat;

    let translations_root = cli.translations.as_deref().unwrap_or(&workspace);
    let table = load_dir(translations_root, &settings)?;
    let mut engine = Engine::from_settings(table, &settings);
    if let Some(language) = cli.language {
        engine.set_language(language)?;
    }

    let untranslated = engine.untranslated_keys();
    if !untranslated.is_empty() {
        tracing::info!(
            language = %engine.active_language(),
            fallback = %engine.fallback_language(),
            count = untranslated.len(),
            "Language lacks keys present in the fallback language"
        );
        tracing::debug!(keys = ?untranslated, "Untranslated keys");
    }

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let mut document = HtmlDocument::parse(source)?;

    // strict でも出力は書き出してから失敗させる
    let result = document.apply(&engine, &settings.marker());

    let rendered = document.render();
    match &cli.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
    }

    let summary = result?;
    tracing::info!(
        total = summary.total(),
        applied = summary.applied,
        missing = summary.missing,
        language = %engine.active_language(),
        "Translated document"
    );

    Ok(())
}
