//! MediaFind - Fuzzy Media Catalog Search
//!
//! Loads a tab-separated catalog and answers typo-tolerant queries.

use anyhow::{Context, Result};
use clap::Parser;
use mediafind::config::{self, Config};
use mediafind::core::TextNormalizer;
use mediafind::library::{Catalog, SearchField};
use mediafind::matcher::MatchEngine;
use mediafind::shell::{Shell, ShellOptions};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tab-separated catalog file (title, author, description)
    catalog: Option<PathBuf>,

    /// Maximum average edit distance for a match
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Field to search; repeat for several
    #[arg(short, long = "field", value_enum)]
    fields: Vec<SearchField>,

    /// Sort results by score, best first
    #[arg(short, long)]
    ranked: bool,

    /// Run a single query and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective config file and exit
    #[arg(long)]
    write_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_file = args.config.clone().unwrap_or_else(config::config_path);
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .with_context(|| format!("loading config {}", config_file.display()))?;

    // Setup logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::from_str(&config.log_level).unwrap_or_else(|_| {
            eprintln!("Unknown log level '{}', using INFO", config.log_level);
            Level::INFO
        })
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎬 MediaFind v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if !args.fields.is_empty() {
        config.search_fields = args.fields.clone();
    }
    if let Some(catalog) = &args.catalog {
        config.catalog_path = catalog.to_string_lossy().to_string();
    }
    config.ranked |= args.ranked;
    config.validate()?;

    if args.write_config {
        config.save_to(&config_file)?;
        info!("💾 Wrote config to {}", config_file.display());
        return Ok(());
    }

    let catalog_path = PathBuf::from(&config.catalog_path);
    let normalizer = TextNormalizer::new(config.normalizer.clone());
    let catalog = Catalog::load(&catalog_path, &normalizer)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    if catalog.is_empty() {
        warn!("⚠️ Catalog {} has no usable records", catalog_path.display());
    }

    let engine = MatchEngine::new(config.threshold);
    let options = ShellOptions {
        fields: config.search_fields.clone(),
        ranked: config.ranked,
        list_on_start: config.list_on_start && args.query.is_none(),
    };
    info!(
        "Threshold {} over {:?}",
        engine.threshold(),
        options.fields
    );

    let shell = Shell::new(catalog, normalizer, engine, options);
    let stdout = std::io::stdout();

    if let Some(query) = args.query {
        let outcome = shell.query(&query);
        shell.print_outcome(&outcome, &mut stdout.lock())?;
        return Ok(());
    }

    shell.run(std::io::stdin().lock(), stdout.lock())?;
    info!("👋 Bye");
    Ok(())
}
