//! Sentinela CLI
//!
//! Trains, persists and queries the hybrid sentiment classifier.
//! Results go to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use sentinela_core::AnalysisRecord;
use sentinela_service::{SentimentService, ServiceConfig, Table};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    sentinela_service::metrics::describe();

    let mut config = ServiceConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    config.apply(&cli.overrides());
    config.validate()?;
    info!(model_path = %config.model_path.display(), "Configuration loaded");

    let service = Arc::new(SentimentService::new(config)?);

    match cli.command {
        Command::Train { dataset } => train(&service, &dataset),
        Command::Analyze { text } => analyze(&service, &text),
        Command::Batch { input } => batch(service, &input).await,
        Command::Info { dataset } => show_info(&service, dataset.as_deref()),
    }
}

fn train(service: &SentimentService, dataset: &Path) -> Result<()> {
    let table = Table::from_path(dataset).with_context(|| format!("reading {}", dataset.display()))?;
    let report = service.load_dataset(&table)?;
    let metadata = service.train()?;
    service.save(None)?;
    info!(path = %service.config().model_path.display(), "Model saved");

    let summary = serde_json::json!({
        "ingest": report,
        "training": metadata,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn analyze(service: &SentimentService, text: &str) -> Result<()> {
    load_model(service)?;
    let record = service.analyze_single(text);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Classify the file in chunks of the configured batch size; Ctrl-C stops
/// between items and the remaining lines are reported as cancelled
async fn batch(service: Arc<SentimentService>, input: &Path) -> Result<()> {
    load_model(&service)?;
    let texts = read_lines(input)?;
    info!(lines = texts.len(), input = %input.display(), "Batch input read");

    let token = CancellationToken::new();
    let watcher = {
        let token = token.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling remaining items");
                token.cancel();
            }
        })
    };

    let worker = {
        let token = token.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<AnalysisRecord>> {
            let chunk = service.config().max_batch_size;
            let mut records = Vec::with_capacity(texts.len());
            for slice in texts.chunks(chunk) {
                records.extend(service.analyze_batch(slice, Some(&token))?);
            }
            Ok(records)
        })
    };
    let records = worker.await.context("batch worker panicked")??;
    watcher.abort();

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    let failed = records.iter().filter(|r| !r.is_ok()).count();
    info!(items = records.len(), failed, cancelled = token.is_cancelled(), "Batch complete");
    Ok(())
}

fn show_info(service: &SentimentService, dataset: Option<&Path>) -> Result<()> {
    if service.config().model_path.exists() {
        load_model(service)?;
    } else {
        warn!(path = %service.config().model_path.display(), "No model artifact found");
    }

    let mut summary = serde_json::json!({ "model": service.model_info() });
    if let Some(path) = dataset {
        let table = Table::from_path(path).with_context(|| format!("reading {}", path.display()))?;
        service.load_dataset(&table)?;
        summary["dataset"] = serde_json::to_value(service.dataset_info()?)?;
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_model(service: &SentimentService) -> Result<()> {
    let path = &service.config().model_path;
    service
        .load(None)
        .with_context(|| format!("loading model from {}; run `sentinela train` first", path.display()))
}

/// Non-blank lines, trimmed of the line terminator
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("sentinela=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentinela=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
