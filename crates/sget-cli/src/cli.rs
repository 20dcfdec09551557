//! CLI for sget: one-shot segmented download to a local file.

use anyhow::{Context, Result};
use clap::Parser;
use sget_core::{config, url_model, DownloadManager};
use std::fs;
use std::path::{Path, PathBuf};

/// sget: fetch a URL over concurrent ranged connections.
#[derive(Debug, Parser)]
#[command(name = "sget")]
#[command(about = "Concurrent segmented HTTP fetcher", long_about = None)]
pub struct Cli {
    /// Direct HTTP/HTTPS URL to download.
    pub url: String,

    /// Output file (default: derived from the URL path).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum concurrent connections (overrides config).
    #[arg(short, long, value_name = "N")]
    pub connections: Option<i64>,

    /// Smallest size in bytes worth splitting (overrides config).
    #[arg(long, value_name = "BYTES")]
    pub min_split: Option<i64>,
}

pub fn run_from_args() -> Result<()> {
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_or_init().unwrap_or_else(|e| {
        tracing::warn!("config unavailable ({}), using defaults", e);
        config::SgetConfig::default()
    });

    let connections = cli.connections.unwrap_or(cfg.max_connections);
    let min_split = cli.min_split.unwrap_or(cfg.min_split_bytes);

    let manager = DownloadManager::new(connections).min_split_bytes(min_split);
    let body = manager
        .download_body(&cli.url)
        .with_context(|| format!("downloading {}", cli.url))?;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(url_model::derive_filename(&cli.url)));
    write_output(&output, &body)?;
    println!("Saved {} bytes to {}", body.len(), output.display());
    Ok(())
}

fn write_output(path: &Path, body: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}
