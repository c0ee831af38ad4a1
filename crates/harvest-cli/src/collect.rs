//! Collection command handlers for the CLI.
//!
//! Per-key failures never abort a run; they are logged by the pipeline and
//! surfaced here in the summary line. Only configuration and filesystem
//! problems end the command with an error.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use harvest_core::AppConfig;
use harvest_scraper::{BookSource, Harvest, HttpTransport, StoreSource};

use crate::output;

pub(crate) const STORES_FILE: &str = "stores.csv";
pub(crate) const BOOKS_FILE: &str = "books.csv";

/// Per-run overrides for the catalog crawl.
#[derive(Debug, Args)]
pub(crate) struct BookArgs {
    /// Catalog category to crawl (overrides `HARVEST_BOOKS_CATEGORY_ID`)
    #[arg(long)]
    pub category: Option<String>,

    /// Page cap; 0 crawls until an empty page (overrides `HARVEST_BOOKS_MAX_PAGES`)
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Delay between page requests in milliseconds (overrides `HARVEST_BOOKS_DELAY_MS`)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// CSV file to write (defaults to `<output dir>/books.csv`)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Harvest every region's stores and write them to CSV.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the CSV cannot be
/// written.
pub(crate) async fn run_collect_stores(
    config: &AppConfig,
    output_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let transport = build_transport(config)?;
    let source = StoreSource::new();

    let harvest = harvest_scraper::run(&transport, &source).await;
    print_summary("stores", "regions", &harvest);

    if harvest.records.is_empty() {
        tracing::warn!("no store records harvested; nothing written");
        return Ok(());
    }

    let path = output_path.unwrap_or_else(|| config.output_dir.join(STORES_FILE));
    output::save(&path, |out| output::write_stores(out, &harvest.records))?;
    println!("  wrote {} rows to {}", harvest.records.len(), path.display());
    Ok(())
}

/// Crawl one catalog category page by page and write the books to CSV.
///
/// # Errors
///
/// Returns an error if the source or HTTP client cannot be built or the CSV
/// cannot be written.
pub(crate) async fn run_collect_books(config: &AppConfig, args: BookArgs) -> anyhow::Result<()> {
    let transport = build_transport(config)?;
    let source = book_source(config, &args)?;

    tracing::info!(
        category = source.category_id(),
        "starting catalog crawl"
    );
    let harvest = harvest_scraper::run(&transport, &source).await;
    print_summary("books", "pages", &harvest);

    if harvest.records.is_empty() {
        tracing::warn!("no book records harvested; nothing written");
        return Ok(());
    }

    let path = args
        .output
        .unwrap_or_else(|| config.output_dir.join(BOOKS_FILE));
    output::save(&path, |out| output::write_books(out, &harvest.records))?;
    println!("  wrote {} rows to {}", harvest.records.len(), path.display());
    Ok(())
}

fn build_transport(config: &AppConfig) -> anyhow::Result<HttpTransport> {
    HttpTransport::new(config.request_timeout_secs).context("failed to build HTTP client")
}

/// Resolves the catalog source from config with flag overrides applied.
pub(crate) fn book_source(config: &AppConfig, args: &BookArgs) -> anyhow::Result<BookSource> {
    let category = args
        .category
        .as_deref()
        .unwrap_or(&config.books_category_id);
    let delay_ms = args.delay_ms.unwrap_or(config.books_delay_ms);

    let source = BookSource::new(category)
        .context("failed to build catalog source")?
        .with_page_size(config.books_page_size)
        .with_max_pages(args.max_pages.or_else(|| config.books_page_limit()))
        .with_delay(Duration::from_millis(delay_ms));
    Ok(source)
}

fn print_summary<R>(label: &str, unit: &str, harvest: &Harvest<R>) {
    let failed = harvest.failed_keys();
    println!(
        "{label}: {} records from {} {unit} (stopped: {})",
        harvest.records.len(),
        harvest.rounds.len(),
        harvest.stop
    );
    if !failed.is_empty() {
        println!("  failed {unit}: {}", failed.join(", "));
    }
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
