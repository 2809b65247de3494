//! Cache warming command implementation

use super::lookup::open_service;
use anyhow::{bail, Context, Result};
use biblio_core::{isbn, Config, Lookup};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};

/// Per-ISBN result tallies
#[derive(Debug, Default)]
struct Summary {
    cached: usize,
    fetched: usize,
    not_found: usize,
    invalid: usize,
    errors: usize,
}

/// ISBN lines of a warm file: blank lines and `#` comments are skipped
fn isbn_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Look up every ISBN in `input` so later lookups are served from the cache
pub async fn warm(config: &Config, input: &str, jobs: usize) -> Result<()> {
    let contents = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input))?;

    let mut summary = Summary::default();
    let mut isbns = Vec::new();
    for line in isbn_lines(&contents) {
        match isbn::normalize(line) {
            Some(isbn) => isbns.push(isbn),
            None => {
                tracing::warn!("Skipping invalid ISBN {:?}", line);
                summary.invalid += 1;
            }
        }
    }

    if isbns.is_empty() {
        println!("No ISBNs found in {}", input);
        return Ok(());
    }

    println!("Warming cache with {} ISBNs", isbns.len());
    let service = open_service(config).await?;

    let progress = ProgressBar::new(isbns.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );

    let mut results = stream::iter(isbns)
        .map(|isbn| {
            let service = &service;
            async move {
                let result = service.lookup(&isbn).await;
                (isbn, result)
            }
        })
        .buffer_unordered(jobs);

    while let Some((isbn, result)) = results.next().await {
        match result {
            Ok(Lookup::Cached(_)) => summary.cached += 1,
            Ok(Lookup::Fetched(_)) => summary.fetched += 1,
            Ok(Lookup::NotFound) => summary.not_found += 1,
            Err(e) => {
                tracing::error!("Lookup for {} failed: {}", isbn, e);
                summary.errors += 1;
            }
        }
        progress.set_message(isbn);
        progress.inc(1);
    }

    progress.finish_and_clear();

    println!("\nCache warm complete:");
    println!("  Already cached: {}", summary.cached);
    println!("  Fetched:        {}", summary.fetched);
    println!("  Not found:      {}", summary.not_found);
    println!("  Invalid:        {}", summary.invalid);
    println!("  Errors:         {}", summary.errors);

    if summary.errors > 0 {
        bail!("Cache warm completed with {} errors", summary.errors);
    }

    Ok(())
}
