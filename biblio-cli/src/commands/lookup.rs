//! Lookup command implementation

use super::{parse_isbn, print_book_info};
use anyhow::{bail, Context, Result};
use biblio_core::{BookInfoService, Config, FileCache, Lookup};
use std::sync::Arc;

/// Build the lookup service over the configured file cache
pub(super) async fn open_service(config: &Config) -> Result<BookInfoService> {
    let cache = FileCache::open(&config.cache_path).await.with_context(|| {
        format!(
            "Failed to open cache directory {}",
            config.cache_path.display()
        )
    })?;
    Ok(BookInfoService::from_config(config, Arc::new(cache))?)
}

/// Look up book metadata, fetching and caching it on a miss
pub async fn lookup(config: &Config, raw: &str, json: bool) -> Result<()> {
    let isbn = parse_isbn(raw)?;
    let service = open_service(config).await?;

    let info = match service
        .lookup(&isbn)
        .await
        .with_context(|| format!("Lookup for {} failed", isbn))?
    {
        Lookup::Cached(info) => {
            tracing::info!("Served {} from cache", isbn);
            info
        }
        Lookup::Fetched(info) => {
            tracing::info!("Fetched and cached {}", isbn);
            info
        }
        Lookup::NotFound => bail!("No information available for ISBN {}", isbn),
    };

    print_book_info(&info, json)
}
