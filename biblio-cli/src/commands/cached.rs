//! Cached command implementation

use super::{parse_isbn, print_book_info};
use anyhow::{bail, Context, Result};
use biblio_core::{BookInfoCache, Config, FileCache};

/// Show what the cache holds for an ISBN
pub async fn cached(config: &Config, raw: &str, json: bool) -> Result<()> {
    let isbn = parse_isbn(raw)?;
    let cache = FileCache::new(&config.cache_path);

    match cache
        .get(&isbn)
        .await
        .with_context(|| format!("Failed to read cache entry for {}", isbn))?
    {
        Some(info) => print_book_info(&info, json),
        None => bail!("No cached information for ISBN {}", isbn),
    }
}
