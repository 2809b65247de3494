//! Cache-aside book info lookup

use crate::cache::BookInfoCache;
use crate::config::{Config, DEFAULT_FETCH_TIMEOUT};
use crate::error::Result;
use crate::merge::merge;
use crate::sources::{build_client, GoogleBooks, MetadataSource, OpenLibrary};
use crate::types::{BookInfo, PartialBookInfo};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Served from the cache without contacting any upstream
    Cached(BookInfo),
    /// Fetched from the upstreams, merged and written to the cache
    Fetched(BookInfo),
    /// Neither upstream produced a title; nothing was cached
    NotFound,
}

impl Lookup {
    pub fn into_book_info(self) -> Option<BookInfo> {
        match self {
            Lookup::Cached(info) | Lookup::Fetched(info) => Some(info),
            Lookup::NotFound => None,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Lookup::Cached(_))
    }
}

/// Looks up book metadata by ISBN, consulting the cache before the upstreams
///
/// On a miss both sources are queried concurrently, each bounded by the
/// fetch timeout. Concurrent misses for the same ISBN are not coalesced; each
/// one queries the upstreams and upserts its own result.
pub struct BookInfoService {
    cache: Arc<dyn BookInfoCache>,
    primary: Arc<dyn MetadataSource>,
    secondary: Arc<dyn MetadataSource>,
    fetch_timeout: Duration,
}

impl BookInfoService {
    /// Create a service from explicit collaborators
    ///
    /// `primary` takes precedence over `secondary` field by field.
    pub fn new(
        cache: Arc<dyn BookInfoCache>,
        primary: Arc<dyn MetadataSource>,
        secondary: Arc<dyn MetadataSource>,
    ) -> Self {
        Self {
            cache,
            primary,
            secondary,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Create a service talking to Google Books and Open Library
    pub fn from_config(config: &Config, cache: Arc<dyn BookInfoCache>) -> Result<Self> {
        let client = build_client(config.fetch_timeout)?;
        let primary = Arc::new(GoogleBooks::new(
            client.clone(),
            config.google_books_url.as_str(),
        ));
        let secondary = Arc::new(OpenLibrary::new(client, config.open_library_url.as_str()));
        Ok(Self::new(cache, primary, secondary).with_fetch_timeout(config.fetch_timeout))
    }

    /// Set the upper bound on a single upstream call
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Get book info for `isbn`, or `None` when no source knows its title
    pub async fn get_book_info(&self, isbn: &str) -> Result<Option<BookInfo>> {
        Ok(self.lookup(isbn).await?.into_book_info())
    }

    /// Run the cache-aside lookup and report where the result came from
    pub async fn lookup(&self, isbn: &str) -> Result<Lookup> {
        if let Some(cached) = self.cache.get(isbn).await? {
            tracing::debug!("Cache hit for {}", isbn);
            return Ok(Lookup::Cached(cached));
        }

        tracing::debug!("Cache miss for {}, querying upstreams", isbn);
        let (primary, secondary) = tokio::join!(
            self.fetch_from(self.primary.as_ref(), isbn),
            self.fetch_from(self.secondary.as_ref(), isbn),
        );

        let info = merge(isbn, primary, secondary);
        if !info.has_title() {
            tracing::info!("No title found for {}, not caching", isbn);
            return Ok(Lookup::NotFound);
        }

        self.cache.upsert(&info).await?;
        tracing::info!("Cached book info for {}", isbn);
        Ok(Lookup::Fetched(info))
    }

    /// Query one source, treating a timeout like any other failure
    async fn fetch_from(&self, source: &dyn MetadataSource, isbn: &str) -> Option<PartialBookInfo> {
        match tokio::time::timeout(self.fetch_timeout, source.fetch(isbn)).await {
            Ok(Some(partial)) if partial.is_empty() => {
                tracing::debug!("{} returned no usable fields for {}", source.name(), isbn);
                None
            }
            Ok(partial) => partial,
            Err(_) => {
                tracing::warn!(
                    "{} lookup for {} timed out after {:?}",
                    source.name(),
                    isbn,
                    self.fetch_timeout
                );
                None
            }
        }
    }
}
