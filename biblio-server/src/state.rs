//! Application state

use anyhow::{Context, Result};
use biblio_core::{BookInfoService, Config, FileCache};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside metadata lookup
    pub book_info: Arc<BookInfoService>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A lookup fetched and cached a new record
    BookInfoCached {
        isbn: String,
        title: String,
        cached_at: DateTime<Utc>,
    },
}

impl AppState {
    /// Create application state from `BIBLIO_*` environment variables
    pub async fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Self::from_config(&config).await
    }

    /// Create application state backed by the file cache
    pub async fn from_config(config: &Config) -> Result<Self> {
        let cache = FileCache::open(&config.cache_path).await.with_context(|| {
            format!(
                "Failed to open cache directory {}",
                config.cache_path.display()
            )
        })?;
        tracing::info!("Using book info cache at {}", config.cache_path.display());

        let service = BookInfoService::from_config(config, Arc::new(cache))?;
        Ok(Self::with_service(service))
    }

    /// Wrap an already-built lookup service
    pub fn with_service(service: BookInfoService) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            book_info: Arc::new(service),
            event_tx,
        }
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
