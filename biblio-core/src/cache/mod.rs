//! Book info cache store
//!
//! The cache is keyed by ISBN and only ever sees whole records: a single
//! record read, or an upsert that replaces whatever was stored before.

use crate::error::CacheError;
use crate::types::BookInfo;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Sequence for temp file names, unique within the process
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Result type for cache operations
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Abstract cache store for canonical book records
#[async_trait]
pub trait BookInfoCache: Send + Sync {
    /// Read the record stored for `isbn`, if any
    async fn get(&self, isbn: &str) -> CacheResult<Option<BookInfo>>;

    /// Insert or replace the record stored under `info.isbn`
    async fn upsert(&self, info: &BookInfo) -> CacheResult<()>;
}

/// File-backed cache storing one JSON document per ISBN
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> CacheResult<Self> {
        let cache = Self::new(root);
        tokio::fs::create_dir_all(&cache.root)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(cache)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the entry path for a key, rejecting anything that is not a
    /// plain file name
    fn entry_path(&self, isbn: &str) -> CacheResult<PathBuf> {
        let safe = !isbn.is_empty()
            && isbn
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(CacheError::InvalidKey(isbn.to_string()));
        }
        Ok(self.root.join(format!("{}.json", isbn)))
    }
}

#[async_trait]
impl BookInfoCache for FileCache {
    async fn get(&self, isbn: &str) -> CacheResult<Option<BookInfo>> {
        let path = self.entry_path(isbn)?;
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Unavailable(e.to_string())),
        };
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|source| CacheError::Corrupt {
                isbn: isbn.to_string(),
                source,
            })
    }

    async fn upsert(&self, info: &BookInfo) -> CacheResult<()> {
        let path = self.entry_path(&info.isbn)?;
        let data = serde_json::to_string_pretty(info).map_err(|source| CacheError::Corrupt {
            isbn: info.isbn.clone(),
            source,
        })?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        // Write to a sibling temp file then rename so readers never see a
        // partial entry. Temp names are unique per write, so concurrent
        // upserts of one ISBN each rename their own file.
        let temp_path = self.root.join(format!(
            "{}.{}.{}.tmp",
            info.isbn,
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        let written = match tokio::fs::write(&temp_path, data).await {
            Ok(()) => tokio::fs::rename(&temp_path, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(CacheError::Unavailable(e.to_string()));
        }
        Ok(())
    }
}

/// In-memory cache (for testing and ephemeral use)
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, BookInfo>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached records
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl BookInfoCache for MemoryCache {
    async fn get(&self, isbn: &str) -> CacheResult<Option<BookInfo>> {
        Ok(self.entries.read().await.get(isbn).cloned())
    }

    async fn upsert(&self, info: &BookInfo) -> CacheResult<()> {
        self.entries
            .write()
            .await
            .insert(info.isbn.clone(), info.clone());
        Ok(())
    }
}
