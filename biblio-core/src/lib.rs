//! Biblio Core Library
//!
//! This crate provides book metadata enrichment by ISBN: two upstream
//! adapters (Google Books and Open Library), a field-level merge, and a
//! cache-aside lookup service in front of a pluggable cache store.

pub mod cache;
pub mod config;
pub mod error;
pub mod isbn;
pub mod merge;
pub mod service;
pub mod sources;
pub mod types;

pub use cache::{BookInfoCache, FileCache, MemoryCache};
pub use config::Config;
pub use error::{BiblioError, CacheError, ConfigError, Result, SourceError};
pub use service::{BookInfoService, Lookup};
pub use sources::MetadataSource;
pub use types::{BookInfo, PartialBookInfo};
