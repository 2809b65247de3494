//! Lookup configuration loaded from the environment

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes?q=isbn:";
pub const DEFAULT_OPEN_LIBRARY_URL: &str =
    "https://openlibrary.org/api/books?bibkeys=ISBN:{isbn}&format=json&jscmd=data";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CACHE_PATH: &str = "./biblio_data/book_info";

/// Settings for the metadata lookup service
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Google Books request template (ISBN appended unless it contains `{isbn}`)
    pub google_books_url: String,

    /// Open Library request template
    pub open_library_url: String,

    /// Upper bound on a single upstream call
    pub fetch_timeout: Duration,

    /// Root directory of the file-backed cache
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_books_url: DEFAULT_GOOGLE_BOOKS_URL.to_string(),
            open_library_url: DEFAULT_OPEN_LIBRARY_URL.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
        }
    }
}

impl Config {
    /// Load configuration from `BIBLIO_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("BIBLIO_GOOGLE_BOOKS_URL") {
            config.google_books_url = url;
        }
        if let Some(url) = lookup("BIBLIO_OPEN_LIBRARY_URL") {
            config.open_library_url = url;
        }
        if let Some(path) = lookup("BIBLIO_CACHE_PATH") {
            config.cache_path = PathBuf::from(path);
        }
        if let Some(secs) = lookup("BIBLIO_FETCH_TIMEOUT_SECS") {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "BIBLIO_FETCH_TIMEOUT_SECS".to_string(),
                    value: secs.clone(),
                })?;
            config.fetch_timeout = Duration::from_secs(parsed);
        }

        Ok(config)
    }

    /// Override the cache directory
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BIBLIO_OPEN_LIBRARY_URL", "http://localhost:9000/books/{isbn}"),
            ("BIBLIO_FETCH_TIMEOUT_SECS", "3"),
            ("BIBLIO_CACHE_PATH", "/tmp/biblio"),
        ]))
        .unwrap();

        assert_eq!(config.open_library_url, "http://localhost:9000/books/{isbn}");
        assert_eq!(config.google_books_url, DEFAULT_GOOGLE_BOOKS_URL);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.cache_path, PathBuf::from("/tmp/biblio"));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        for bad in ["soon", "0", "-1"] {
            let err = Config::from_lookup(lookup_from(&[("BIBLIO_FETCH_TIMEOUT_SECS", bad)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }));
        }
    }
}
