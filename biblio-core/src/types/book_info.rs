//! Canonical book metadata record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Consolidated bibliographic metadata for a single ISBN
///
/// This is the unit of caching and the value returned to consumers. Every
/// field other than the ISBN is optional; `None` means "unknown".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BookInfo {
    /// ISBN this record describes (cache key)
    pub isbn: String,

    /// Book title
    pub title: Option<String>,

    /// Book description/summary
    pub description: Option<String>,

    /// Authors as a single display string ("A, B")
    pub authors: Option<String>,

    /// Publication date as reported upstream (free-form)
    pub published_date: Option<String>,

    /// Number of pages
    pub page_count: Option<u32>,

    /// Language code
    pub language: Option<String>,

    /// Print type ("BOOK", "MAGAZINE")
    pub print_type: Option<String>,

    /// Categories as a single display string
    pub categories: Option<String>,

    /// Average reader rating
    pub average_rating: Option<f64>,

    /// Number of ratings
    pub ratings_count: Option<u32>,

    /// Link to a preview of the book
    pub preview_link: Option<String>,

    /// Link to the book's info page
    pub info_link: Option<String>,

    /// Physical weight ("1.2 lbs")
    pub weight: Option<String>,

    /// Subject headings, in upstream order
    pub subjects: Option<Vec<String>>,

    /// Name of the first listed publisher
    pub publisher_name: Option<String>,

    /// Excerpt flagged as the book's first sentence
    pub first_sentence: Option<String>,

    /// External identifiers keyed by provider ("goodreads", "lccn", ...)
    pub identifiers: Option<BTreeMap<String, Vec<String>>>,

    /// Cover art URLs keyed by size ("small", "medium", "large")
    pub cover_urls: Option<BTreeMap<String, String>>,
}

impl BookInfo {
    /// Create an empty record for the given ISBN
    pub fn new(isbn: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            ..Self::default()
        }
    }

    /// Whether the record counts as a successful enrichment
    ///
    /// Only titled records are ever written to the cache.
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }

    /// Set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
