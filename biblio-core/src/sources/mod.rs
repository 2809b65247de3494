//! Upstream bibliographic metadata sources
//!
//! Each adapter turns one provider's response shape into a
//! [`PartialBookInfo`]. Adapters never fail: network errors, bad statuses and
//! unparseable bodies are logged and reported as "no data" so the lookup can
//! carry on with the other source.

pub mod field;
mod google_books;
mod http;
mod open_library;

pub use google_books::{parse_volumes, GoogleBooks};
pub use http::build_client;
pub use open_library::{bibkey, parse_books, OpenLibrary};

use crate::types::PartialBookInfo;
use async_trait::async_trait;

/// A single upstream metadata provider
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Fetch whatever this source knows about `isbn`
    ///
    /// Returns `None` when the source has no data or could not be reached.
    async fn fetch(&self, isbn: &str) -> Option<PartialBookInfo>;
}

/// Placeholder substituted with the ISBN in request templates
pub const ISBN_PLACEHOLDER: &str = "{isbn}";

/// Request URL template for an upstream
///
/// Templates containing `{isbn}` have it substituted; any other template has
/// the ISBN appended, which suits query-string style endpoints ending in
/// `q=isbn:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate(String);

impl RequestTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn render(&self, isbn: &str) -> String {
        let isbn = urlencoding::encode(isbn);
        if self.0.contains(ISBN_PLACEHOLDER) {
            self.0.replace(ISBN_PLACEHOLDER, &isbn)
        } else {
            format!("{}{}", self.0, isbn)
        }
    }
}

impl From<&str> for RequestTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for RequestTemplate {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}
