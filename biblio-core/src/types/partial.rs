//! Per-source partial metadata

use std::collections::BTreeMap;

/// The fields a single upstream was able to supply for an ISBN
///
/// Produced by a source adapter and consumed by [`crate::merge::merge`].
/// Never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialBookInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub authors: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub language: Option<String>,
    pub print_type: Option<String>,
    pub categories: Option<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub preview_link: Option<String>,
    pub info_link: Option<String>,
    pub weight: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub publisher_name: Option<String>,
    pub first_sentence: Option<String>,
    pub identifiers: Option<BTreeMap<String, Vec<String>>>,
    pub cover_urls: Option<BTreeMap<String, String>>,
}

impl PartialBookInfo {
    /// Whether the source supplied nothing at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
