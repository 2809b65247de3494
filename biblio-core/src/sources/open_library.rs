//! Open Library books API adapter

use super::field::{self, Field, Object};
use super::{http, MetadataSource, RequestTemplate};
use crate::types::PartialBookInfo;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const SOURCE: &str = "open_library";

/// Adapter for `GET /api/books?bibkeys=ISBN:<isbn>&format=json&jscmd=data`
pub struct OpenLibrary {
    client: Client,
    template: RequestTemplate,
}

impl OpenLibrary {
    pub fn new(client: Client, template: impl Into<RequestTemplate>) -> Self {
        Self {
            client,
            template: template.into(),
        }
    }
}

#[async_trait]
impl MetadataSource for OpenLibrary {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch(&self, isbn: &str) -> Option<PartialBookInfo> {
        let url = self.template.render(isbn);
        match http::get_json(&self.client, &url).await {
            Ok(body) => {
                let parsed = parse_books(&body, isbn);
                if parsed.is_none() {
                    tracing::debug!("Open Library has no record for {}", isbn);
                }
                parsed
            }
            Err(e) => {
                tracing::warn!("Open Library lookup for {} failed: {}", isbn, e);
                None
            }
        }
    }
}

/// Response key for an ISBN bibkey
pub fn bibkey(isbn: &str) -> String {
    format!("ISBN:{}", isbn)
}

/// Extract the record stored under `ISBN:<isbn>` in a books API response
///
/// Returns `None` when the key is absent or does not hold an object.
pub fn parse_books(body: &Value, isbn: &str) -> Option<PartialBookInfo> {
    let book = body.get(bibkey(isbn))?.as_object()?;
    Some(parse_book(book))
}

fn parse_book(book: &Object) -> PartialBookInfo {
    PartialBookInfo {
        title: field::string(book, "title").ok(SOURCE, "title"),
        authors: field::name_list(book, "authors")
            .map(field::joined)
            .ok(SOURCE, "authors"),
        weight: field::string(book, "weight").ok(SOURCE, "weight"),
        subjects: field::name_list(book, "subjects").ok(SOURCE, "subjects"),
        publisher_name: first_publisher(book).ok(SOURCE, "publishers"),
        first_sentence: first_sentence(book).ok(SOURCE, "excerpts"),
        identifiers: field::string_list_map(book, "identifiers").ok(SOURCE, "identifiers"),
        cover_urls: field::string_map(book, "cover").ok(SOURCE, "cover"),
        ..PartialBookInfo::default()
    }
}

fn first_publisher(book: &Object) -> Field<String> {
    field::array(book, "publishers").and_then(|publishers| match publishers.first() {
        None | Some(Value::Null) => Field::Missing,
        Some(Value::Object(publisher)) => field::string(publisher, "name"),
        Some(_) => Field::Malformed("array of objects"),
    })
}

/// Text of the first excerpt flagged `first_sentence: true`
fn first_sentence(book: &Object) -> Field<String> {
    field::array(book, "excerpts").and_then(|excerpts| {
        for excerpt in excerpts {
            match excerpt {
                Value::Null => continue,
                Value::Object(excerpt) => {
                    if excerpt.get("first_sentence") == Some(&Value::Bool(true)) {
                        return field::string(excerpt, "text");
                    }
                }
                _ => return Field::Malformed("array of objects"),
            }
        }
        Field::Missing
    })
}
