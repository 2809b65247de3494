//! Google Books volumes API adapter

use super::field::{self, Object};
use super::{http, MetadataSource, RequestTemplate};
use crate::types::PartialBookInfo;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const SOURCE: &str = "google_books";

/// Adapter for `GET /books/v1/volumes?q=isbn:<isbn>`
pub struct GoogleBooks {
    client: Client,
    template: RequestTemplate,
}

impl GoogleBooks {
    pub fn new(client: Client, template: impl Into<RequestTemplate>) -> Self {
        Self {
            client,
            template: template.into(),
        }
    }
}

#[async_trait]
impl MetadataSource for GoogleBooks {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch(&self, isbn: &str) -> Option<PartialBookInfo> {
        let url = self.template.render(isbn);
        match http::get_json(&self.client, &url).await {
            Ok(body) => {
                let parsed = parse_volumes(&body);
                if parsed.is_none() {
                    tracing::debug!("Google Books has no volume for {}", isbn);
                }
                parsed
            }
            Err(e) => {
                tracing::warn!("Google Books lookup for {} failed: {}", isbn, e);
                None
            }
        }
    }
}

/// Extract the first volume's metadata from a volumes search response
///
/// Returns `None` when the response carries no results.
pub fn parse_volumes(body: &Value) -> Option<PartialBookInfo> {
    let volume = body
        .get("items")?
        .as_array()?
        .first()?
        .get("volumeInfo")?
        .as_object()?;
    Some(parse_volume_info(volume))
}

fn parse_volume_info(volume: &Object) -> PartialBookInfo {
    PartialBookInfo {
        title: field::string(volume, "title").ok(SOURCE, "title"),
        description: field::string(volume, "description").ok(SOURCE, "description"),
        authors: field::string_list(volume, "authors")
            .map(field::joined)
            .ok(SOURCE, "authors"),
        published_date: field::string(volume, "publishedDate").ok(SOURCE, "publishedDate"),
        page_count: field::uint(volume, "pageCount").ok(SOURCE, "pageCount"),
        language: field::string(volume, "language").ok(SOURCE, "language"),
        print_type: field::string(volume, "printType").ok(SOURCE, "printType"),
        categories: field::string_list(volume, "categories")
            .map(field::joined)
            .ok(SOURCE, "categories"),
        average_rating: field::float(volume, "averageRating").ok(SOURCE, "averageRating"),
        ratings_count: field::uint(volume, "ratingsCount").ok(SOURCE, "ratingsCount"),
        preview_link: field::string(volume, "previewLink").ok(SOURCE, "previewLink"),
        info_link: field::string(volume, "infoLink").ok(SOURCE, "infoLink"),
        ..PartialBookInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_first_volume() {
        let body = json!({
            "totalItems": 2,
            "items": [
                {
                    "volumeInfo": {
                        "title": "Clean Code",
                        "authors": ["Robert C. Martin", "Dean Wampler"],
                        "publishedDate": "2008-08-01",
                        "description": "Even bad code can function.",
                        "pageCount": 464,
                        "printType": "BOOK",
                        "categories": ["Computers"],
                        "averageRating": 4.5,
                        "ratingsCount": 12,
                        "language": "en",
                        "previewLink": "http://books.google.com/books?id=_i6bDeoCQzsC",
                        "infoLink": "http://books.google.com/books?id=_i6bDeoCQzsC&source=gbs_api"
                    }
                },
                { "volumeInfo": { "title": "Second result" } }
            ]
        });

        let partial = parse_volumes(&body).unwrap();
        assert_eq!(partial.title.as_deref(), Some("Clean Code"));
        assert_eq!(partial.authors.as_deref(), Some("Robert C. Martin, Dean Wampler"));
        assert_eq!(partial.page_count, Some(464));
        assert_eq!(partial.categories.as_deref(), Some("Computers"));
        assert_eq!(partial.average_rating, Some(4.5));
        assert_eq!(partial.ratings_count, Some(12));
        assert_eq!(partial.language.as_deref(), Some("en"));
        assert_eq!(partial.weight, None);
    }

    #[test]
    fn test_no_items_is_no_data() {
        assert_eq!(parse_volumes(&json!({"totalItems": 0})), None);
        assert_eq!(parse_volumes(&json!({"items": []})), None);
        assert_eq!(parse_volumes(&json!({"items": [{"id": "x"}]})), None);
        assert_eq!(parse_volumes(&json!([])), None);
    }

    #[test]
    fn test_malformed_field_keeps_siblings() {
        let body = json!({
            "items": [{
                "volumeInfo": {
                    "title": "Clean Code",
                    "authors": "Robert C. Martin",
                    "pageCount": "many",
                    "language": "en"
                }
            }]
        });

        let partial = parse_volumes(&body).unwrap();
        assert_eq!(partial.title.as_deref(), Some("Clean Code"));
        assert_eq!(partial.language.as_deref(), Some("en"));
        assert_eq!(partial.authors, None);
        assert_eq!(partial.page_count, None);
    }

    #[test]
    fn test_missing_categories_stay_absent() {
        let body = json!({"items": [{"volumeInfo": {"title": "Clean Code", "categories": []}}]});
        let partial = parse_volumes(&body).unwrap();
        assert_eq!(partial.categories, None);
    }
}
