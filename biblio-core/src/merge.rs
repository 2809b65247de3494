//! Field-level merge of per-source partial records

use crate::types::{BookInfo, PartialBookInfo};

/// Combine the primary (Google Books) and secondary (Open Library) partials
///
/// For every field the primary value wins when present and the secondary
/// only fills gaps. With neither source present the result carries the ISBN
/// and nothing else.
pub fn merge(
    isbn: &str,
    primary: Option<PartialBookInfo>,
    secondary: Option<PartialBookInfo>,
) -> BookInfo {
    let a = primary.unwrap_or_default();
    let b = secondary.unwrap_or_default();

    BookInfo {
        isbn: isbn.to_string(),
        title: a.title.or(b.title),
        description: a.description.or(b.description),
        authors: a.authors.or(b.authors),
        published_date: a.published_date.or(b.published_date),
        page_count: a.page_count.or(b.page_count),
        language: a.language.or(b.language),
        print_type: a.print_type.or(b.print_type),
        categories: a.categories.or(b.categories),
        average_rating: a.average_rating.or(b.average_rating),
        ratings_count: a.ratings_count.or(b.ratings_count),
        preview_link: a.preview_link.or(b.preview_link),
        info_link: a.info_link.or(b.info_link),
        weight: a.weight.or(b.weight),
        subjects: a.subjects.or(b.subjects),
        publisher_name: a.publisher_name.or(b.publisher_name),
        first_sentence: a.first_sentence.or(b.first_sentence),
        identifiers: a.identifiers.or(b.identifiers),
        cover_urls: a.cover_urls.or(b.cover_urls),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    const ISBN: &str = "9780132350884";

    #[test]
    fn test_primary_wins_secondary_fills() {
        let a = PartialBookInfo {
            title: Some("X".to_string()),
            ..Default::default()
        };
        let b = PartialBookInfo {
            title: Some("Y".to_string()),
            weight: Some("300g".to_string()),
            ..Default::default()
        };

        let merged = merge(ISBN, Some(a), Some(b));
        assert_eq!(merged.title.as_deref(), Some("X"));
        assert_eq!(merged.weight.as_deref(), Some("300g"));
        assert_eq!(merged.authors, None);
    }

    #[test]
    fn test_secondary_only() {
        let b = PartialBookInfo {
            title: Some("Clean Code".to_string()),
            authors: Some("Robert C. Martin".to_string()),
            subjects: Some(vec!["Software".to_string()]),
            cover_urls: Some(BTreeMap::from([(
                "small".to_string(),
                "https://covers.example/s.jpg".to_string(),
            )])),
            ..Default::default()
        };

        let merged = merge(ISBN, None, Some(b.clone()));
        assert_eq!(
            merged,
            BookInfo {
                isbn: ISBN.to_string(),
                title: b.title,
                authors: b.authors,
                subjects: b.subjects,
                cover_urls: b.cover_urls,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_both_absent_only_isbn() {
        let merged = merge(ISBN, None, None);
        assert_eq!(merged, BookInfo::new(ISBN));
        assert!(!merged.has_title());
    }

    fn opt_text() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z]{1,8}")
    }

    proptest! {
        #[test]
        fn prop_each_field_prefers_primary(
            a_title in opt_text(),
            b_title in opt_text(),
            a_authors in opt_text(),
            b_authors in opt_text(),
            a_pages in proptest::option::of(1u32..2000),
            b_pages in proptest::option::of(1u32..2000),
        ) {
            let a = PartialBookInfo {
                title: a_title.clone(),
                authors: a_authors.clone(),
                page_count: a_pages,
                ..Default::default()
            };
            let b = PartialBookInfo {
                title: b_title.clone(),
                authors: b_authors.clone(),
                page_count: b_pages,
                ..Default::default()
            };

            let merged = merge(ISBN, Some(a), Some(b));
            prop_assert_eq!(merged.title, a_title.or(b_title));
            prop_assert_eq!(merged.authors, a_authors.or(b_authors));
            prop_assert_eq!(merged.page_count, a_pages.or(b_pages));
            prop_assert_eq!(merged.isbn, ISBN);
        }
    }
}
