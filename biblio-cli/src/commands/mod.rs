//! CLI command implementations

mod cached;
mod lookup;
mod warm;

pub use cached::cached;
pub use lookup::lookup;
pub use warm::warm;

use anyhow::{Context, Result};
use biblio_core::{isbn, BookInfo};

/// Normalize an ISBN argument or fail with a readable message
fn parse_isbn(raw: &str) -> Result<String> {
    isbn::normalize(raw).with_context(|| format!("'{}' is not a valid ISBN", raw))
}

/// Print a record as JSON or as aligned text
fn print_book_info(info: &BookInfo, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(info)?);
        return Ok(());
    }

    println!("ISBN:           {}", info.isbn);
    let text_fields = [
        ("Title", &info.title),
        ("Authors", &info.authors),
        ("Publisher", &info.publisher_name),
        ("Published", &info.published_date),
        ("Language", &info.language),
        ("Print type", &info.print_type),
        ("Categories", &info.categories),
        ("Weight", &info.weight),
        ("First sentence", &info.first_sentence),
        ("Description", &info.description),
        ("Preview", &info.preview_link),
        ("Info", &info.info_link),
    ];
    for (label, value) in text_fields {
        if let Some(value) = value {
            println!("{:<15} {}", format!("{}:", label), value);
        }
    }
    if let Some(pages) = info.page_count {
        println!("Pages:          {}", pages);
    }
    if let Some(rating) = info.average_rating {
        let count = info.ratings_count.unwrap_or(0);
        println!("Rating:         {} ({} ratings)", rating, count);
    }
    if let Some(subjects) = &info.subjects {
        println!("Subjects:       {}", subjects.join("; "));
    }
    if let Some(covers) = &info.cover_urls {
        for (size, url) in covers {
            println!("{:<15} {}", format!("Cover ({}):", size), url);
        }
    }

    Ok(())
}
