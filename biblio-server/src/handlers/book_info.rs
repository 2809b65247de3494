//! Book info lookup handler

use crate::error::ApiError;
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, State},
    Json,
};
use biblio_core::{isbn, BookInfo, Lookup};

/// Get enriched metadata for an ISBN
///
/// Served from the cache when possible; otherwise fetched from the upstreams
/// and cached if a title was found.
pub async fn get_book_info(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<BookInfo>, ApiError> {
    let isbn = isbn::normalize(&raw).ok_or(ApiError::InvalidIsbn(raw))?;

    match state.book_info.lookup(&isbn).await? {
        Lookup::Cached(info) => Ok(Json(info)),
        Lookup::Fetched(info) => {
            state.broadcast(ServerEvent::BookInfoCached {
                isbn: info.isbn.clone(),
                title: info.title.clone().unwrap_or_default(),
                cached_at: chrono::Utc::now(),
            });
            Ok(Json(info))
        }
        Lookup::NotFound => Err(ApiError::NoInfo(isbn)),
    }
}
