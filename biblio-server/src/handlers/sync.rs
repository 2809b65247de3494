//! Server-Sent Events handler for real-time updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// SSE endpoint announcing newly cached book info
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| match result {
        Ok(ServerEvent::BookInfoCached {
            isbn,
            title,
            cached_at,
        }) => {
            let data = serde_json::json!({
                "isbn": isbn,
                "title": title,
                "cached_at": cached_at.to_rfc3339(),
            });
            Some(Ok(Event::default()
                .event("book_info_cached")
                .data(data.to_string())))
        }
        Err(_) => None, // Lagged, skip
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
