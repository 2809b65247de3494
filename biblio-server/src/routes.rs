//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the CORS layer
///
/// BIBLIO_CORS_ORIGINS can be a comma-separated list of origins, or "*" for any
fn cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);

    match std::env::var("BIBLIO_CORS_ORIGINS").ok() {
        Some(origins) if origins == "*" => base.allow_origin(Any),
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            base.allow_origin(AllowOrigin::list(allowed))
        }
        // Default: allow localhost origins for development
        None => base.allow_origin(AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ])),
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/books/:isbn/info", get(handlers::get_book_info))
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}
