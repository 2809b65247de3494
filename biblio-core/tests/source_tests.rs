//! Adapter tests against in-process upstream fixtures
//!
//! Starts axum servers that mimic the Google Books and Open Library APIs and
//! exercises the real reqwest-based adapters against them.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use biblio_core::sources::{build_client, GoogleBooks, OpenLibrary};
use biblio_core::{BookInfoService, Config, FileCache, Lookup, MetadataSource};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const CLEAN_CODE: &str = "9780132350884";

/// Bind to port 0, serve the router, and return the base URL
async fn start_fixture(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client() -> reqwest::Client {
    build_client(Duration::from_secs(5)).unwrap()
}

fn volumes_response(q: &str) -> Value {
    if q != format!("isbn:{CLEAN_CODE}") {
        return json!({"kind": "books#volumes", "totalItems": 0});
    }
    json!({
        "kind": "books#volumes",
        "totalItems": 1,
        "items": [{
            "volumeInfo": {
                "title": "Clean Code",
                "authors": ["Robert C. Martin"],
                "publishedDate": "2008-08-01",
                "pageCount": 464,
                "printType": "BOOK",
                "language": "en"
            }
        }]
    })
}

fn books_response(bibkeys: &str) -> Value {
    if bibkeys != format!("ISBN:{CLEAN_CODE}") {
        return json!({});
    }
    let mut body = serde_json::Map::new();
    body.insert(
        bibkeys.to_string(),
        json!({
            "title": "Clean code",
            "weight": "1.2 lbs",
            "publishers": [{"name": "Prentice Hall"}],
            "cover": {"medium": "https://covers.openlibrary.org/b/id/8085016-M.jpg"}
        }),
    );
    Value::Object(body)
}

/// Router serving both upstreams, counting every request
fn upstreams(hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/books/v1/volumes",
            get(
                |State(hits): State<Arc<AtomicUsize>>,
                 Query(params): Query<HashMap<String, String>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(volumes_response(params.get("q").map(String::as_str).unwrap_or("")))
                },
            ),
        )
        .route(
            "/api/books",
            get(
                |State(hits): State<Arc<AtomicUsize>>,
                 Query(params): Query<HashMap<String, String>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(books_response(
                        params.get("bibkeys").map(String::as_str).unwrap_or(""),
                    ))
                },
            ),
        )
        .with_state(hits)
}

fn google_template(base: &str) -> String {
    format!("{base}/books/v1/volumes?q=isbn:")
}

fn open_library_template(base: &str) -> String {
    format!("{base}/api/books?bibkeys=ISBN:{{isbn}}&format=json&jscmd=data")
}

// =============================================================================
// Adapters
// =============================================================================

#[tokio::test]
async fn test_google_books_adapter() {
    let base = start_fixture(upstreams(Arc::default())).await;
    let source = GoogleBooks::new(client(), google_template(&base));

    let partial = source.fetch(CLEAN_CODE).await.unwrap();
    assert_eq!(partial.title.as_deref(), Some("Clean Code"));
    assert_eq!(partial.page_count, Some(464));

    assert_eq!(source.fetch("0000000000").await, None);
}

#[tokio::test]
async fn test_open_library_adapter() {
    let base = start_fixture(upstreams(Arc::default())).await;
    let source = OpenLibrary::new(client(), open_library_template(&base));

    let partial = source.fetch(CLEAN_CODE).await.unwrap();
    assert_eq!(partial.weight.as_deref(), Some("1.2 lbs"));
    assert_eq!(partial.publisher_name.as_deref(), Some("Prentice Hall"));

    assert_eq!(source.fetch("0000000000").await, None);
}

#[tokio::test]
async fn test_server_error_is_no_data() {
    let app = Router::new().route(
        "/books/v1/volumes",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    );
    let base = start_fixture(app).await;
    let source = GoogleBooks::new(client(), google_template(&base));

    assert_eq!(source.fetch(CLEAN_CODE).await, None);
}

#[tokio::test]
async fn test_non_json_body_is_no_data() {
    let app = Router::new().route("/api/books", get(|| async { "<html>maintenance</html>" }));
    let base = start_fixture(app).await;
    let source = OpenLibrary::new(client(), open_library_template(&base));

    assert_eq!(source.fetch(CLEAN_CODE).await, None);
}

#[tokio::test]
async fn test_unreachable_upstream_is_no_data() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = GoogleBooks::new(client(), format!("http://{addr}/volumes?q=isbn:"));
    assert_eq!(source.fetch(CLEAN_CODE).await, None);
}

// =============================================================================
// Service over HTTP
// =============================================================================

fn config_for(base: &str, cache_path: &std::path::Path) -> Config {
    Config {
        google_books_url: google_template(base),
        open_library_url: open_library_template(base),
        fetch_timeout: Duration::from_secs(5),
        cache_path: cache_path.to_path_buf(),
    }
}

#[tokio::test]
async fn test_service_end_to_end_over_http() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = start_fixture(upstreams(hits.clone())).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&base, dir.path());

    let cache = Arc::new(FileCache::open(&config.cache_path).await.unwrap());
    let service = BookInfoService::from_config(&config, cache).unwrap();

    let Lookup::Fetched(first) = service.lookup(CLEAN_CODE).await.unwrap() else {
        panic!("expected a fetched record");
    };
    assert_eq!(first.title.as_deref(), Some("Clean Code"));
    assert_eq!(first.authors.as_deref(), Some("Robert C. Martin"));
    assert_eq!(first.weight.as_deref(), Some("1.2 lbs"));
    assert_eq!(first.publisher_name.as_deref(), Some("Prentice Hall"));
    assert_eq!(first.categories, None);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(dir.path().join(format!("{CLEAN_CODE}.json")).exists());

    let second = service.lookup(CLEAN_CODE).await.unwrap();
    assert_eq!(second, Lookup::Cached(first));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_service_survives_slow_primary() {
    let app = Router::new()
        .route(
            "/books/v1/volumes",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Json(volumes_response(&format!("isbn:{CLEAN_CODE}")))
            }),
        )
        .route(
            "/api/books",
            get(|| async { Json(books_response(&format!("ISBN:{CLEAN_CODE}"))) }),
        );
    let base = start_fixture(app).await;
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        fetch_timeout: Duration::from_millis(300),
        ..config_for(&base, dir.path())
    };

    let cache = Arc::new(FileCache::open(&config.cache_path).await.unwrap());
    let service = BookInfoService::from_config(&config, cache).unwrap();

    let info = service.get_book_info(CLEAN_CODE).await.unwrap().unwrap();
    assert_eq!(info.title.as_deref(), Some("Clean code"));
    assert_eq!(info.weight.as_deref(), Some("1.2 lbs"));
    assert_eq!(info.page_count, None);
}
