//! Provider adapters and the aggregator against mocked catalog endpoints.

use std::sync::Arc;

use lumina_core::aggregate::Aggregator;
use lumina_core::lookup::google_books::GoogleBooksProvider;
use lumina_core::lookup::gutendex::GutendexProvider;
use lumina_core::lookup::{LookupOptions, PublicDomainCatalog, VolumeCatalog, POPULAR};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn google_volumes() -> serde_json::Value {
    json!({
        "kind": "books#volumes",
        "totalItems": 3,
        "items": [
            {
                "id": "g-moby",
                "etag": "e1",
                "selfLink": "https://www.googleapis.com/books/v1/volumes/g-moby",
                "volumeInfo": {
                    "title": "Moby Dick",
                    "authors": ["Herman Melville"],
                    "imageLinks": {"thumbnail": "http://books.google.com/moby.jpg"}
                },
                "accessInfo": {"viewability": "ALL_PAGES", "publicDomain": true}
            },
            {
                "id": "g-blocked",
                "volumeInfo": {"title": "Blocked"},
                "accessInfo": {"viewability": "NO_PAGES"}
            },
            {
                "id": "g-anon",
                "volumeInfo": {"title": "Beowulf"},
                "accessInfo": {"viewability": "PARTIAL"}
            }
        ]
    })
}

fn gutendex_page() -> serde_json::Value {
    json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 2701,
                "title": "Moby Dick; Or, The Whale",
                "authors": [{"name": "Melville, Herman"}],
                "subjects": ["Whaling -- Fiction"],
                "languages": ["en"],
                "formats": {"text/html": "https://www.gutenberg.org/ebooks/2701.html.images"}
            },
            {
                "id": 84,
                "title": "  moby dick ",
                "authors": [],
                "subjects": [],
                "languages": ["en"],
                "formats": {}
            }
        ]
    })
}

async fn google_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_volumes()))
        .mount(&server)
        .await;
    server
}

async fn gutendex_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gutendex_page()))
        .mount(&server)
        .await;
    server
}

async fn failing_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn google_books_sends_filters_and_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "subject:Horror"))
        .and(query_param("filter", "free-ebooks"))
        .and(query_param("printType", "books"))
        .and(query_param("langRestrict", "en"))
        .and(query_param("maxResults", "6"))
        .and(query_param("startIndex", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_volumes()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GoogleBooksProvider::new().with_base_url(server.uri());
    let books = provider.fetch("subject:Horror", LookupOptions::new(12, 6)).await;
    let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["g-moby", "g-anon"]);
    assert_eq!(books[1].volume_info.authors, vec!["Unknown Author"]);
}

#[tokio::test]
async fn google_books_failures_become_empty() {
    let server = failing_server(503).await;
    let provider = GoogleBooksProvider::new().with_base_url(server.uri());
    assert!(provider.fetch("x", LookupOptions::default()).await.is_empty());
    assert!(provider.try_fetch("x", LookupOptions::default()).await.is_err());

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let provider = GoogleBooksProvider::new().with_base_url(server.uri());
    assert!(provider.fetch("x", LookupOptions::default()).await.is_empty());

    let unreachable = GoogleBooksProvider::new().with_base_url("http://127.0.0.1:1");
    assert!(unreachable.fetch("x", LookupOptions::default()).await.is_empty());
}

#[tokio::test]
async fn gutendex_searches_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .and(query_param("search", "moby dick"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gutendex_page()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GutendexProvider::new().with_base_url(server.uri());
    let books = provider.fetch("moby dick").await;
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].id, "gutendex-2701");
    assert_eq!(books[1].volume_info.authors, vec!["Unknown Author"]);
}

#[tokio::test]
async fn gutendex_popular_uses_root_listing() {
    let server = gutendex_server().await;
    let provider = GutendexProvider::new().with_base_url(server.uri());
    let books = provider.fetch(POPULAR).await;
    assert_eq!(books.len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/books");
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn gutendex_failures_become_empty() {
    let server = failing_server(500).await;
    let provider = GutendexProvider::new().with_base_url(server.uri());
    assert!(provider.fetch("x").await.is_empty());
}

#[tokio::test]
async fn search_merges_google_first_and_dedups() {
    let google = google_server().await;
    let gutendex = gutendex_server().await;
    let agg = Aggregator::new(
        Arc::new(GoogleBooksProvider::new().with_base_url(google.uri())),
        Arc::new(GutendexProvider::new().with_base_url(gutendex.uri())),
    );

    let books = agg.search("moby dick").await;
    let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
    // "Moby Dick; Or, The Whale" has a different key; " moby dick " collapses into g-moby.
    assert_eq!(ids, vec!["g-moby", "g-anon", "gutendex-2701"]);
}

#[tokio::test]
async fn search_keeps_google_results_when_gutendex_is_down() {
    let google = google_server().await;
    let gutendex = failing_server(502).await;
    let agg = Aggregator::new(
        Arc::new(GoogleBooksProvider::new().with_base_url(google.uri())),
        Arc::new(GutendexProvider::new().with_base_url(gutendex.uri())),
    );
    let ids: Vec<_> = agg.search("moby").await.into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["g-moby".to_string(), "g-anon".to_string()]);
}

#[tokio::test]
async fn trending_never_searches_for_popular() {
    let google = google_server().await;
    let gutendex = gutendex_server().await;
    let agg = Aggregator::new(
        Arc::new(GoogleBooksProvider::new().with_base_url(google.uri())),
        Arc::new(GutendexProvider::new().with_base_url(gutendex.uri())),
    );

    let books = agg.trending().await;
    let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["gutendex-2701", "gutendex-84", "g-moby", "g-anon"]);

    for request in gutendex.received_requests().await.unwrap() {
        assert!(request.url.query_pairs().all(|(k, _)| k != "search"));
    }
    let google_requests = google.received_requests().await.unwrap();
    assert_eq!(google_requests.len(), 1);
    let pairs: Vec<(String, String)> = google_requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("q".to_string(), "classic fiction".to_string())));
    assert!(pairs.contains(&("maxResults".to_string(), "20".to_string())));
}
