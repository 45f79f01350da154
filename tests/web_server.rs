use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kingstone_books::config::Config;
use kingstone_books::storage::{SqliteStorage, Storage};
use kingstone_books::utils::http::create_client;
use kingstone_books::web::{self, WebState};

const LISTING_PAGE: &str = include_str!("fixtures/listing.html");

async fn test_state() -> (axum::Router, Arc<dyn Storage>) {
    let config = Arc::new(Config::load());
    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::in_memory().unwrap());
    storage.migrate().await.unwrap();
    let client = create_client(&config.user_agent).unwrap();

    let router = web::router(WebState {
        storage: storage.clone(),
        client,
        config,
    });
    (router, storage)
}

fn crawl_request(url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/crawl")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            serde_urlencoded::to_string([("url", url)]).unwrap(),
        ))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn crawl_persists_extracted_books_and_redirects() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&upstream)
        .await;

    let (router, storage) = test_state().await;
    let response = router
        .clone()
        .oneshot(crawl_request(&format!("{}/book/list", upstream.uri())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    // The malformed middle slide is skipped; the two good ones land in order.
    let rows = storage.all_books().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "深度學習的數學地圖");
    assert_eq!(rows[1].title, "寫給大家的統計學");

    // A second crawl appends, it does not dedup.
    router
        .clone()
        .oneshot(crawl_request(&format!("{}/book/list", upstream.uri())))
        .await
        .unwrap();
    assert_eq!(storage.all_books().await.unwrap().len(), 4);
}

#[tokio::test]
async fn crawl_of_an_unreachable_page_is_a_400() {
    let (router, storage) = test_state().await;

    // Nothing listens on this port.
    let response = router
        .oneshot(crawl_request("http://127.0.0.1:9/book/list"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert_eq!(body, "爬蟲失敗，請檢查URL或網路連接");
    assert!(storage.all_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn index_lists_persisted_books_most_recent_first() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&upstream)
        .await;

    let (router, _storage) = test_state().await;
    router
        .clone()
        .oneshot(crawl_request(&format!("{}/book/list", upstream.uri())))
        .await
        .unwrap();

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    let first = html.find("寫給大家的統計學").unwrap();
    let second = html.find("深度學習的數學地圖").unwrap();
    assert!(first < second, "newest row should come first");
    assert!(html.contains("萬木"));
    assert!(html.contains("490"));
}

#[tokio::test]
async fn export_of_an_empty_store_fails_with_400() {
    let (router, _storage) = test_state().await;

    let response = router
        .oneshot(Request::builder().uri("/export").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "導出失敗，可能沒有數據");
}

#[tokio::test]
async fn export_downloads_a_csv_of_the_full_set() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&upstream)
        .await;

    let (router, _storage) = test_state().await;
    router
        .clone()
        .oneshot(crawl_request(&format!("{}/book/list", upstream.uri())))
        .await
        .unwrap();

    let response = router
        .oneshot(Request::builder().uri("/export").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename*=UTF-8''"));

    let csv = body_string(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "書名,連結,作者,價格");
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn clear_db_empties_the_store_and_redirects() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&upstream)
        .await;

    let (router, storage) = test_state().await;
    router
        .clone()
        .oneshot(crawl_request(&format!("{}/book/list", upstream.uri())))
        .await
        .unwrap();
    assert!(!storage.all_books().await.unwrap().is_empty());

    let response = router
        .oneshot(
            Request::builder()
                .uri("/clear_db")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(storage.all_books().await.unwrap().is_empty());
}
