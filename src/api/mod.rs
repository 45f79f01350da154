use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::models::BookListing;
use crate::scrapers::crawl_listing;

/// Sentinel returned by /api/user-agent when the caller sent no header.
const NO_USER_AGENT: &str = "未檢測到 User-Agent";

#[derive(Clone)]
pub struct ApiState {
    pub client: Client,
    pub config: Arc<Config>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(console))
        .route("/api/crawl", post(api_crawl))
        .route("/api/user-agent", get(user_agent))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Static test console for exercising the API from a browser.
async fn console() -> Html<&'static str> {
    Html(include_str!("console.html"))
}

#[derive(Debug, Default, Deserialize)]
struct CrawlRequest {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct CrawlResponse {
    status: &'static str,
    message: String,
    user_agent_used: Option<String>,
    data: Vec<BookListing>,
}

/// Body may be JSON or an urlencoded form; anything else falls back to the
/// default listing URL.
fn requested_url(headers: &HeaderMap, body: &str) -> Option<String> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let request: CrawlRequest = if content_type.starts_with("application/json") {
        serde_json::from_str(body).unwrap_or_default()
    } else {
        serde_urlencoded::from_str(body).unwrap_or_default()
    };

    request.url.filter(|u| !u.is_empty())
}

/// Crawl using the caller's own User-Agent as the outbound identity.
///
/// The pass-through is deliberate: the caller decides what browser the fetch
/// looks like. Absent a header, the configured default identity is used.
async fn api_crawl(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let client_user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let url = requested_url(&headers, &body)
        .unwrap_or_else(|| state.config.default_listing_url.clone());

    info!(
        "API crawl of {} with User-Agent: {}",
        url,
        client_user_agent.as_deref().unwrap_or(NO_USER_AGENT)
    );

    let books = crawl_listing(&state.client, &url, client_user_agent.as_deref()).await;

    if books.is_empty() {
        let response = CrawlResponse {
            status: "error",
            message: "爬蟲失敗，請檢查URL或網路連接".to_string(),
            user_agent_used: client_user_agent,
            data: Vec::new(),
        };
        return (StatusCode::BAD_REQUEST, Json(response));
    }

    let response = CrawlResponse {
        status: "success",
        message: format!("成功爬取 {} 筆書籍資料", books.len()),
        user_agent_used: client_user_agent,
        data: books,
    };
    (StatusCode::OK, Json(response))
}

#[derive(Debug, Serialize)]
struct UserAgentResponse {
    #[serde(rename = "user-agent")]
    user_agent: String,
}

async fn user_agent(headers: HeaderMap) -> Json<UserAgentResponse> {
    let detected = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(NO_USER_AGENT)
        .to_string();

    Json(UserAgentResponse {
        user_agent: detected,
    })
}
