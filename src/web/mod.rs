use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::export::{books_to_csv, EXPORT_FILENAME};
use crate::scrapers::crawl_listing;
use crate::storage::Storage;

mod pages;

/// Rows shown on the index page.
const INDEX_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct WebState {
    pub storage: Arc<dyn Storage>,
    pub client: Client,
    pub config: Arc<Config>,
}

pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/crawl", post(crawl))
        .route("/export", get(export))
        .route("/clear_db", get(clear_db))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<WebState>) -> Result<Html<String>, AppError> {
    let books = state.storage.recent_books(INDEX_LIMIT).await?;
    Ok(Html(pages::render_index(&books)))
}

#[derive(Debug, Deserialize)]
struct CrawlForm {
    url: Option<String>,
}

async fn crawl(
    State(state): State<WebState>,
    Form(form): Form<CrawlForm>,
) -> Result<Response, AppError> {
    let url = form
        .url
        .unwrap_or_else(|| state.config.default_listing_url.clone());

    let books = crawl_listing(&state.client, &url, None).await;
    if books.is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "爬蟲失敗，請檢查URL或網路連接").into_response());
    }

    let count = state.storage.insert_books(&books).await?;
    info!("Saved {} books from {}", count, url);

    Ok(Redirect::to("/").into_response())
}

async fn export(State(state): State<WebState>) -> Result<Response, AppError> {
    let books = state.storage.all_books().await?;

    match books_to_csv(&books)? {
        None => Ok((StatusCode::BAD_REQUEST, "導出失敗，可能沒有數據").into_response()),
        Some(bytes) => {
            // RFC 5987 encoding, the file name is not ASCII.
            let filename = utf8_percent_encode(EXPORT_FILENAME, NON_ALPHANUMERIC);
            let headers = [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename*=UTF-8''{filename}"),
                ),
            ];
            Ok((headers, bytes).into_response())
        }
    }
}

async fn clear_db(State(state): State<WebState>) -> Result<Redirect, AppError> {
    state.storage.clear().await?;
    Ok(Redirect::to("/"))
}
