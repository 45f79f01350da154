use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A single listing slide failed to yield a complete record.
///
/// These never leave the extractor: the affected slide is dropped and the
/// rest of the page still produces results.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("missing attribute: {0}")]
    MissingAttribute(&'static str),
    #[error("bad link: {0}")]
    BadLink(#[from] url::ParseError),
}

/// Wrapper turning internal errors (in practice: storage failures) into a
/// 500 response so handlers can use `?`.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "內部伺服器錯誤").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}
