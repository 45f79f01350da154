use anyhow::Result;
use async_trait::async_trait;

use crate::models::{BookListing, BookRecord};

mod sqlite;
pub use sqlite::SqliteStorage;

/// The persisted book set. Append-only except for the bulk clear; duplicate
/// rows from repeated crawls are kept on purpose.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn migrate(&self) -> Result<()>;
    async fn insert_books(&self, books: &[BookListing]) -> Result<usize>;
    async fn recent_books(&self, limit: u32) -> Result<Vec<BookRecord>>;
    async fn all_books(&self) -> Result<Vec<BookRecord>>;
    async fn clear(&self) -> Result<()>;
}
