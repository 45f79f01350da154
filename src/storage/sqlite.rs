use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::models::{BookListing, BookRecord};
use crate::storage::Storage;

pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open SQLite database")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                link TEXT NOT NULL,
                author TEXT NOT NULL,
                price TEXT NOT NULL,
                crawl_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        info!("Database migration completed");
        Ok(())
    }

    async fn insert_books(&self, books: &[BookListing]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        for book in books {
            tx.execute(
                "INSERT INTO books (title, link, author, price) VALUES (?1, ?2, ?3, ?4)",
                params![&book.title, &book.link, &book.author, &book.price],
            )?;
        }

        tx.commit()?;
        Ok(books.len())
    }

    async fn recent_books(&self, limit: u32) -> Result<Vec<BookRecord>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, title, link, author, price, crawl_date
             FROM books ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    async fn all_books(&self) -> Result<Vec<BookRecord>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, title, link, author, price, crawl_date FROM books ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    async fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        let deleted = conn.execute("DELETE FROM books", [])?;
        info!("Cleared {} book rows", deleted);
        Ok(())
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<BookRecord> {
    Ok(BookRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        link: row.get(2)?,
        author: row.get(3)?,
        price: row.get(4)?,
        crawl_date: row.get(5)?,
    })
}
