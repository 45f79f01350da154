use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One book pulled out of a listing slide.
///
/// `price` is the display string as it appears on the page (e.g. "79折"
/// promotions render several nested spans; we keep the selected one verbatim).
/// It is never parsed into a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookListing {
    pub title: String,
    pub link: String,
    pub author: String,
    pub price: String,
}

/// A persisted book row. Duplicates across crawls are intentional — the table
/// doubles as a crawl history, so there is no uniqueness key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub author: String,
    pub price: String,
    pub crawl_date: NaiveDateTime,
}
