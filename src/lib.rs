//! Kingstone book-listing scraper.
//!
//! The core is [`scrapers::extract_books`], which pulls book records out of
//! the listing page's carousel markup. Two servers wrap it: a stateful web
//! UI (`bin/web`) that persists results in SQLite, and a stateless JSON API
//! (`bin/api`) that crawls with the caller's own User-Agent.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod scrapers;
pub mod storage;
pub mod utils;
pub mod web;
