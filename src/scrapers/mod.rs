mod kingstone;

pub use kingstone::{crawl_listing, extract_books, KINGSTONE_ORIGIN};
