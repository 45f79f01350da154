use anyhow::Result;

use crate::models::BookRecord;

/// File name offered in the download, matching the original export.
pub const EXPORT_FILENAME: &str = "金石堂書單.csv";

/// Serialize the persisted set to CSV with the display column names.
///
/// Returns `None` for an empty set — the caller reports the export as failed
/// rather than producing an empty file.
pub fn books_to_csv(books: &[BookRecord]) -> Result<Option<Vec<u8>>> {
    if books.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["書名", "連結", "作者", "價格"])?;

    for book in books {
        writer.write_record([&book.title, &book.link, &book.author, &book.price])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;

    Ok(Some(bytes))
}
