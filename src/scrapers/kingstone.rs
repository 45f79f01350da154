use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, info};
use url::Url;

use crate::error::ItemError;
use crate::models::BookListing;

/// Origin the listing page's relative hrefs are resolved against.
pub const KINGSTONE_ORIGIN: &str = "https://www.kingstone.com.tw";

// Selectors tied to the current Kingstone carousel markup. If the site
// restructures, extraction silently degrades to fewer (or zero) items;
// that is the expected failure mode, not a crash.
static SLIDE: Lazy<Selector> = Lazy::new(|| Selector::parse("li.embla__slide").unwrap());
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.pdnamebox.height2 a").unwrap());
static AUTHOR_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("div.author a").unwrap());
static PRICESET: Lazy<Selector> = Lazy::new(|| Selector::parse("div.priceset").unwrap());
static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());

/// Extract every well-formed book slide from the listing markup.
///
/// Each slide is attempted independently; a slide whose structure does not
/// match contributes nothing and the rest of the page still comes through.
/// Output order is document order.
pub fn extract_books(html: &str, base_url: &str) -> Vec<BookListing> {
    let document = Html::parse_document(html);

    document
        .select(&SLIDE)
        .filter_map(|slide| match extract_book(slide, base_url) {
            Ok(book) => Some(book),
            Err(e) => {
                debug!("Skipping malformed book slide: {}", e);
                None
            }
        })
        .collect()
}

/// Pull the four fields out of a single slide, failing on the first missing
/// piece. No partial records are produced.
fn extract_book(slide: ElementRef<'_>, base_url: &str) -> Result<BookListing, ItemError> {
    let title_link = slide
        .select(&TITLE_LINK)
        .next()
        .ok_or(ItemError::MissingElement("h3.pdnamebox a"))?;

    let title = title_link.text().collect::<String>().trim().to_string();

    let href = title_link
        .value()
        .attr("href")
        .ok_or(ItemError::MissingAttribute("href"))?;
    let link = Url::parse(base_url)?.join(href)?.to_string();

    let author = slide
        .select(&AUTHOR_LINK)
        .next()
        .ok_or(ItemError::MissingElement("div.author a"))?
        .text()
        .collect::<String>();

    // The discounted price lives in the third descendant span of the
    // priceset block, inside its first nested span. Positional on purpose:
    // the site gives these spans no usable classes.
    let priceset = slide
        .select(&PRICESET)
        .next()
        .ok_or(ItemError::MissingElement("div.priceset"))?;
    let price_slot = priceset
        .select(&SPAN)
        .nth(2)
        .ok_or(ItemError::MissingElement("priceset span[2]"))?;
    let price = price_slot
        .select(&SPAN)
        .next()
        .ok_or(ItemError::MissingElement("priceset span[2] span"))?
        .text()
        .collect::<String>();

    Ok(BookListing {
        title,
        link,
        author,
        price,
    })
}

/// Fetch `url` and run extraction over the response body.
///
/// `user_agent` overrides the client's default identity for this one request
/// (the API server forwards the caller's own User-Agent here). Fetch and
/// HTTP-status failures are logged and collapse to an empty result — the
/// caller only ever sees "no books".
pub async fn crawl_listing(client: &Client, url: &str, user_agent: Option<&str>) -> Vec<BookListing> {
    let mut request = client.get(url);
    if let Some(ua) = user_agent {
        request = request.header(reqwest::header::USER_AGENT, ua);
    }

    let html = match request.send().await {
        Ok(response) => {
            if !response.status().is_success() {
                error!("HTTP error {} fetching {}", response.status(), url);
                return Vec::new();
            }
            match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    error!("Failed to read body from {}: {}", url, e);
                    return Vec::new();
                }
            }
        }
        Err(e) => {
            error!("Request failed for {}: {}", url, e);
            return Vec::new();
        }
    };

    let books = extract_books(&html, KINGSTONE_ORIGIN);
    info!("Found {} book items on {}", books.len(), url);
    books
}
