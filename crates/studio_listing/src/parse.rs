//! Scraping a listing document into records
//!
//! The listing endpoint serves an HTML fragment meant for its own site, so
//! everything that depends on its markup lives in this one function.
//!
//! # Schema
//!
//! ```html
//! <li class="project thumb item" data-id="104">
//!   <a href="/projects/104/"><img class="lazy image" src="..."></a>
//!   <span class="title"><a href="/projects/104/">Pong</a></span>
//!   <span class="owner">by <a href="/users/ada/">ada</a></span>
//! </li>
//! ...
//! <a rel="next" href="?page=2">Next</a>
//! ```
//!
//! - every `.project` element is one record, in document order
//! - `id` is its `data-id` attribute
//! - `title` is the text of its first `.title` descendant
//! - `author` is the text of its first `.owner a` descendant
//! - the page has a successor when any `a[rel~=next]`, `link[rel~=next]`,
//!   or `[data-next-page]` element is present

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;
use crate::record::{ItemRecord, ListingPage};

const RECORD_SELECTOR: &str = ".project";
const TITLE_SELECTOR: &str = ".title";
const AUTHOR_SELECTOR: &str = ".owner a";
const NEXT_PAGE_SELECTOR: &str = r#"a[rel~="next"], link[rel~="next"], [data-next-page]"#;

fn selector(source: &str) -> Result<Selector, ParseError> {
    Selector::parse(source).map_err(|e| ParseError::Selector(format!("{source}: {e}")))
}

/// Trimmed text content with inner whitespace runs collapsed to one space
fn collapsed_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse one listing document
///
/// A document without any record elements is a valid, empty page.
pub fn parse_listing(document: &str) -> Result<ListingPage, ParseError> {
    let records_sel = selector(RECORD_SELECTOR)?;
    let title_sel = selector(TITLE_SELECTOR)?;
    let author_sel = selector(AUTHOR_SELECTOR)?;
    let next_sel = selector(NEXT_PAGE_SELECTOR)?;

    let html = Html::parse_document(document);

    let records = html
        .select(&records_sel)
        .enumerate()
        .map(|(index, element)| {
            let id = element
                .value()
                .attr("data-id")
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or(ParseError::MissingField {
                    index,
                    field: "data-id",
                })?;
            let title = element
                .select(&title_sel)
                .next()
                .map(collapsed_text)
                .ok_or(ParseError::MissingField {
                    index,
                    field: "title",
                })?;
            let author = element
                .select(&author_sel)
                .next()
                .map(collapsed_text)
                .ok_or(ParseError::MissingField {
                    index,
                    field: "author",
                })?;
            Ok(ItemRecord::new(id, title, author))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    let has_more = html.select(&next_sel).next().is_some();

    tracing::trace!(records = records.len(), has_more, "parsed listing page");

    Ok(ListingPage { records, has_more })
}
