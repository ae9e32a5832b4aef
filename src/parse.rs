//! Results-page parsing.
//!
//! Takes the rendered markup of the search-results list (the
//! `ul.search-results-module-results-menu` element) and extracts one
//! [`ResultEntry`] per `li`, in listing order. Each entry must expose all
//! four promo sub-fields; a missing one is a
//! [`ScrapeError::FieldExtraction`], surfaced at construction time rather
//! than deep in downstream processing.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::ScrapeError;

static ENTRY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static TIMESTAMP_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.promo-timestamp").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3.promo-title").unwrap());
static DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.promo-description").unwrap());
static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img.image").unwrap());

/// One result-list entry with its raw sub-fields, date still unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    /// Raw date text as shown in the listing (e.g. `"Aug. 3, 2023"`).
    pub date_text: String,
    /// Headline text.
    pub title: String,
    /// Promo description text.
    pub description: String,
    /// Value of the promo image's `src` attribute.
    pub image_url: String,
}

/// Parse one page's results-list markup into ordered entries.
///
/// Entries come out in the same order they appear in the markup; nothing is
/// reordered or deduplicated. The first entry missing a required sub-field
/// fails the whole page.
pub fn parse_results(html: &str) -> Result<Vec<ResultEntry>, ScrapeError> {
    let fragment = Html::parse_fragment(html);
    let mut entries = Vec::new();

    for li in fragment.select(&ENTRY_SELECTOR) {
        entries.push(parse_entry(li)?);
    }

    debug!(count = entries.len(), "Parsed result entries from page");
    Ok(entries)
}

fn parse_entry(li: ElementRef<'_>) -> Result<ResultEntry, ScrapeError> {
    let date_text = text_of(li, &TIMESTAMP_SELECTOR, "timestamp")?;
    let title = text_of(li, &TITLE_SELECTOR, "title")?;
    let description = text_of(li, &DESCRIPTION_SELECTOR, "description")?;

    let image_url = li
        .select(&IMAGE_SELECTOR)
        .next()
        .and_then(|img| img.value().attr("src"))
        .ok_or(ScrapeError::FieldExtraction { field: "image" })?
        .to_string();

    Ok(ResultEntry {
        date_text,
        title,
        description,
        image_url,
    })
}

fn text_of(
    li: ElementRef<'_>,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ScrapeError> {
    let element = li
        .select(selector)
        .next()
        .ok_or(ScrapeError::FieldExtraction { field })?;
    Ok(element.text().collect::<Vec<_>>().join(" ").trim().to_string())
}
