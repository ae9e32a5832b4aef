//! Data models for extracted search results.
//!
//! Two representations exist, mirroring the two halves of the pipeline:
//!
//! - [`ArticleRecord`]: one result-list entry with its date already resolved
//!   to a timestamp. Immutable once built; records keep page-then-listing
//!   order, which approximates descending recency because results are
//!   sorted newest-first upstream.
//! - [`EnrichedRecord`]: an [`ArticleRecord`] plus the derived search-phrase
//!   statistics and currency-mention flag. Derived, never mutated.

use chrono::NaiveDateTime;

/// One article extracted from a search results page.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    /// Publication timestamp, normalized from the listing's date text.
    pub published_at: NaiveDateTime,
    /// The article headline.
    pub title: String,
    /// The promo description shown under the headline.
    pub description: String,
    /// Absolute URL of the promo image.
    pub image_url: String,
}

/// An [`ArticleRecord`] with its derived spreadsheet columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    /// The base extracted record.
    pub article: ArticleRecord,
    /// The phrase this run searched for.
    pub search_phrase: String,
    /// Case-insensitive occurrences of the phrase in title plus description.
    pub search_phrase_count: usize,
    /// Whether title + description mention an amount of money.
    pub has_money: bool,
}
