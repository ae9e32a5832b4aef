//! Record enrichment: derived search-phrase and currency columns.
//!
//! For every extracted record this computes:
//!
//! - `search_phrase_count`: case-insensitive, non-overlapping occurrences of
//!   the phrase in the title, plus the same count over the description. The
//!   two counts are summed, not deduplicated across fields.
//! - `has_money`: whether `"{title} {description}"` mentions an amount of
//!   money — a dollar-sign-prefixed number (optional decimal fraction) or a
//!   number followed by `dollars` or `USD`. An existence check, not a count.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{ArticleRecord, EnrichedRecord};

static MONEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\d+(?:\.\d+)?|\d+(?:,\d+)?\s?(?:dollars|USD)").unwrap());

/// Derive the enrichment columns for every record.
///
/// Pure over its inputs, so enriching the same base records twice with the
/// same phrase yields identical derived columns.
pub fn enrich(records: Vec<ArticleRecord>, search_phrase: &str) -> Vec<EnrichedRecord> {
    let enriched: Vec<EnrichedRecord> = records
        .into_iter()
        .map(|article| {
            let search_phrase_count = phrase_count(&article.title, search_phrase)
                + phrase_count(&article.description, search_phrase);
            let combined = format!("{} {}", article.title, article.description);
            let has_money = MONEY_REGEX.is_match(&combined);
            EnrichedRecord {
                article,
                search_phrase: search_phrase.to_string(),
                search_phrase_count,
                has_money,
            }
        })
        .collect();

    debug!(
        count = enriched.len(),
        search_phrase, "Enriched extracted records"
    );
    enriched
}

/// Non-overlapping, case-insensitive substring count.
fn phrase_count(text: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(&phrase.to_lowercase()).count()
}
