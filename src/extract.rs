//! Pagination control: walking paged search results until a stop condition.
//!
//! [`extract`] is a pure fold over a [`PageProvider`], the capability that
//! abstracts the browser's "give me the current results / advance to the
//! next page" behavior. Keeping the loop provider-agnostic means the whole
//! termination policy is testable with a fake provider and static markup.
//!
//! Three things end a run:
//!
//! 1. **Date cutoff** — the first record whose normalized date is strictly
//!    below the cutoff stops extraction for the whole run. That record and
//!    everything after it on the current page are discarded, and no further
//!    pages are requested. Records exactly on the cutoff are kept.
//! 2. **Last page** — the provider reports that no next-page control exists.
//! 3. **Page limit** — after `max_pages` pages the accumulator is returned
//!    as-is. Deeper pagination requires a subscription, so the truncation is
//!    silent.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::dates;
use crate::error::ScrapeError;
use crate::models::ArticleRecord;
use crate::parse;

/// Pages available without a subscription.
pub const DEFAULT_MAX_PAGES: usize = 9;

/// Capability interface over the browser's paged results view.
///
/// `results_html` yields the rendered markup of the current results list,
/// blocking (bounded) until it is present. `advance` requests the next page
/// and returns `false` when no next-page control exists, i.e. the last
/// reachable page has been consumed.
#[allow(async_fn_in_trait)]
pub trait PageProvider {
    async fn results_html(&mut self) -> Result<String, ScrapeError>;
    async fn advance(&mut self) -> Result<bool, ScrapeError>;
}

/// Walk result pages, folding entries into records until a stop condition.
///
/// The cutoff is the first day of the month `months_back` months before
/// `now`; see [`dates::cutoff`]. Date or field extraction failures abort the
/// run with the corresponding [`ScrapeError`].
pub async fn extract<P: PageProvider>(
    provider: &mut P,
    months_back: u32,
    max_pages: usize,
    now: NaiveDateTime,
) -> Result<Vec<ArticleRecord>, ScrapeError> {
    let cutoff = dates::cutoff(now, months_back);
    info!(%cutoff, months_back, max_pages, "Starting result extraction");

    let mut records: Vec<ArticleRecord> = Vec::new();

    for page in 0..max_pages {
        let html = provider.results_html().await?;
        let entries = parse::parse_results(&html)?;
        debug!(page, count = entries.len(), "Processing result page");

        for entry in entries {
            let published_at = dates::normalize(&entry.date_text, now)?;
            if published_at < cutoff {
                info!(
                    %published_at,
                    %cutoff,
                    pages_visited = page + 1,
                    records = records.len(),
                    "Reached cutoff date, stopping extraction"
                );
                return Ok(records);
            }
            records.push(ArticleRecord {
                published_at,
                title: entry.title,
                description: entry.description,
                image_url: entry.image_url,
            });
        }

        // The page after the last one is never requested.
        if page + 1 < max_pages && !provider.advance().await? {
            info!(
                pages_visited = page + 1,
                records = records.len(),
                "No next-page control, stopping extraction"
            );
            return Ok(records);
        }
    }

    info!(
        pages_visited = max_pages,
        records = records.len(),
        "Page limit reached, stopping extraction"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FakeProvider {
        pages: Vec<String>,
        current: usize,
        advances: usize,
    }

    impl FakeProvider {
        fn new(pages: Vec<String>) -> Self {
            FakeProvider {
                pages,
                current: 0,
                advances: 0,
            }
        }
    }

    impl PageProvider for FakeProvider {
        async fn results_html(&mut self) -> Result<String, ScrapeError> {
            Ok(self.pages[self.current].clone())
        }

        async fn advance(&mut self) -> Result<bool, ScrapeError> {
            self.advances += 1;
            if self.current + 1 < self.pages.len() {
                self.current += 1;
                Ok(true)
            } else {
                Ok(false)
            }
        }
    }

    fn entry(date: &str, title: &str) -> String {
        format!(
            r#"<li>
                 <h3 class="promo-title">{title}</h3>
                 <p class="promo-description">about {title}</p>
                 <p class="promo-timestamp">{date}</p>
                 <img class="image" src="https://img.example/{title}.jpg">
               </li>"#
        )
    }

    fn page(entries: &[String]) -> String {
        format!("<ul>{}</ul>", entries.concat())
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 8, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_stops_at_first_record_below_cutoff() {
        // months_back=2 from 2023-08-15 puts the cutoff at 2023-06-01.
        let mut provider = FakeProvider::new(vec![page(&[
            entry("August 1, 2023", "recent"),
            entry("January 1, 2023", "old"),
        ])]);

        let records = extract(&mut provider, 2, DEFAULT_MAX_PAGES, now())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "recent");
        assert_eq!(provider.advances, 0);
    }

    #[tokio::test]
    async fn test_discards_rest_of_page_after_cutoff_hit() {
        // The third entry is above the cutoff but comes after the stop, so
        // it must not appear in the output.
        let mut provider = FakeProvider::new(vec![page(&[
            entry("August 10, 2023", "first"),
            entry("January 1, 2023", "below"),
            entry("August 5, 2023", "after-stop"),
        ])]);

        let records = extract(&mut provider, 2, DEFAULT_MAX_PAGES, now())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "first");
    }

    #[tokio::test]
    async fn test_never_returns_a_record_below_cutoff() {
        let mut provider = FakeProvider::new(vec![
            page(&[entry("August 10, 2023", "a"), entry("July 3, 2023", "b")]),
            page(&[entry("June 1, 2023", "c"), entry("May 31, 2023", "d")]),
        ]);

        let records = extract(&mut provider, 2, DEFAULT_MAX_PAGES, now())
            .await
            .unwrap();

        let cutoff = dates::cutoff(now(), 2);
        assert!(records.iter().all(|r| r.published_at >= cutoff));
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_record_exactly_on_cutoff_is_kept() {
        // Cutoff is 2023-06-01; a record dated exactly that day stays in.
        let mut provider =
            FakeProvider::new(vec![page(&[entry("June 1, 2023", "boundary")])]);

        let records = extract(&mut provider, 2, DEFAULT_MAX_PAGES, now())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "boundary");
    }

    #[tokio::test]
    async fn test_relative_dates_are_never_below_cutoff() {
        let mut provider = FakeProvider::new(vec![page(&[
            entry("23 minutes ago", "fresh"),
            entry("August 1, 2023", "dated"),
        ])]);

        let records = extract(&mut provider, 0, DEFAULT_MAX_PAGES, now())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].published_at, now());
    }

    #[tokio::test]
    async fn test_page_limit_truncates_silently() {
        let pages: Vec<String> = (1..=5)
            .map(|i| page(&[entry("August 10, 2023", &format!("p{i}"))]))
            .collect();
        let mut provider = FakeProvider::new(pages);

        let records = extract(&mut provider, 2, 2, now()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "p1");
        assert_eq!(records[1].title, "p2");
        // No advance is issued after the final allowed page.
        assert_eq!(provider.advances, 1);
    }

    #[tokio::test]
    async fn test_missing_next_page_control_stops_cleanly() {
        let mut provider = FakeProvider::new(vec![
            page(&[entry("August 10, 2023", "a")]),
            page(&[entry("August 9, 2023", "b")]),
        ]);

        let records = extract(&mut provider, 2, DEFAULT_MAX_PAGES, now())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        // One successful advance, one that reported the last page.
        assert_eq!(provider.advances, 2);
    }

    #[tokio::test]
    async fn test_unparseable_date_aborts_the_run() {
        let mut provider =
            FakeProvider::new(vec![page(&[entry("sometime last week", "bad")])]);

        let err = extract(&mut provider, 0, DEFAULT_MAX_PAGES, now())
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::DateParse { .. }));
    }
}
