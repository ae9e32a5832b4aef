//! Date normalization for result-listing timestamps.
//!
//! The LA Times results page shows dates in exactly three shapes:
//!
//! 1. Relative markers like `"2 hours ago"` — resolved to the current
//!    timestamp so they can never fall below a cutoff.
//! 2. Long-form dates like `"August 3, 2023"`.
//! 3. Abbreviated-month dates like `"Aug. 3, 2023"` — the month may carry a
//!    trailing period in the markup, so periods are stripped before parsing.
//!
//! Anything else is a [`ScrapeError::DateParse`]. The narrowing to these two
//! absolute formats is deliberate; no other format appears in the site's
//! markup.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::ScrapeError;

const LONG_FORMAT: &str = "%B %d, %Y";
const ABBREVIATED_FORMAT: &str = "%b %d, %Y";

/// Resolve raw listing date text to a timestamp.
///
/// Relative markers (any text containing `"ago"`) resolve to `now`; absolute
/// dates resolve to midnight of the stated day. Literal periods are stripped
/// first so `"Aug. 3, 2023"` and `"Aug 3, 2023"` parse identically.
pub fn normalize(raw: &str, now: NaiveDateTime) -> Result<NaiveDateTime, ScrapeError> {
    let cleaned = raw.replace('.', "");
    let cleaned = cleaned.trim();

    if cleaned.contains("ago") {
        debug!(%raw, "Relative date marker, using current time");
        return Ok(now);
    }

    NaiveDate::parse_from_str(cleaned, LONG_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(cleaned, ABBREVIATED_FORMAT))
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| ScrapeError::DateParse {
            raw: raw.to_string(),
        })
}

/// Earliest-allowed article timestamp: the first day of the month
/// `months_back` months before `now`, at midnight.
///
/// The subtraction is calendar-safe: going back past January rolls the year
/// over (February minus 3 months is the previous November). A `months_back`
/// large enough to underflow chrono's date range saturates to the minimum
/// date, which excludes nothing.
pub fn cutoff(now: NaiveDateTime, months_back: u32) -> NaiveDateTime {
    let first_of_month = now
        .date()
        .with_day(1)
        .unwrap_or_else(|| now.date());
    first_of_month
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_long_form_date() {
        let ts = normalize("August 3, 2023", noon(2023, 8, 15)).unwrap();
        assert_eq!(ts, at(2023, 8, 3));
    }

    #[test]
    fn test_abbreviated_date_with_period() {
        let ts = normalize("Aug. 3, 2023", noon(2023, 8, 15)).unwrap();
        assert_eq!(ts, at(2023, 8, 3));
    }

    #[test]
    fn test_abbreviated_date_without_period() {
        let ts = normalize("Aug 3, 2023", noon(2023, 8, 15)).unwrap();
        assert_eq!(ts, at(2023, 8, 3));
    }

    #[test]
    fn test_punctuation_does_not_change_the_date() {
        let now = noon(2023, 9, 1);
        assert_eq!(
            normalize("Dec. 25, 2022", now).unwrap(),
            normalize("Dec 25, 2022", now).unwrap()
        );
    }

    #[test]
    fn test_relative_marker_resolves_to_now() {
        let now = noon(2023, 8, 15);
        assert_eq!(normalize("2 hours ago", now).unwrap(), now);
        assert_eq!(normalize("34 minutes ago", now).unwrap(), now);
    }

    #[test]
    fn test_unparseable_text_is_an_error() {
        let err = normalize("yesterday afternoon", noon(2023, 8, 15)).unwrap_err();
        assert!(matches!(err, ScrapeError::DateParse { .. }));
    }

    #[test]
    fn test_cutoff_same_year() {
        // months_back=2 from mid-August lands on June 1.
        assert_eq!(cutoff(noon(2023, 8, 15), 2), at(2023, 6, 1));
    }

    #[test]
    fn test_cutoff_zero_months_is_first_of_current_month() {
        assert_eq!(cutoff(noon(2023, 8, 15), 0), at(2023, 8, 1));
    }

    #[test]
    fn test_cutoff_rolls_the_year_back() {
        // February minus 3 months underflows the month number; the year must
        // roll back instead of producing an invalid date.
        assert_eq!(cutoff(noon(2024, 2, 10), 3), at(2023, 11, 1));
        assert_eq!(cutoff(noon(2024, 1, 5), 1), at(2023, 12, 1));
        assert_eq!(cutoff(noon(2024, 3, 5), 15), at(2022, 12, 1));
    }

    #[test]
    fn test_cutoff_saturates_on_absurd_months_back() {
        let c = cutoff(noon(2023, 8, 15), u32::MAX);
        assert!(c < at(1900, 1, 1));
    }
}
