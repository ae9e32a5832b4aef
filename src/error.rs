//! Error taxonomy for the scraping pipeline.
//!
//! Errors fall into two groups with different recovery rules:
//!
//! - **Locally recovered**: [`ScrapeError::UiInteraction`], [`ScrapeError::Io`]
//!   and [`ScrapeError::Spreadsheet`]. The orchestrator logs these and keeps
//!   going with whatever partial state exists (possibly producing an empty or
//!   missing output file).
//! - **Fatal to the extraction run**: [`ScrapeError::DateParse`] and
//!   [`ScrapeError::FieldExtraction`]. These abort the page-processing loop;
//!   the orchestrator logs them and skips the output step.
//!
//! Nothing propagates past the top-level run: every failure becomes a log
//! line, and the browser session is released in all paths.

use thiserror::Error;

/// All failure modes of a single scraping run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A browser step's expected element never became available within its
    /// timeout, or a WebDriver command failed.
    #[error("browser interaction failed: {0}")]
    UiInteraction(#[from] thirtyfour::error::WebDriverError),

    /// Raw date text matched neither the long-form nor the abbreviated
    /// month format.
    #[error("unrecognized date text: {raw:?}")]
    DateParse { raw: String },

    /// A result-list entry was missing one of its required sub-fields.
    #[error("result entry is missing its {field} field")]
    FieldExtraction { field: &'static str },

    /// Output folder creation or file write failed.
    #[error("output I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The spreadsheet writer rejected the workbook.
    #[error("spreadsheet write failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl ScrapeError {
    /// Whether this error aborts the extraction run (as opposed to being
    /// logged and recovered at the step where it occurred).
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(
            self,
            ScrapeError::DateParse { .. } | ScrapeError::FieldExtraction { .. }
        )
    }
}
