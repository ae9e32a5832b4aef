//! # LA Times search scraper
//!
//! Drives a browser through an LA Times keyword search, walks the paged
//! results, extracts structured article metadata, enriches it with
//! search-phrase statistics and a currency-mention flag, and saves the
//! result as a spreadsheet.
//!
//! ## Usage
//!
//! ```sh
//! latimes_scraper "argentina" -m 2 -o Output
//! ```
//!
//! A chromedriver (or compatible WebDriver endpoint) must be listening on
//! `--webdriver-url` / `WEBDRIVER_URL`.
//!
//! ## Pipeline
//!
//! 1. **Search**: open the site, submit the phrase, sort newest-first
//! 2. **Filter**: apply category checkboxes (no-op when none requested)
//! 3. **Extract**: paginate until the date cutoff, the last page, or the
//!    page limit
//! 4. **Enrich**: derive phrase counts and the money flag
//! 5. **Save**: write `<phrase>_<YYYYMMDD>.xlsx`
//!
//! Failures never propagate past this module: each step logs and the run
//! continues with partial state where that makes sense. The browser session
//! is closed in every path. Success is observed through the logs and the
//! presence of the output file, not an exit code.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use thirtyfour::WebDriver;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod dates;
mod enrich;
mod error;
mod extract;
mod models;
mod outputs;
mod parse;
mod scrapers;
mod utils;

use cli::Cli;
use scrapers::latimes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    info!(
        search_phrase = %args.search_phrase,
        months_back = args.months_back,
        categories = args.categories.len(),
        "latimes_scraper starting up"
    );

    // Early check: a doomed output folder should fail before the browser opens.
    if let Err(e) = utils::ensure_writable_dir(&args.output_folder) {
        error!(
            path = %args.output_folder,
            error = %e,
            "Output folder is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let driver = match latimes::open_session(&args.webdriver_url, args.headless).await {
        Ok(driver) => driver,
        Err(e) => {
            error!(
                webdriver_url = %args.webdriver_url,
                error = %e,
                "Could not open browser session"
            );
            return Ok(());
        }
    };

    run(&driver, &args).await;

    // The session is a singleton resource; release it no matter how the run went.
    if let Err(e) = driver.quit().await {
        warn!(error = %e, "Failed to close browser session");
    }

    info!("latimes_scraper finished");
    Ok(())
}

/// One scraping run over an open browser session.
///
/// Every failure is converted to a log line here. Search and filter failures
/// leave the page in whatever state it reached and the run continues with
/// best-effort data; extraction failures abort the run with no spreadsheet;
/// save failures complete the run with no file.
async fn run(driver: &WebDriver, args: &Cli) {
    let now = Local::now().naive_local();

    if let Err(e) = latimes::search(driver, &args.search_phrase).await {
        error!(error = %e, "Search step failed; continuing with the page as-is");
    }

    if let Err(e) = latimes::filter_categories(driver, &args.categories).await {
        error!(error = %e, "Category filtering failed; continuing unfiltered");
    }

    let mut provider = latimes::LivePageProvider::new(driver);
    let records =
        match extract::extract(&mut provider, args.months_back, args.max_pages, now).await {
            Ok(records) => records,
            Err(e) => {
                error!(
                    error = %e,
                    fatal = e.is_fatal_to_run(),
                    "Extraction failed; no spreadsheet will be written"
                );
                return;
            }
        };
    info!(count = records.len(), "Extraction complete");

    let enriched = enrich::enrich(records, &args.search_phrase);

    if let Err(e) = outputs::xlsx::save(&enriched, &args.search_phrase, &args.output_folder) {
        error!(error = %e, "Failed to write spreadsheet");
    }
}
