//! Command-line interface definitions.
//!
//! All options can be passed as flags; the WebDriver endpoint can also come
//! from the environment.

use clap::Parser;

use crate::extract::DEFAULT_MAX_PAGES;

/// Command-line arguments for the LA Times search scraper.
///
/// # Examples
///
/// ```sh
/// # Search the current month's results only
/// latimes_scraper "argentina"
///
/// # Go two months back, filter to two categories
/// latimes_scraper "argentina" -m 2 -c "World & Nation" -c Sports
///
/// # Write somewhere other than ./Output
/// latimes_scraper "climate change" -o /tmp/results
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Phrase to search for
    pub search_phrase: String,

    /// Category filter to apply (repeatable); unknown labels are logged
    /// as warnings and skipped
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,

    /// How many months back of results to keep (0 keeps the current
    /// month only)
    #[arg(short, long, default_value_t = 0)]
    pub months_back: u32,

    /// Folder the spreadsheet is written to
    #[arg(short, long, default_value = "Output")]
    pub output_folder: String,

    /// Maximum number of result pages to visit
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// WebDriver endpoint to drive the browser through
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Run the browser headless
    #[arg(long)]
    pub headless: bool,
}
