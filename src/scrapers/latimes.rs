//! LA Times browser driving.
//!
//! Everything here is mechanical WebDriver work: opening the session,
//! submitting the search, selecting the sort order, applying category
//! filters, and exposing the paged results through [`LivePageProvider`].
//! Element waits are bounded (10 s lookups, 20 s page loads); a wait that
//! elapses surfaces as [`ScrapeError::UiInteraction`] and is logged by the
//! orchestrator rather than aborting the process.

use std::time::Duration;

use thirtyfour::components::SelectElement;
use thirtyfour::extensions::query::ElementQueryable;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, Key, WebDriver};
use tracing::{info, warn};

use crate::error::ScrapeError;
use crate::extract::PageProvider;

const BASE_URL: &str = "https://www.latimes.com/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/74.0.3729.157 Safari/537.36";

const SEARCH_BUTTON: &str = "/html/body/ps-header/header/div[2]/button";
const SEARCH_BOX: &str = "/html/body/ps-header/header/div[2]/div[2]/form/label/input";
const RESULTS_LIST: &str = ".search-results-module-results-menu";
const NEXT_PAGE_BUTTON: &str = "search-results-module-next-page";

/// Sort dropdown values: 0 relevance, 1 newest, 2 oldest.
const SORT_NEWEST: &str = "1";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(20);
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Time for the results page to settle after a sort or filter change.
const SETTLE_DELAY: Duration = Duration::from_secs(10);

/// Open a Chrome session against the given WebDriver endpoint and load the
/// LA Times front page.
pub async fn open_session(webdriver_url: &str, headless: bool) -> Result<WebDriver, ScrapeError> {
    let mut caps = DesiredCapabilities::chrome();
    if headless {
        caps.add_arg("--headless")?;
    }
    caps.add_arg("--no-sandbox")?;
    caps.add_arg("--disable-dev-shm-usage")?;
    caps.add_arg(&format!("--user-agent={USER_AGENT}"))?;

    let driver = WebDriver::new(webdriver_url, caps).await?;
    driver.maximize_window().await?;
    driver.goto(BASE_URL).await?;
    info!(url = BASE_URL, "Opened browser session");
    Ok(driver)
}

/// Submit the search phrase and sort results newest-first.
pub async fn search(driver: &WebDriver, search_phrase: &str) -> Result<(), ScrapeError> {
    let search_button = driver
        .query(By::XPath(SEARCH_BUTTON))
        .wait(LOOKUP_TIMEOUT, POLL_INTERVAL)
        .first()
        .await?;
    search_button.click().await?;

    let search_box = driver
        .query(By::XPath(SEARCH_BOX))
        .wait(LOOKUP_TIMEOUT, POLL_INTERVAL)
        .first()
        .await?;
    search_box.send_keys(search_phrase).await?;
    search_box.send_keys(Key::Enter + "").await?;
    info!(search_phrase, "Submitted search");

    let sort_element = driver
        .query(By::ClassName("select-input"))
        .wait(LOOKUP_TIMEOUT, POLL_INTERVAL)
        .first()
        .await?;
    let sort_select = SelectElement::new(&sort_element).await?;
    sort_select.select_by_value(SORT_NEWEST).await?;
    info!("Sorted results by newest");

    // The list re-renders in place after re-sorting.
    tokio::time::sleep(SETTLE_DELAY).await;
    Ok(())
}

/// Apply category checkbox filters to the results.
///
/// An empty list is a no-op: the unfiltered result set is used. Requested
/// categories are checked against the labels actually present; unknown ones
/// are logged as warnings and skipped instead of failing the run.
pub async fn filter_categories(
    driver: &WebDriver,
    categories: &[String],
) -> Result<(), ScrapeError> {
    if categories.is_empty() {
        return Ok(());
    }

    let filter_button = driver
        .query(By::ClassName("filters-open-button"))
        .wait(LOOKUP_TIMEOUT, POLL_INTERVAL)
        .first()
        .await?;
    filter_button.click().await?;

    let see_all_button = driver
        .query(By::ClassName("see-all-button"))
        .wait(LOOKUP_TIMEOUT, POLL_INTERVAL)
        .first()
        .await?;
    see_all_button.click().await?;

    let labels = driver
        .find_all(By::ClassName("checkbox-input-label"))
        .await?;
    let mut available = Vec::with_capacity(labels.len());
    for label in &labels {
        available.push(label.text().await?);
    }

    for category in categories {
        match available.iter().position(|label| label == category) {
            Some(i) => {
                labels[i].click().await?;
                info!(category, "Selected category filter");
            }
            None => {
                warn!(
                    category,
                    available = %available.join(", "),
                    "Category does not exist, skipping"
                );
            }
        }
    }

    let apply_button = driver
        .query(By::ClassName("apply-button"))
        .wait(LOOKUP_TIMEOUT, POLL_INTERVAL)
        .first()
        .await?;
    apply_button.click().await?;

    tokio::time::sleep(SETTLE_DELAY).await;
    Ok(())
}

/// [`PageProvider`] backed by the live browser session.
pub struct LivePageProvider<'a> {
    driver: &'a WebDriver,
}

impl<'a> LivePageProvider<'a> {
    pub fn new(driver: &'a WebDriver) -> Self {
        LivePageProvider { driver }
    }
}

impl PageProvider for LivePageProvider<'_> {
    /// Wait (bounded) for the results list to be present and return its
    /// rendered markup.
    async fn results_html(&mut self) -> Result<String, ScrapeError> {
        let list = self
            .driver
            .query(By::Css(RESULTS_LIST))
            .wait(LOOKUP_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        Ok(list.outer_html().await?)
    }

    /// Click the next-page control and wait for the next page to be ready.
    ///
    /// A control that never appears means the last reachable page has been
    /// consumed, which ends pagination cleanly rather than erroring.
    async fn advance(&mut self) -> Result<bool, ScrapeError> {
        let next_page = match self
            .driver
            .query(By::ClassName(NEXT_PAGE_BUTTON))
            .wait(LOOKUP_TIMEOUT, POLL_INTERVAL)
            .first()
            .await
        {
            Ok(element) => element,
            Err(_) => {
                info!("Next-page control not present, assuming last page");
                return Ok(false);
            }
        };
        next_page.click().await?;

        // The control reappears once the next page has rendered.
        self.driver
            .query(By::ClassName(NEXT_PAGE_BUTTON))
            .wait(PAGE_LOAD_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        Ok(true)
    }
}
