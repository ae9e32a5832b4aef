//! Spreadsheet output for enriched records.
//!
//! One `.xlsx` file per run, named after the search phrase and today's date:
//!
//! ```text
//! output_folder/
//! └── climate_change_20230815.xlsx
//! ```
//!
//! Rerunning with the same phrase on the same day overwrites the previous
//! file without warning. Columns, in order: Date, Title, Description,
//! Picture Filename, search_phrase, search_phrase_count, has_money.

use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ScrapeError;
use crate::models::EnrichedRecord;
use crate::utils::phrase_stem;

const HEADERS: [&str; 7] = [
    "Date",
    "Title",
    "Description",
    "Picture Filename",
    "search_phrase",
    "search_phrase_count",
    "has_money",
];

/// Write the finalized record set to a spreadsheet in `output_folder`.
///
/// Creates the folder (parents included) if absent. A run with zero records
/// still produces a file with just the header row, so the presence of the
/// file is not by itself a sign of a non-empty result.
pub fn save(
    records: &[EnrichedRecord],
    search_phrase: &str,
    output_folder: &str,
) -> Result<(), ScrapeError> {
    fs::create_dir_all(output_folder)?;
    let path = output_path(output_folder, search_phrase, Local::now().date_naive());

    write_workbook(records, &path)?;
    info!(path = %path.display(), rows = records.len(), "Wrote spreadsheet");
    Ok(())
}

/// `<folder>/<phrase with spaces as underscores>_<YYYYMMDD>.xlsx`
fn output_path(output_folder: &str, search_phrase: &str, date: NaiveDate) -> PathBuf {
    Path::new(output_folder).join(format!(
        "{}_{}.xlsx",
        phrase_stem(search_phrase),
        date.format("%Y%m%d")
    ))
}

fn write_workbook(records: &[EnrichedRecord], path: &Path) -> Result<(), ScrapeError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, record.article.published_at.date().to_string())?;
        worksheet.write_string(row, 1, &record.article.title)?;
        worksheet.write_string(row, 2, &record.article.description)?;
        worksheet.write_string(row, 3, &record.article.image_url)?;
        worksheet.write_string(row, 4, &record.search_phrase)?;
        worksheet.write_number(row, 5, record.search_phrase_count as f64)?;
        worksheet.write_boolean(row, 6, record.has_money)?;
    }

    workbook.save(path)?;
    Ok(())
}
