//! Small helpers for file naming and output-directory validation.

use std::error::Error;
use std::fs;
use tracing::info;

/// Turn a search phrase into the output filename stem: spaces become
/// underscores, everything else is kept as typed.
pub fn phrase_stem(search_phrase: &str) -> String {
    search_phrase.replace(' ', "_")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory (parents included) if absent, then probes it with a
/// throwaway file. Used as an early check so a doomed run fails before the
/// browser session is opened.
pub fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path)?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match fs::File::create(&probe_path) {
        Ok(_) => {
            let _ = fs::remove_file(&probe_path);
            info!(path, "Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_stem_replaces_spaces() {
        assert_eq!(phrase_stem("climate change policy"), "climate_change_policy");
        assert_eq!(phrase_stem("argentina"), "argentina");
        assert_eq!(phrase_stem(""), "");
    }

    #[test]
    fn test_ensure_writable_dir_creates_missing_dirs() {
        let dir = std::env::temp_dir().join("latimes_scraper_probe_test/nested");
        let dir = dir.to_str().unwrap().to_string();
        let _ = fs::remove_dir_all(&dir);

        ensure_writable_dir(&dir).unwrap();
        assert!(std::path::Path::new(&dir).is_dir());

        let _ = fs::remove_dir_all(&dir);
    }
}
