//! Sequential post ids.
//!
//! Every published post is stored as `page<ID>.json` in the posts directory.
//! The next id is one more than the highest id found there, or `0` for an
//! empty directory. Ids are compared numerically, so `page99.json` and
//! `page100.json` order correctly without zero padding.
//!
//! Only `page*.json` entries are records; anything else in the directory
//! (`.gitkeep`, editor backups) is ignored. A record name without a digit
//! run is reported instead of being silently counted as id 0. A missing
//! posts directory counts as empty.

use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Post filename has no numeric id: {0}")]
    NoDigits(PathBuf),
    #[error("Post id in {0} is out of range")]
    InvalidNumber(PathBuf),
}

/// Filename of the record for post `id`.
pub fn record_filename(id: u32) -> String {
    format!("page{id}.json")
}

/// Whether `filename` names a post record.
pub fn is_record_filename(filename: &str) -> bool {
    filename.starts_with("page") && filename.ends_with(".json")
}

/// Extract the first digit run from a filename.
pub fn parse_id(filename: &str) -> Option<Result<u32, std::num::ParseIntError>> {
    DIGIT_RUN.find(filename).map(|m| m.as_str().parse())
}

/// Compute the id for the next post in `posts_dir`.
pub fn next_id(posts_dir: &Path) -> Result<u32, SequenceError> {
    let entries = match fs::read_dir(posts_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };
    let names = entries
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut highest: Option<u32> = None;
    for name in names.iter().filter(|n| is_record_filename(n)) {
        let id = match parse_id(name) {
            Some(Ok(id)) => id,
            Some(Err(_)) => return Err(SequenceError::InvalidNumber(posts_dir.join(name))),
            None => return Err(SequenceError::NoDigits(posts_dir.join(name))),
        };
        highest = Some(highest.map_or(id, |h| h.max(id)));
    }

    match highest {
        None => Ok(0),
        Some(id) => id
            .checked_add(1)
            .ok_or_else(|| SequenceError::InvalidNumber(posts_dir.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn posts_with(names: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in names {
            fs::write(tmp.path().join(name), "{}").unwrap();
        }
        tmp
    }

    #[test]
    fn empty_posts_directory_starts_at_zero() {
        let tmp = posts_with(&[]);
        assert_eq!(next_id(tmp.path()).unwrap(), 0);
    }

    #[test]
    fn single_post_increments() {
        let tmp = posts_with(&["page357.json"]);
        assert_eq!(next_id(tmp.path()).unwrap(), 358);
    }

    #[test]
    fn numeric_order_wins_over_lexicographic() {
        let tmp = posts_with(&["page99.json", "page100.json", "page9.json"]);
        assert_eq!(next_id(tmp.path()).unwrap(), 101);
    }

    #[test]
    fn zero_padded_names() {
        let tmp = posts_with(&["page007.json", "page010.json"]);
        assert_eq!(next_id(tmp.path()).unwrap(), 11);
    }

    #[test]
    fn record_without_digits_is_an_error() {
        let tmp = posts_with(&["page1.json", "page.json"]);
        let err = next_id(tmp.path()).unwrap_err();
        assert!(matches!(err, SequenceError::NoDigits(p) if p.ends_with("page.json")));
    }

    #[test]
    fn non_record_files_are_ignored() {
        let tmp = posts_with(&["page4.json", ".gitkeep", "page4.json~", "notes.txt", "draft99.json"]);
        assert_eq!(next_id(tmp.path()).unwrap(), 5);
    }

    #[test]
    fn only_stray_files_starts_at_zero() {
        let tmp = posts_with(&[".gitkeep", "README"]);
        assert_eq!(next_id(tmp.path()).unwrap(), 0);
    }

    #[test]
    fn overflowing_digit_run_is_an_error() {
        let tmp = posts_with(&["page99999999999999999999.json"]);
        assert!(matches!(
            next_id(tmp.path()),
            Err(SequenceError::InvalidNumber(_))
        ));
    }

    #[test]
    fn missing_directory_starts_at_zero() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert_eq!(next_id(&missing).unwrap(), 0);
    }

    #[test]
    fn file_in_place_of_directory_is_io_error() {
        let tmp = posts_with(&["posts"]);
        assert!(matches!(
            next_id(&tmp.path().join("posts")),
            Err(SequenceError::Io(_))
        ));
    }

    #[test]
    fn first_digit_run_is_used() {
        assert_eq!(parse_id("page12-v3.json").unwrap().unwrap(), 12);
        assert!(parse_id("page.json").is_none());
    }

    #[test]
    fn record_filename_format() {
        assert_eq!(record_filename(358), "page358.json");
        assert!(is_record_filename(&record_filename(358)));
        assert!(!is_record_filename("page358.json.bak"));
    }
}
