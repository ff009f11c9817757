//! Staging directory lookups.
//!
//! A new post is staged in a single flat directory:
//!
//! ```text
//! add/
//! ├── BlueHour.png          # Source image (title comes from its name)
//! ├── BlueHour-w190.png     # Variants from a previous run are skipped
//! └── post.md               # Optional body (.md or .txt)
//! ```
//!
//! Entries are listed in name order, so "first match" is deterministic.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffixes of usable source images.
pub const IMAGE_SUFFIXES: &[&str] = &["png", "jpg"];

/// Suffixes of post body files.
pub const TEXT_SUFFIXES: &[&str] = &["md", "txt"];

/// Marker in the names of generated width variants (`name-w800.png`).
pub const VARIANT_MARKER: &str = "-w";

#[derive(Error, Debug)]
pub enum StagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No source image (.png or .jpg) found in staging directory: {0}")]
    NoSourceImage(PathBuf),
}

/// List file names in `dir` ending in any of `suffixes`, sorted by name.
pub fn entries_ending_with(dir: &Path, suffixes: &[&str]) -> Result<Vec<String>, StagingError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if suffixes.iter().any(|s| name.ends_with(s)) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// File name of the source image: the first image that is not a width variant.
pub fn find_source_image(dir: &Path) -> Result<String, StagingError> {
    entries_ending_with(dir, IMAGE_SUFFIXES)?
        .into_iter()
        .find(|name| !name.contains(VARIANT_MARKER))
        .ok_or_else(|| StagingError::NoSourceImage(dir.to_path_buf()))
}

/// Path of the post body file, if one is staged.
pub fn find_text_file(dir: &Path) -> Result<Option<PathBuf>, StagingError> {
    Ok(entries_ending_with(dir, TEXT_SUFFIXES)?
        .into_iter()
        .next()
        .map(|name| dir.join(name)))
}
