//! Shared test utilities for the blog-add test suite.
//!
//! Provides an isolated staging area (`add/` + `posts/` in a temp dir),
//! fixed settings and date, and a recording [`ImageManager`] that answers
//! with predictable CDN URLs.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let stage = Stage::new();
//! stage.add_file("TestImage.png", "");
//! stage.add_post("page357.json");
//!
//! let assembler = PostAssembler::new(settings(), &stage.add_dir(), &stage.posts_dir(), date());
//! let mut images = MockImageManager::new("TestImage.png");
//! let record = assembler.generate_post(&mut images).unwrap();
//! assert_eq!(record.id, 358);
//! ```

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::assemble::{PostSettings, VariantWidths};
use crate::dates::DateStamp;
use crate::imaging::{ImageManager, VariantError, variant_filename};
use crate::storage::StorageError;

pub const DEFAULT_EXCERPT: &str =
    "A blog containing texts, drawings, graphic narratives/novels and (rarely) code snippets.";

// =========================================================================
// Fixture setup
// =========================================================================

/// Temp directory with empty `add/` and `posts/` subdirectories.
pub struct Stage {
    tmp: TempDir,
}

impl Stage {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("add")).unwrap();
        fs::create_dir(tmp.path().join("posts")).unwrap();
        Self { tmp }
    }

    pub fn add_dir(&self) -> PathBuf {
        self.tmp.path().join("add")
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.tmp.path().join("posts")
    }

    /// Put a file into the staging directory.
    pub fn add_file(&self, name: &str, content: &str) {
        fs::write(self.add_dir().join(name), content).unwrap();
    }

    /// Put an existing post record into the posts directory.
    pub fn add_post(&self, name: &str) {
        fs::write(self.posts_dir().join(name), "{}").unwrap();
    }
}

pub fn settings() -> PostSettings {
    PostSettings {
        domain: "https://drewing.de/blog/".to_string(),
        default_excerpt: DEFAULT_EXCERPT.to_string(),
        category: "blog post".to_string(),
        widths: VariantWidths {
            micro_thumb: 190,
            thumb: 390,
            post: 800,
        },
    }
}

pub fn date() -> DateStamp {
    DateStamp {
        year: 2026,
        month: 10,
        day: 8,
        hour: 9,
        minute: 5,
        second: 3,
    }
}

// =========================================================================
// Image manager mock
// =========================================================================

/// Records calls and returns `https://cdn.example.com/<variant>` URLs.
pub struct MockImageManager {
    source: PathBuf,
    pub sizes: Vec<u32>,
    pub calls: RefCell<Vec<&'static str>>,
    /// Leave the original out of the URL list.
    pub drop_original: bool,
    pub fail_upload: bool,
}

impl MockImageManager {
    pub fn new(source: &str) -> Self {
        Self {
            source: PathBuf::from(source),
            sizes: Vec::new(),
            calls: RefCell::new(Vec::new()),
            drop_original: false,
            fail_upload: false,
        }
    }
}

impl ImageManager for MockImageManager {
    fn add_image_size(&mut self, width: u32) -> String {
        self.calls.borrow_mut().push("add");
        self.sizes.push(width);
        variant_filename(&self.source, width)
    }

    fn prepare_images(&mut self) -> Result<(), VariantError> {
        self.calls.borrow_mut().push("prepare");
        Ok(())
    }

    fn upload_images(&mut self) -> Result<(), VariantError> {
        self.calls.borrow_mut().push("upload");
        if self.fail_upload {
            return Err(VariantError::Storage(StorageError::Status {
                key: self.source.to_string_lossy().to_string(),
                status: 500,
            }));
        }
        Ok(())
    }

    fn image_urls(&self) -> Vec<String> {
        self.calls.borrow_mut().push("urls");
        let mut urls: Vec<String> = self
            .sizes
            .iter()
            .map(|&w| format!("https://cdn.example.com/{}", variant_filename(&self.source, w)))
            .collect();
        if !self.drop_original {
            urls.push(format!("https://cdn.example.com/{}", self.source.display()));
        }
        urls
    }
}
