//! Post assembly.
//!
//! Turns the staging directory into a [`PostRecord`]:
//!
//! ```text
//! add/BlueHour.png   → title "Blue Hour", slug "blue-hour"
//!                    → variants 190 / 390 / 800 + original, uploaded
//! add/post.md        → excerpt, single-line HTML, #tags
//! posts/page357.json → id 358
//! ```
//!
//! Image work goes through an injected [`ImageManager`], so the whole
//! pipeline runs in tests without decoding or uploading anything.
//!
//! Nothing is written here; the caller persists the record with
//! [`post::write_record`](crate::post::write_record) once assembly has
//! succeeded, so a failed upload never leaves a partial record behind.

use crate::config::BlogConfig;
use crate::content::{self, TextContent};
use crate::dates::DateStamp;
use crate::imaging::{ImageManager, VariantError};
use crate::post::PostRecord;
use crate::sequence::{self, SequenceError};
use crate::staging::{self, StagingError};
use crate::title::{self, InferredTitle};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Offset added to the post id in comment thread identifiers.
const THREAD_ID_OFFSET: u64 = 1_000_000;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Staging(#[from] StagingError),
    #[error("Cannot assign post id: {0}")]
    Sequence(#[from] SequenceError),
    #[error(transparent)]
    Images(#[from] VariantError),
    #[error("Expected {expected} image URLs, got {got}")]
    MissingImageUrls { expected: usize, got: usize },
}

/// Widths requested for every post, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantWidths {
    pub micro_thumb: u32,
    pub thumb: u32,
    pub post: u32,
}

/// Per-site settings that shape a post record.
#[derive(Debug, Clone)]
pub struct PostSettings {
    /// Blog root URL with trailing slash.
    pub domain: String,
    pub default_excerpt: String,
    pub category: String,
    pub widths: VariantWidths,
}

impl PostSettings {
    /// Build settings from the loaded config.
    pub fn from_config(config: &BlogConfig) -> Self {
        Self {
            domain: config.blog.domain.clone(),
            default_excerpt: config.blog.default_excerpt.clone(),
            category: config.blog.category.clone(),
            widths: VariantWidths {
                micro_thumb: config.images.micro_thumb,
                thumb: config.images.thumb,
                post: config.images.post,
            },
        }
    }
}

/// URLs of one post's images, by role.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PostImages {
    micro_thumb: String,
    thumb: String,
    post: String,
    original: String,
}

/// What `check` found in the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingReport {
    pub source_image: PathBuf,
    pub title: InferredTitle,
    pub text_file: Option<PathBuf>,
    pub next_id: u32,
}

/// Assembles the post staged in `add_dir`.
pub struct PostAssembler {
    settings: PostSettings,
    add_dir: PathBuf,
    posts_dir: PathBuf,
    date: DateStamp,
}

impl PostAssembler {
    pub fn new(settings: PostSettings, add_dir: &Path, posts_dir: &Path, date: DateStamp) -> Self {
        Self {
            settings,
            add_dir: add_dir.to_path_buf(),
            posts_dir: posts_dir.to_path_buf(),
            date,
        }
    }

    /// Path of the staged source image.
    pub fn source_image(&self) -> Result<PathBuf, PostError> {
        let name = staging::find_source_image(&self.add_dir)?;
        Ok(self.add_dir.join(name))
    }

    /// Title and slug of the staged post.
    pub fn infer_title(&self) -> Result<InferredTitle, PostError> {
        let name = staging::find_source_image(&self.add_dir)?;
        Ok(title::infer_from_filename(&name))
    }

    /// Id the staged post will get.
    pub fn next_id(&self) -> Result<u32, PostError> {
        Ok(sequence::next_id(&self.posts_dir)?)
    }

    /// Inspect the staged post without touching any image.
    pub fn check(&self) -> Result<StagingReport, PostError> {
        let name = staging::find_source_image(&self.add_dir)?;
        Ok(StagingReport {
            source_image: self.add_dir.join(&name),
            title: title::infer_from_filename(&name),
            text_file: staging::find_text_file(&self.add_dir)?,
            next_id: self.next_id()?,
        })
    }

    /// Run the full pipeline and return the record.
    pub fn generate_post(&self, images: &mut impl ImageManager) -> Result<PostRecord, PostError> {
        let InferredTitle { title, slug } = self.infer_title()?;
        let id = self.next_id()?;

        let urls = self.prepare_images(images)?;
        let image_html = self.image_html(&urls);

        let text_file = staging::find_text_file(&self.add_dir)?;
        let text = content::read_text_content(text_file.as_deref(), &self.settings.default_excerpt)?;
        let TextContent { html, excerpt, tags } = text;

        Ok(PostRecord {
            id,
            title,
            micro_thumb_url: urls.micro_thumb,
            thumb_url: urls.thumb,
            post_url: urls.post,
            excerpt,
            content: image_html + &html,
            dsq_thread_id: self.thread_id(id, &slug),
            date: self.date.display(),
            url: self.post_url(&slug),
            category: self.settings.category.clone(),
            tags,
            title_plain: slug,
        })
    }

    /// Register the variant widths, resize, upload and sort URLs by role.
    fn prepare_images(&self, images: &mut impl ImageManager) -> Result<PostImages, PostError> {
        let widths = self.settings.widths;
        images.add_image_size(widths.micro_thumb);
        images.add_image_size(widths.thumb);
        images.add_image_size(widths.post);
        images.prepare_images()?;
        images.upload_images()?;

        let urls = images.image_urls();
        match <[String; 4]>::try_from(urls) {
            Ok([micro_thumb, thumb, post, original]) => Ok(PostImages {
                micro_thumb,
                thumb,
                post,
                original,
            }),
            Err(urls) => Err(PostError::MissingImageUrls {
                expected: 4,
                got: urls.len(),
            }),
        }
    }

    /// Linked post image, quote-escaped like the rest of the content.
    fn image_html(&self, urls: &PostImages) -> String {
        format!(
            r#"<a href=\"{}\"><img src=\"{}\" width=\"{}\"></a>"#,
            urls.original, urls.post, self.settings.widths.post
        )
    }

    /// `<domain><y>/<m>/<d>/<slug>/`
    fn post_url(&self, slug: &str) -> String {
        format!("{}{}{}/", self.settings.domain, self.date.date_path(), slug)
    }

    /// `<1000000 + id> <domain><y>/<m>/<d>/<slug>`
    fn thread_id(&self, id: u32, slug: &str) -> String {
        format!(
            "{} {}{}{}",
            THREAD_ID_OFFSET + u64::from(id),
            self.settings.domain,
            self.date.date_path(),
            slug
        )
    }
}
