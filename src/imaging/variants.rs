//! Width variants of a post image and their URLs.
//!
//! An [`ImageManager`] collects the widths a post needs, produces a resized
//! copy for each next to the source, and publishes them together with the
//! source itself. URLs come back in registration order with the original
//! last:
//!
//! ```text
//! add_image_size(190)  → Sketch-w190.png   urls[0]
//! add_image_size(390)  → Sketch-w390.png   urls[1]
//! add_image_size(800)  → Sketch-w800.png   urls[2]
//!                        Sketch.png        urls[3]
//! ```
//!
//! Callers index into the URL list by position, so the order is part of the
//! contract.

use super::backend::{BackendError, ImageBackend};
use super::calculations::scaled_height;
use super::params::{Quality, ResizeParams};
use crate::dates::DateStamp;
use crate::storage::{ObjectStore, StorageError, object_key};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantError {
    #[error("Image processing failed: {0}")]
    Backend(#[from] BackendError),
    #[error("Upload failed: {0}")]
    Storage(#[from] StorageError),
    #[error("Images must be prepared before upload")]
    NotPrepared,
}

/// The image operations a post needs.
pub trait ImageManager {
    /// Register a target width; returns the variant's filename. No I/O.
    fn add_image_size(&mut self, width: u32) -> String;

    /// Produce a resized copy for every registered width.
    fn prepare_images(&mut self) -> Result<(), VariantError>;

    /// Publish the variants and the original.
    fn upload_images(&mut self) -> Result<(), VariantError>;

    /// One URL per registered width, in registration order, then the original.
    fn image_urls(&self) -> Vec<String>;
}

/// Whether prepared images are published to object storage.
pub enum Upload<'a> {
    Enabled {
        store: &'a dyn ObjectStore,
        bucket: String,
        key_prefix: String,
    },
    /// Dry run: URLs are the local file paths.
    Disabled,
}

/// Filename of the `width` variant of `source`: `<stem>-w<width>.<ext>`.
pub fn variant_filename(source: &Path, width: u32) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match source.extension() {
        Some(ext) => format!("{}-w{}.{}", stem, width, ext.to_string_lossy()),
        None => format!("{}-w{}", stem, width),
    }
}

/// [`ImageManager`] backed by an [`ImageBackend`] and an [`ObjectStore`].
pub struct ImageVariants<'a, B: ImageBackend> {
    backend: &'a B,
    source: PathBuf,
    quality: Quality,
    upload: Upload<'a>,
    date: DateStamp,
    sizes: Vec<u32>,
    prepared: Vec<PathBuf>,
    urls: Vec<String>,
}

impl<'a, B: ImageBackend> ImageVariants<'a, B> {
    pub fn new(
        backend: &'a B,
        source: PathBuf,
        quality: Quality,
        upload: Upload<'a>,
        date: DateStamp,
    ) -> Self {
        Self {
            backend,
            source,
            quality,
            upload,
            date,
            sizes: Vec::new(),
            prepared: Vec::new(),
            urls: Vec::new(),
        }
    }

    /// Files produced by [`prepare_images`](ImageManager::prepare_images),
    /// original last.
    pub fn prepared_paths(&self) -> &[PathBuf] {
        &self.prepared
    }

    fn variant_path(&self, width: u32) -> PathBuf {
        let name = variant_filename(&self.source, width);
        match self.source.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl<B: ImageBackend> ImageManager for ImageVariants<'_, B> {
    fn add_image_size(&mut self, width: u32) -> String {
        self.sizes.push(width);
        variant_filename(&self.source, width)
    }

    fn prepare_images(&mut self) -> Result<(), VariantError> {
        let dims = self.backend.identify(&self.source)?;

        let mut prepared = Vec::with_capacity(self.sizes.len() + 1);
        for &width in &self.sizes {
            let output = self.variant_path(width);
            self.backend.resize(&ResizeParams {
                source: self.source.clone(),
                output: output.clone(),
                width,
                height: scaled_height((dims.width, dims.height), width),
                quality: self.quality,
            })?;
            prepared.push(output);
        }
        prepared.push(self.source.clone());

        self.prepared = prepared;
        Ok(())
    }

    fn upload_images(&mut self) -> Result<(), VariantError> {
        let Upload::Enabled {
            store,
            bucket,
            key_prefix,
        } = &self.upload
        else {
            return Ok(());
        };
        if self.prepared.is_empty() {
            return Err(VariantError::NotPrepared);
        }

        let date_path = self.date.date_path();
        let mut urls = Vec::with_capacity(self.prepared.len());
        for path in &self.prepared {
            let filename = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let key = object_key(key_prefix, &date_path, &filename);
            urls.push(store.upload(path, bucket, &key)?);
        }
        self.urls = urls;
        Ok(())
    }

    fn image_urls(&self) -> Vec<String> {
        match self.upload {
            Upload::Enabled { .. } => self.urls.clone(),
            Upload::Disabled => self
                .prepared
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}
