//! Configuration module.
//!
//! Handles loading, merging and validating `blog.toml`. The file is sparse:
//! user values are merged on top of stock defaults, so a config only names
//! what differs from them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! add_dir = "add"           # Staging directory of the next post
//! posts_dir = "posts"       # Directory of published post records
//!
//! [blog]
//! domain = "https://example.com/blog/"
//! default_excerpt = "A blog."
//! category = "blog post"
//!
//! [images]
//! micro_thumb = 190         # Width of the micro thumbnail
//! thumb = 390               # Width of the listing thumbnail
//! post = 800                # Width of the image shown in the post
//! quality = 90              # JPEG quality (1-100)
//!
//! [storage]
//! upload = true             # false = dry run, URLs are local paths
//! backend = "http"          # "http" or "directory"
//! bucket = "blog-assets"
//! key_prefix = "blog"
//! endpoint = ""             # http: base URL files are PUT to
//! public_url = ""           # base URL of stored objects (empty = derived)
//! root = "bucket"           # directory: local mirror root
//! token_env = "BLOG_ADD_UPLOAD_TOKEN"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `blog.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Staging directory holding the next post's image and text.
    pub add_dir: PathBuf,
    /// Directory of existing `page<ID>.json` records.
    pub posts_dir: PathBuf,
    /// Site-level post settings.
    pub blog: SiteConfig,
    /// Variant widths and encoding quality.
    pub images: ImagesConfig,
    /// Where images are published.
    pub storage: StorageConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            add_dir: PathBuf::from("add"),
            posts_dir: PathBuf::from("posts"),
            blog: SiteConfig::default(),
            images: ImagesConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.blog.domain.ends_with('/') {
            return Err(ConfigError::Validation(
                "blog.domain must end with '/'".into(),
            ));
        }
        // Stands in for quote-escaped post text, so it must not need escaping.
        if self.blog.default_excerpt.contains(['"', '\\']) {
            return Err(ConfigError::Validation(
                "blog.default_excerpt must not contain '\"' or '\\'".into(),
            ));
        }
        let images = &self.images;
        if images.micro_thumb == 0 || images.thumb == 0 || images.post == 0 {
            return Err(ConfigError::Validation(
                "images widths must be non-zero".into(),
            ));
        }
        if images.quality == 0 || images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        let storage = &self.storage;
        if storage.upload && storage.bucket.is_empty() {
            return Err(ConfigError::Validation(
                "storage.bucket must be set when uploading".into(),
            ));
        }
        if storage.upload && storage.backend == StorageBackend::Http && storage.endpoint.is_empty()
        {
            return Err(ConfigError::Validation(
                "storage.endpoint must be set for the http backend".into(),
            ));
        }
        Ok(())
    }
}

/// Site-level settings copied into every post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Blog root URL, with trailing slash. Post URLs are built under it.
    pub domain: String,
    /// Excerpt for posts without text.
    pub default_excerpt: String,
    /// Category of every post.
    pub category: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "https://example.com/blog/".to_string(),
            default_excerpt: "A blog.".to_string(),
            category: "blog post".to_string(),
        }
    }
}

/// Variant widths, registered in this order: micro thumb, thumb, post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub micro_thumb: u32,
    pub thumb: u32,
    pub post: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            micro_thumb: 190,
            thumb: 390,
            post: 800,
            quality: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Http,
    Directory,
}

/// Object storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Publish images. When false, record URLs are local file paths.
    pub upload: bool,
    pub backend: StorageBackend,
    pub bucket: String,
    /// First segment of every object key.
    pub key_prefix: String,
    /// HTTP backend: base URL files are PUT to.
    pub endpoint: String,
    /// Base URL of stored objects. Empty = derived from the backend.
    pub public_url: String,
    /// Directory backend: root of the local bucket mirror.
    pub root: PathBuf,
    /// Environment variable holding the HTTP bearer token.
    pub token_env: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload: true,
            backend: StorageBackend::Http,
            bucket: "blog-assets".to_string(),
            key_prefix: "blog".to_string(),
            endpoint: String::new(),
            public_url: String::new(),
            root: PathBuf::from("bucket"),
            token_env: "BLOG_ADD_UPLOAD_TOKEN".to_string(),
        }
    }
}

impl StorageConfig {
    /// `public_url`, or `None` when unset.
    pub fn public_url(&self) -> Option<String> {
        Some(self.public_url.clone()).filter(|u| !u.is_empty())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BlogConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BlogConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BlogConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Overlay that turns off uploading (`--no-upload`).
pub fn dry_run_overlay() -> toml::Value {
    let mut storage = toml::Table::new();
    storage.insert("upload".to_string(), toml::Value::Boolean(false));
    let mut root = toml::Table::new();
    root.insert("storage".to_string(), toml::Value::Table(storage));
    toml::Value::Table(root)
}

/// Load config from `path`, merged over stock defaults.
pub fn load_config(path: &Path) -> Result<BlogConfig, ConfigError> {
    load_config_with(path, None)
}

/// Load config from `path` with command-line overrides merged on top.
///
/// Layers, lowest first: stock defaults, the file, `overrides`. Relative
/// `add_dir`, `posts_dir` and `storage.root` are resolved against the config
/// file's directory.
pub fn load_config_with(
    path: &Path,
    overrides: Option<toml::Value>,
) -> Result<BlogConfig, ConfigError> {
    let overlay = match (load_raw_config(path)?, overrides) {
        (Some(file), Some(cli)) => Some(merge_toml(file, cli)),
        (file, cli) => file.or(cli),
    };
    let mut config = resolve_config(stock_defaults_value(), overlay)?;

    let base = path.parent().unwrap_or(Path::new(""));
    config.add_dir = base.join(&config.add_dir);
    config.posts_dir = base.join(&config.posts_dir);
    config.storage.root = base.join(&config.storage.root);
    Ok(config)
}

/// Returns a fully-commented stock `blog.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# blog-add Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Relative paths are resolved against the directory of this file.

# Staging directory: one source image (.png/.jpg) and an optional .md/.txt.
add_dir = "add"

# Published post records (page<ID>.json). The next post gets the highest
# id found here plus one.
posts_dir = "posts"

# ---------------------------------------------------------------------------
# Blog
# ---------------------------------------------------------------------------
[blog]
# Blog root URL, must end with "/". Posts live at <domain><y>/<m>/<d>/<slug>/.
domain = "https://example.com/blog/"

# Excerpt for posts without a text file. No double quotes or backslashes.
default_excerpt = "A blog."

category = "blog post"

# ---------------------------------------------------------------------------
# Image variants
# ---------------------------------------------------------------------------
[images]
# Pixel widths of the three variants generated for every post.
micro_thumb = 190
thumb = 390
post = 800

# JPEG quality (1 = worst, 100 = best). PNG output is lossless.
quality = 90

# ---------------------------------------------------------------------------
# Storage
# ---------------------------------------------------------------------------
[storage]
# Set to false for a dry run: nothing is uploaded and the record contains
# local file paths instead of URLs.
upload = true

# "http": PUT to <endpoint>/<bucket>/<key> (S3-compatible).
# "directory": copy into <root>/<bucket>/<key>.
backend = "http"

bucket = "blog-assets"

# Keys are <key_prefix>/<y>/<m>/<d>/<filename>.
key_prefix = "blog"

endpoint = ""

# Base URL of stored objects, e.g. a CDN. Empty = the upload URL (http) or
# the written file path (directory).
public_url = ""

root = "bucket"

# Environment variable holding a bearer token for the http backend.
token_env = "BLOG_ADD_UPLOAD_TOKEN"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_values() {
        let config = BlogConfig::default();
        assert_eq!(config.add_dir, PathBuf::from("add"));
        assert_eq!(config.images.micro_thumb, 190);
        assert_eq!(config.images.thumb, 390);
        assert_eq!(config.images.post, 800);
        assert_eq!(config.blog.category, "blog post");
        assert_eq!(config.storage.key_prefix, "blog");
        assert_eq!(config.storage.backend, StorageBackend::Http);
    }

    #[test]
    fn stock_defaults_need_an_endpoint() {
        // Uploading over http is the default, but there is no default endpoint.
        let err = resolve_config(stock_defaults_value(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(m) if m.contains("endpoint")));
    }

    #[test]
    fn sparse_overlay_keeps_other_defaults() {
        let overlay: toml::Value = toml::from_str(
            r#"
            [blog]
            domain = "https://drewing.de/blog/"
            [storage]
            endpoint = "https://s3.example.com"
            "#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.blog.domain, "https://drewing.de/blog/");
        assert_eq!(config.blog.category, "blog post");
        assert_eq!(config.storage.endpoint, "https://s3.example.com");
        assert!(config.storage.upload);
    }

    #[test]
    fn merge_replaces_scalars_and_merges_tables() {
        let base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn unknown_keys_rejected() {
        let overlay: toml::Value = toml::from_str("[images]\nsizes = [1, 2]").unwrap();
        let err = resolve_config(stock_defaults_value(), Some(overlay)).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn domain_must_end_with_slash() {
        let mut config = BlogConfig::default();
        config.storage.upload = false;
        config.blog.domain = "https://example.com/blog".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_excerpt_must_not_contain_quotes() {
        let mut config = BlogConfig::default();
        config.storage.upload = false;
        config.blog.default_excerpt = "A \"quoted\" blog".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_width_rejected() {
        let mut config = BlogConfig::default();
        config.storage.upload = false;
        config.images.thumb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn quality_out_of_range_rejected() {
        let mut config = BlogConfig::default();
        config.storage.upload = false;
        config.images.quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn directory_backend_needs_no_endpoint() {
        let overlay: toml::Value =
            toml::from_str("[storage]\nbackend = \"directory\"").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Directory);
    }

    #[test]
    fn dry_run_needs_no_storage_settings() {
        let config = resolve_config(stock_defaults_value(), Some(dry_run_overlay())).unwrap();
        assert!(!config.storage.upload);
    }

    #[test]
    fn public_url_empty_is_none() {
        let mut storage = StorageConfig::default();
        assert_eq!(storage.public_url(), None);
        storage.public_url = "https://cdn.example.com".to_string();
        assert_eq!(storage.public_url().as_deref(), Some("https://cdn.example.com"));
    }

    #[test]
    fn load_resolves_paths_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog.toml");
        fs::write(&path, "[storage]\nupload = false\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.add_dir, tmp.path().join("add"));
        assert_eq!(config.posts_dir, tmp.path().join("posts"));
    }

    #[test]
    fn missing_file_with_dry_run_override() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog.toml");

        let config = load_config_with(&path, Some(dry_run_overlay())).unwrap();
        assert!(!config.storage.upload);
        assert_eq!(config.blog.domain, "https://example.com/blog/");
    }

    #[test]
    fn override_wins_over_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog.toml");
        fs::write(
            &path,
            "[storage]\nupload = true\nendpoint = \"https://s3.example.com\"\n",
        )
        .unwrap();

        let config = load_config_with(&path, Some(dry_run_overlay())).unwrap();
        assert!(!config.storage.upload);
        assert_eq!(config.storage.endpoint, "https://s3.example.com");
    }

    #[test]
    fn load_invalid_toml_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog.toml");
        fs::write(&path, "this is not = = toml").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config: BlogConfig = value.try_into().unwrap();
        let defaults = BlogConfig::default();
        assert_eq!(config.blog.domain, defaults.blog.domain);
        assert_eq!(config.images.post, defaults.images.post);
        assert_eq!(config.storage.token_env, defaults.storage.token_env);
    }
}
