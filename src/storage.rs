//! Object storage for published images.
//!
//! Images are stored under date-partitioned keys:
//!
//! ```text
//! blog/2026/10/8/BlueHour-w190.png
//! blog/2026/10/8/BlueHour.png
//! ```
//!
//! Two stores are available:
//!
//! - [`HttpStore`] PUTs the file to an S3-compatible endpoint
//!   (`<endpoint>/<bucket>/<key>`), optionally with a bearer token.
//! - [`DirectoryStore`] copies the file into a local mirror of the bucket,
//!   for sites served from the same machine or for staging runs.
//!
//! Both return the public URL of the stored object: `<public_url>/<key>`
//! when a public base URL is configured.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Upload of {key} rejected with status {status}")]
    Status { key: String, status: u16 },
}

/// Object storage uploader.
pub trait ObjectStore {
    /// Upload `local` as `key` in `bucket` and return its public URL.
    fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<String, StorageError>;
}

/// Storage key for `filename`: `<prefix>/<date_path><filename>`.
///
/// `date_path` carries its own trailing slash (`2026/10/8/`).
pub fn object_key(prefix: &str, date_path: &str, filename: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{date_path}{filename}")
    } else {
        format!("{prefix}/{date_path}{filename}")
    }
}

/// Join a base URL and a key with exactly one slash.
fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

/// S3-compatible store reached over plain HTTP PUT.
pub struct HttpStore {
    client: Client,
    endpoint: String,
    public_url: Option<String>,
    token: Option<String>,
}

impl HttpStore {
    pub fn new(endpoint: &str, public_url: Option<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            public_url,
            token,
        }
    }

    /// Address the file is PUT to.
    pub fn upload_url(&self, bucket: &str, key: &str) -> String {
        join_url(&join_url(&self.endpoint, bucket), key)
    }

    /// Address the stored object is reachable at.
    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        match &self.public_url {
            Some(base) => join_url(base, key),
            None => self.upload_url(bucket, key),
        }
    }
}

impl ObjectStore for HttpStore {
    fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<String, StorageError> {
        let body = fs::read(local)?;
        let mime = mime_guess::from_path(local).first_or_octet_stream();

        let mut request = self
            .client
            .put(self.upload_url(bucket, key))
            .header(CONTENT_TYPE, mime.as_ref())
            .body(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(StorageError::Status {
                key: key.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(self.public_url(bucket, key))
    }
}

/// Local mirror of a bucket: `<root>/<bucket>/<key>`.
pub struct DirectoryStore {
    root: PathBuf,
    public_url: Option<String>,
}

impl DirectoryStore {
    pub fn new(root: PathBuf, public_url: Option<String>) -> Self {
        Self { root, public_url }
    }
}

impl ObjectStore for DirectoryStore {
    fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<String, StorageError> {
        let target = self.root.join(bucket).join(key);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(local, &target)?;

        Ok(match &self.public_url {
            Some(base) => join_url(base, key),
            None => target.to_string_lossy().into_owned(),
        })
    }
}
