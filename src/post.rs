//! The post record handed to the site renderer.
//!
//! A record is written once per post as `page<ID>.json`. The renderer reads
//! these files with a fixed key order and a tab-indented layout:
//!
//! ```text
//! {
//! 	"version":1,
//! 	"thumbImg":"https://…/BlueHour-w390.png",
//! 	"postImg":"https://…/BlueHour-w800.png",
//! 	"filename":"index.html",
//! 	"id":358,
//! 	"date":"2026-10-8 9:5:3",
//! 	"url":"https://example.com/blog/2026/10/8/blue-hour/",
//! 	"title":"Blue Hour",
//! 	"title_plain":"blue-hour",
//! 	"excerpt":"…",
//! 	"content":"<a href=\"…\"><img src=\"…\" width=\"800\"></a>…",
//! 	"dsq_thread_id":"1000358 https://example.com/blog/2026/10/8/blue-hour",
//! 	"thumbBase64":"",
//! 	"category":"blog post",
//! 	"microThumbUrl":"https://…/BlueHour-w190.png",
//! 	"tags":["ink","sketch"]
//! }
//! ```
//!
//! `excerpt` and `content` are kept quote-escaped (see
//! [`crate::content::normalize_quotes`]); their `\"` escapes come out
//! unchanged and any newline or backslash in them is JSON-escaped, so the
//! file always parses. `tags` is left out when the post has none.

use crate::sequence::record_filename;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Record layout version.
pub const RECORD_VERSION: u32 = 1;

/// Page the renderer writes for every post.
pub const HTML_FILENAME: &str = "index.html";

/// A fully assembled post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: u32,
    /// Display title ("Blue Hour").
    pub title: String,
    /// URL form of the title ("blue-hour").
    pub title_plain: String,
    pub micro_thumb_url: String,
    pub thumb_url: String,
    /// Full-size post image shown in the article.
    pub post_url: String,
    /// Quote-escaped plain text.
    pub excerpt: String,
    /// Quote-escaped single-line HTML: image block followed by the body.
    pub content: String,
    pub dsq_thread_id: String,
    pub date: String,
    pub url: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// JSON string literal for `s`.
fn json_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// JSON string literal for text that already carries `\"` escapes.
fn json_escaped_string(s: &str) -> String {
    json_string(&s.replace("\\\"", "\""))
}

impl PostRecord {
    /// Render the record in the renderer's layout.
    pub fn to_json(&self) -> String {
        let mut fields = vec![
            format!("\"version\":{}", RECORD_VERSION),
            format!("\"thumbImg\":{}", json_string(&self.thumb_url)),
            format!("\"postImg\":{}", json_string(&self.post_url)),
            format!("\"filename\":{}", json_string(HTML_FILENAME)),
            format!("\"id\":{}", self.id),
            format!("\"date\":{}", json_string(&self.date)),
            format!("\"url\":{}", json_string(&self.url)),
            format!("\"title\":{}", json_string(&self.title)),
            format!("\"title_plain\":{}", json_string(&self.title_plain)),
            format!("\"excerpt\":{}", json_escaped_string(&self.excerpt)),
            format!("\"content\":{}", json_escaped_string(&self.content)),
            format!("\"dsq_thread_id\":{}", json_string(&self.dsq_thread_id)),
            "\"thumbBase64\":\"\"".to_string(),
            format!("\"category\":{}", json_string(&self.category)),
            format!("\"microThumbUrl\":{}", json_string(&self.micro_thumb_url)),
        ];
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| json_string(t)).collect();
            fields.push(format!("\"tags\":[{}]", tags.join(",")));
        }

        let body: Vec<String> = fields.into_iter().map(|f| format!("\t{f}")).collect();
        format!("{{\n{}\n}}", body.join(",\n"))
    }
}

/// Write `record` as `page<ID>.json` into `posts_dir` and return the path.
pub fn write_record(record: &PostRecord, posts_dir: &Path) -> Result<PathBuf, std::io::Error> {
    fs::create_dir_all(posts_dir)?;
    let path = posts_dir.join(record_filename(record.id));
    fs::write(&path, record.to_json())?;
    Ok(path)
}
