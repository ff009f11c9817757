//! Post text: excerpt, HTML body and hashtags.
//!
//! The optional markdown (or plain text) file next to the source image is the
//! post's body. Three things are derived from it:
//!
//! - **Excerpt**: plain-text teaser for listings and `<meta>` descriptions.
//!   Markdown links and images are removed first; long text is cut and
//!   marked with `" ..."`.
//! - **HTML**: CommonMark without extensions, collapsed onto a single line.
//! - **Tags**: `#hashtags` in order of appearance.
//!
//! ## Quote escaping
//!
//! The site renderer expects excerpt and HTML in their escaped form, so both
//! go through [`normalize_quotes`]: apostrophes become `’` and double quotes
//! become `\"`. This is not general JSON escaping; the record writer (see
//! [`crate::post`]) takes care of newlines and backslashes.

use pulldown_cmark::{Parser, html as md_html};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Excerpts longer than this many bytes are truncated.
pub const EXCERPT_LIMIT: usize = 155;

static LINK_OR_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\]\(.*\)").expect("valid regex"));

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-zÄÖÜäöüß]+)\b").expect("valid regex"));

/// Everything derived from the post's text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent {
    /// Single-line, quote-escaped HTML. Empty without a text file.
    pub html: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

impl TextContent {
    /// Content for a post without a text file.
    pub fn empty(default_excerpt: &str) -> Self {
        Self {
            html: String::new(),
            excerpt: default_excerpt.to_string(),
            tags: Vec::new(),
        }
    }

    /// Derive excerpt, HTML and tags from raw markdown.
    pub fn from_markdown(markdown: &str, default_excerpt: &str) -> Self {
        Self {
            html: markdown_to_html(markdown),
            excerpt: generate_excerpt(markdown, default_excerpt),
            tags: extract_tags(markdown),
        }
    }
}

/// Read the text file (if any) and derive the post content from it.
pub fn read_text_content(
    path: Option<&Path>,
    default_excerpt: &str,
) -> Result<TextContent, std::io::Error> {
    match path {
        Some(path) => {
            let markdown = fs::read_to_string(path)?;
            Ok(TextContent::from_markdown(&markdown, default_excerpt))
        }
        None => Ok(TextContent::empty(default_excerpt)),
    }
}

/// Remove markdown link and image spans (`[label](target)`, `![alt](src)`).
///
/// The match is greedy within a line: two links on the same line are removed
/// together with the text between them.
pub fn strip_links_and_images(text: &str) -> String {
    LINK_OR_IMAGE.replace_all(text, "").into_owned()
}

/// Replace `'` with `’` and escape `"` as `\"`.
pub fn normalize_quotes(text: &str) -> String {
    text.replace('\'', "’").replace('"', "\\\"")
}

/// Build the excerpt for a post body.
///
/// - Longer than [`EXCERPT_LIMIT`] bytes: cut at the last character boundary
///   within the limit, followed by `" ..."`.
/// - Empty after stripping links: `default_excerpt`, untouched.
/// - Otherwise: the text without one trailing newline.
pub fn generate_excerpt(text: &str, default_excerpt: &str) -> String {
    let text = strip_links_and_images(text);
    if text.len() > EXCERPT_LIMIT {
        let head = &text[..floor_char_boundary(&text, EXCERPT_LIMIT)];
        return normalize_quotes(&format!("{head} ..."));
    }
    if text.is_empty() {
        return default_excerpt.to_string();
    }
    normalize_quotes(text.strip_suffix('\n').unwrap_or(&text))
}

/// Largest char boundary in `text` that is at most `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0)
}

/// Convert markdown to single-line, quote-escaped HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    let trimmed = html.strip_suffix('\n').unwrap_or(&html);
    normalize_quotes(trimmed).replace('\n', " ")
}

/// Collect `#hashtags` without the leading `#`, in order of appearance.
pub fn extract_tags(markdown: &str) -> Vec<String> {
    HASHTAG
        .captures_iter(markdown)
        .map(|c| c[1].to_string())
        .collect()
}
