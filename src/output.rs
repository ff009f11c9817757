//! CLI output formatting.
//!
//! Output leads with the post's identity (id and title); files and URLs
//! follow as indented context lines.
//!
//! # Output Format
//!
//! ## Add
//!
//! ```text
//! Post 358 Blue Hour
//!     Slug: blue-hour
//!     URL: https://example.com/blog/2026/10/8/blue-hour/
//!     micro thumb: https://cdn.example.com/blog/2026/10/8/BlueHour-w190.png
//!     thumb: https://cdn.example.com/blog/2026/10/8/BlueHour-w390.png
//!     post: https://cdn.example.com/blog/2026/10/8/BlueHour-w800.png
//!     Tags: ink, dusk
//!     Excerpt: Drawn at dusk on the pier...
//! Wrote posts/page358.json
//! ```
//!
//! ## Check
//!
//! ```text
//! Post 358 Blue Hour
//!     Slug: blue-hour
//!     Image: add/BlueHour.png
//!     Text: add/post.md
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::assemble::StagingReport;
use crate::post::PostRecord;
use std::path::Path;

/// Excerpts longer than this are cut in the summary.
const EXCERPT_PREVIEW: usize = 60;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn post_header(id: u32, title: &str) -> String {
    format!("Post {} {}", id, title)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_line(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Undo the quote escaping applied to stored excerpts.
fn display_excerpt(excerpt: &str) -> String {
    excerpt.replace("\\\"", "\"")
}

// ============================================================================
// add
// ============================================================================

/// Format the summary of a written post.
pub fn format_post_output(record: &PostRecord, written: &Path) -> Vec<String> {
    let ctx = indent(1);
    let mut lines = vec![
        post_header(record.id, &record.title),
        format!("{}Slug: {}", ctx, record.title_plain),
        format!("{}URL: {}", ctx, record.url),
        format!("{}micro thumb: {}", ctx, record.micro_thumb_url),
        format!("{}thumb: {}", ctx, record.thumb_url),
        format!("{}post: {}", ctx, record.post_url),
    ];
    if !record.tags.is_empty() {
        lines.push(format!("{}Tags: {}", ctx, record.tags.join(", ")));
    }
    lines.push(format!(
        "{}Excerpt: {}",
        ctx,
        truncate_line(&display_excerpt(&record.excerpt), EXCERPT_PREVIEW)
    ));
    lines.push(format!("Wrote {}", written.display()));
    lines
}

/// Print the post summary to stdout.
pub fn print_post_output(record: &PostRecord, written: &Path) {
    for line in format_post_output(record, written) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format what is staged and which id it would get.
pub fn format_check_output(report: &StagingReport) -> Vec<String> {
    let ctx = indent(1);
    let text = match &report.text_file {
        Some(path) => path.display().to_string(),
        None => "(none, default excerpt)".to_string(),
    };
    vec![
        post_header(report.next_id, &report.title.title),
        format!("{}Slug: {}", ctx, report.title.slug),
        format!("{}Image: {}", ctx, report.source_image.display()),
        format!("{}Text: {}", ctx, text),
    ]
}

/// Print the staging report to stdout.
pub fn print_check_output(report: &StagingReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
