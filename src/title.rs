//! Title and slug inference from image filenames.
//!
//! A post's title comes from the name of its source image. The filename is
//! tokenized twice, with two different rules:
//!
//! ## Display title
//!
//! The stem is split at separator characters (`-`, `_`, space, `,`, `.`),
//! then every segment is split again at CamelCase boundaries and digit runs.
//! All tokens are joined with single spaces and title-cased:
//!
//! - `iPadTest.png` → "I Pad Test"
//! - `this-is-a-test.png` → "This Is A Test"
//! - `even4me.png` → "Even 4 Me"
//! - `ÜberGröße.jpg` → "Über Größe"
//!
//! ## Slug
//!
//! The slug tokenizer runs on the raw stem and only knows ASCII: a lowercase
//! run at the very start, capitalized runs, and digit runs. Separators and
//! accented letters are dropped rather than split on:
//!
//! - `TestImage.png` → "test-image"
//! - `iPadTest.png` → "i-pad-test"
//! - `this-is-a-test.png` → "this"
//!
//! The slug ends up in published URLs, so its rule cannot change without
//! breaking existing links.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Characters that separate words in a filename stem.
const SEPARATORS: &[char] = &['-', '_', ' ', ',', '.'];

static CAMEL_CASE_AND_NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+|[A-ZÄÜÖ]?[a-zäüöß]*").expect("valid regex"));

static SLUG_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z]+|[A-Z][a-z]*|[0-9]+").expect("valid regex"));

/// Display title and slug inferred from one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredTitle {
    /// Human-readable, title-cased form ("Test Image").
    pub title: String,
    /// Lowercase, dash-joined form used in URLs ("test-image").
    pub slug: String,
}

/// Infer title and slug from a filename, ignoring its extension.
pub fn infer_from_filename(filename: &str) -> InferredTitle {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    InferredTitle {
        title: infer_title(&stem),
        slug: infer_slug(&stem),
    }
}

/// Build the display title for a filename stem.
pub fn infer_title(stem: &str) -> String {
    let words: Vec<&str> = split_at_special_chars(stem)
        .into_iter()
        .flat_map(split_camel_case_and_numbers)
        .collect();
    title_case(&words.join(" "))
}

/// Build the URL slug for a filename stem.
pub fn infer_slug(stem: &str) -> String {
    let parts: Vec<&str> = SLUG_TOKENS.find_iter(stem).map(|m| m.as_str()).collect();
    parts.join("-").to_lowercase()
}

/// Split at separator characters, discarding empty segments.
pub fn split_at_special_chars(whole: &str) -> Vec<&str> {
    whole
        .split(SEPARATORS)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Split one segment into CamelCase words and digit runs.
///
/// Characters outside the matched alphabet (e.g. `é`, `(`) act as silent
/// boundaries: they never appear in a token.
pub fn split_camel_case_and_numbers(whole: &str) -> Vec<&str> {
    CAMEL_CASE_AND_NUMBERS
        .find_iter(whole)
        .map(|m| m.as_str())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Upper-case the first character of every space-separated word.
///
/// Characters whose upper-case form is more than one character (`ß`) are
/// left alone.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut upper = first.to_uppercase();
                    let capital = match (upper.next(), upper.next()) {
                        (Some(c), None) => c,
                        _ => first,
                    };
                    std::iter::once(capital).chain(chars).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
