//! # blog-add
//!
//! Prepares one blog post for a static site generator. The staging
//! directory holds the post: a source image and, optionally, a markdown
//! body. Everything else is inferred.
//!
//! ```text
//! add/BlueHour.png   →  title "Blue Hour", slug "blue-hour"
//!                    →  BlueHour-w190/-w390/-w800.png, uploaded with the original
//! add/post.md        →  excerpt, single-line HTML, #tags
//! posts/page357.json →  next id 358
//!                    =  posts/page358.json
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`assemble`] | Runs the pipeline and produces a [`post::PostRecord`] |
//! | [`title`] | Title and slug inference from the image filename |
//! | [`staging`] | Finds the source image and text file in the staging directory |
//! | [`sequence`] | Next post id from the existing `page<N>.json` records |
//! | [`content`] | Markdown to excerpt, single-line HTML and hashtags |
//! | [`dates`] | The timestamp shared by URL, storage keys and record |
//! | [`imaging`] | Pure-Rust resizing and the width-variant [`imaging::ImageManager`] |
//! | [`storage`] | Object stores images are published to |
//! | [`post`] | The record and its on-disk JSON layout |
//! | [`config`] | `blog.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Injected Image Work
//!
//! [`assemble::PostAssembler`] only talks to an [`imaging::ImageManager`].
//! The CLI hands it an [`imaging::ImageVariants`] over the `image` crate and
//! a real store; tests hand it a recording mock. Nothing in the assembler
//! decodes an image or opens a socket.
//!
//! ## Fixed Record Layout
//!
//! The site renderer reads post records by key order and expects the body
//! strings pre-escaped, so [`post::PostRecord::to_json`] writes the layout by
//! hand instead of deriving `Serialize`.
//!
//! ## All or Nothing
//!
//! The record is written only after every image is uploaded. A failed run
//! leaves the posts directory untouched, so rerunning it is safe.

pub mod assemble;
pub mod config;
pub mod content;
pub mod dates;
pub mod imaging;
pub mod output;
pub mod post;
pub mod sequence;
pub mod staging;
pub mod storage;
pub mod title;

#[cfg(test)]
pub(crate) mod test_helpers;
