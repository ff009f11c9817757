//! Image processing for post images.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | Lanczos3, re-encoded in the source's format |
//! | **Variants** | naming, ordering and upload of width variants |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Variants**: [`ImageManager`] trait + [`ImageVariants`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;
pub mod variants;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use params::{Quality, ResizeParams};
pub use rust_backend::RustBackend;
pub use variants::{ImageManager, ImageVariants, Upload, VariantError, variant_filename};
