//! Image codecs and geometry in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` |
//! | **Scale** | `image::imageops::resize` (Lanczos3), in the composer |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for row height, scaled width, cm → px
//! - **Parameters**: Data structures describing encode operations
//! - **Backend**: [`MosaicBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, MosaicBackend};
pub use calculations::{
    MAX_CANVAS_PIXELS, ROWS_PER_CANVAS, canvas_within_limit, cm_to_pixels, pixel_length,
    progress_percent, row_height, scaled_width, visible_source_width,
};
pub use params::{EncodeParams, Quality};
pub use rust_backend::RustBackend;
