//! Image backend trait and shared types.
//!
//! The [`MosaicBackend`] trait defines the two codec operations the mosaic
//! pipeline needs: decode one source photo, and encode the finished canvas.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust, built on the
//! `image` crate. Tests swap in a mock that serves synthetic bitmaps.

use super::params::EncodeParams;
use image::{DynamicImage, RgbImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Codec operations used by the composer and runner.
///
/// Decoding happens lazily, one image at a time; nothing the backend returns
/// is retained after the image has been drawn onto the canvas.
pub trait MosaicBackend: Sync {
    /// Decode an image file into an in-memory bitmap.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode the composed canvas and write it to `params.output`.
    fn encode(&self, canvas: &RgbImage, params: &EncodeParams) -> Result<(), BackendError>;
}
