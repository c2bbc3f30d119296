//! Source image discovery.
//!
//! Reads the direct entries of one directory (no recursion), keeps the JPEG
//! files and shuffles them:
//!
//! ```text
//! photos/
//! ├── IMG_0001.JPG        # accepted
//! ├── beach.jpeg          # accepted
//! ├── notes.txt           # skipped, reported
//! ├── scan.png            # skipped, reported
//! ├── shot.Jpg            # skipped: suffixes are case-sensitive
//! └── 2019/               # skipped: subdirectories are not descended into
//! ```
//!
//! Skipped entries are not errors. They are logged and returned in
//! [`DirectoryScan::skipped`] so the runner can surface them.

use crate::imaging::{BackendError, MosaicBackend};
use image::DynamicImage;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name suffixes accepted as source images. Matched case-sensitively.
pub const IMAGE_SUFFIXES: &[&str] = &[".jpg", ".jpeg", ".JPG", ".JPEG"];

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One source photo on disk. Decoding is deferred until the composer asks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    path: PathBuf,
    name: String,
}

impl ImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown in progress output.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decode(&self, backend: &impl MosaicBackend) -> Result<DynamicImage, BackendError> {
        backend.decode(&self.path)
    }
}

/// Filter result for one directory, in path order.
#[derive(Debug, Default)]
pub struct DirectoryScan {
    pub images: Vec<ImageSource>,
    /// Rejected entries, by file name
    pub skipped: Vec<String>,
}

impl DirectoryScan {
    /// Apply a uniform random permutation to the accepted images.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.images.shuffle(rng);
    }
}

/// Whether a file name carries one of the [`IMAGE_SUFFIXES`].
pub fn has_image_suffix(name: &str) -> bool {
    IMAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Split the direct entries of `dir` into accepted images and skipped names.
pub fn scan_directory(dir: &Path) -> Result<DirectoryScan, CollectError> {
    if !dir.is_dir() {
        return Err(CollectError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();

    let mut scan = DirectoryScan::default();
    for path in entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if path.is_file() && has_image_suffix(&name) {
            scan.images.push(ImageSource::new(path));
        } else {
            tracing::info!(file = %name, "skipping non-image entry");
            scan.skipped.push(name);
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        accepted = scan.images.len(),
        skipped = scan.skipped.len(),
        "scanned source directory"
    );
    Ok(scan)
}

/// Collect the images in `dir` in a uniformly random order.
pub fn collect(dir: &Path) -> Result<Vec<ImageSource>, CollectError> {
    collect_with_rng(dir, &mut rand::rng())
}

/// [`collect`] with a caller-supplied RNG. A seeded RNG gives a reproducible
/// order for the same directory contents.
pub fn collect_with_rng<R: Rng + ?Sized>(
    dir: &Path,
    rng: &mut R,
) -> Result<Vec<ImageSource>, CollectError> {
    let mut scan = scan_directory(dir)?;
    scan.shuffle(rng);
    Ok(scan.images)
}
