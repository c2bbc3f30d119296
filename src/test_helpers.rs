//! Shared test utilities for the photo-mosaic test suite.
//!
//! Provides synthetic image fixtures on disk and a sink that records every
//! call so tests can assert on progress, timing and status output.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_photo_dir(&[("a.jpg", 100, 50), ("b.jpg", 80, 80)], &["notes.txt"]);
//! let sink = RecordingSink::default();
//! // ... run something against tmp.path() with &sink ...
//! assert_eq!(sink.processed_names().len(), 2);
//! ```

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

use crate::sink::{MosaicEvent, MosaicSink};
use image::{ImageEncoder, RgbImage};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a small valid JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Temp directory holding real JPEGs (`name, width, height`) and empty
/// non-image files.
pub fn setup_photo_dir(images: &[(&str, u32, u32)], others: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, width, height) in images {
        create_test_jpeg(&tmp.path().join(name), *width, *height);
    }
    for name in others {
        std::fs::write(tmp.path().join(name), b"not an image").unwrap();
    }
    tmp
}

// =========================================================================
// Recording sink
// =========================================================================

/// Sink that keeps every call in order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MosaicEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<MosaicEvent> {
        self.events.lock().unwrap().clone()
    }

    /// All progress percentages, in order.
    pub fn progress(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                MosaicEvent::Progress(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Names passed to `on_item_processed`, in order.
    pub fn processed_names(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                MosaicEvent::ItemProcessed { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                MosaicEvent::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn finished(&self) -> Option<Duration> {
        self.events().into_iter().find_map(|e| match e {
            MosaicEvent::Finished(total) => Some(total),
            _ => None,
        })
    }
}

impl MosaicSink for RecordingSink {
    fn on_progress(&self, percent: u8) {
        self.events.lock().unwrap().push(MosaicEvent::Progress(percent));
    }

    fn on_item_processed(&self, name: &str, elapsed: Duration) {
        self.events.lock().unwrap().push(MosaicEvent::ItemProcessed {
            name: name.to_string(),
            elapsed,
        });
    }

    fn on_finished(&self, total: Duration) {
        self.events.lock().unwrap().push(MosaicEvent::Finished(total));
    }

    fn on_status(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(MosaicEvent::Status(message.to_string()));
    }
}
