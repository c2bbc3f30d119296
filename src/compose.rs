//! Mosaic layout and drawing.
//!
//! Greedy row packing in a single forward pass. Every image is scaled to the
//! same row height (`canvas_height / 11`, floored) and placed left to right;
//! when the next image would overflow the right edge, the cursor wraps to
//! the start of the next row. The pass ends when the items run out or a
//! wrap lands at or below the bottom edge, whichever comes first.
//!
//! ```text
//! canvas_width
//! ┌──────────────────────────────┐
//! │[ a ][  b  ][ c ][   d   ]    │  ← d fits, e does not: wrap
//! │[   e   ][ f ][  g  ][ h ]    │
//! │ ...                          │
//! └──────────────────────────────┘  ← wrap at y >= canvas_height: stop
//! ```
//!
//! There is no lookahead and no re-layout; leftover space at the end of a
//! row stays background-coloured.

use crate::collect::ImageSource;
use crate::imaging::{
    BackendError, MAX_CANVAS_PIXELS, MosaicBackend, canvas_within_limit, progress_percent,
    row_height, scaled_width, visible_source_width,
};
use crate::sink::MosaicSink;
use crate::types::ProcessingRecord;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Invalid canvas geometry: {width}x{height} px gives a row height of {row_height} px")]
    InvalidCanvasGeometry {
        width: u32,
        height: u32,
        row_height: u32,
    },
    #[error("Canvas of {width}x{height} px exceeds the {max} pixel limit", max = MAX_CANVAS_PIXELS)]
    CanvasTooLarge { width: u32, height: u32 },
    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: BackendError,
    },
}

/// Per-run composition settings.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Fill colour for canvas area no image covers
    pub background: Rgb<u8>,
    /// Skip images that fail to decode instead of aborting the run
    pub skip_unreadable: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            background: Rgb([255, 255, 255]),
            skip_unreadable: false,
        }
    }
}

/// Composed canvas plus what went into it.
#[derive(Debug)]
pub struct Composition {
    pub canvas: RgbImage,
    /// One entry per placed image, in placement order
    pub records: Vec<ProcessingRecord>,
    /// Names of images skipped because they could not be decoded
    pub unreadable: Vec<String>,
}

/// Top-left corner of a placed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: u32,
    pub y: u32,
}

/// Next free position on the canvas.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    x: u32,
    y: u32,
    row_height: u32,
    canvas_width: u32,
    canvas_height: u32,
}

impl LayoutCursor {
    /// Start at the top-left corner of a `canvas_width × canvas_height` canvas.
    ///
    /// Fails when either dimension is zero or the canvas is too short to
    /// give a row height of at least one pixel.
    pub fn new(canvas_width: u32, canvas_height: u32) -> Result<Self, ComposeError> {
        let row_height = row_height(canvas_height);
        if canvas_width == 0 || row_height == 0 {
            return Err(ComposeError::InvalidCanvasGeometry {
                width: canvas_width,
                height: canvas_height,
                row_height,
            });
        }
        Ok(Self {
            x: 0,
            y: 0,
            row_height,
            canvas_width,
            canvas_height,
        })
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Reserve a slot `width` pixels wide in the current row, wrapping to
    /// the next row if it does not fit.
    ///
    /// The wrap happens even at `x == 0`, so an image wider than the canvas
    /// leaves its row empty and is drawn clipped on the next one. Returns
    /// `None` once the cursor has moved past the bottom edge; the cursor
    /// stays there and every further call returns `None`.
    pub fn place(&mut self, width: u32) -> Option<Slot> {
        if self.x.saturating_add(width) > self.canvas_width {
            self.x = 0;
            self.y = self.y.saturating_add(self.row_height);
        }
        if self.y >= self.canvas_height {
            return None;
        }
        let slot = Slot {
            x: self.x,
            y: self.y,
        };
        self.x = self.x.saturating_add(width);
        Some(slot)
    }
}

/// Compose `items` onto a fresh canvas, in order.
///
/// Progress is reported before each image is decoded, so it counts images
/// *started*: a run of four images reports 0, 25, 50 and 75. Reaching 100 is
/// left to the caller once the result is written.
///
/// Returns the canvas and one [`ProcessingRecord`] per placed image. Images
/// left over when the canvas fills up are dropped without a record.
pub fn compose(
    backend: &impl MosaicBackend,
    items: &[ImageSource],
    canvas_width: u32,
    canvas_height: u32,
    options: &ComposeOptions,
    sink: &(impl MosaicSink + ?Sized),
) -> Result<Composition, ComposeError> {
    let mut cursor = LayoutCursor::new(canvas_width, canvas_height)?;
    let row_height = cursor.row_height();
    if !canvas_within_limit(canvas_width, canvas_height) {
        return Err(ComposeError::CanvasTooLarge {
            width: canvas_width,
            height: canvas_height,
        });
    }
    let mut canvas = RgbImage::from_pixel(canvas_width, canvas_height, options.background);

    tracing::info!(
        width = canvas_width,
        height = canvas_height,
        row_height,
        items = items.len(),
        "composing mosaic"
    );

    let total = items.len();
    let mut records = Vec::with_capacity(total);
    let mut unreadable = Vec::new();

    for (index, item) in items.iter().enumerate() {
        sink.on_progress(progress_percent(index, total));
        let started = Instant::now();

        let decoded = match item.decode(backend) {
            Ok(img) => img,
            Err(source) if options.skip_unreadable => {
                tracing::warn!(file = item.name(), error = %source, "skipping unreadable image");
                sink.on_status(&format!("Skipped unreadable image: {}", item.name()));
                unreadable.push(item.name().to_string());
                continue;
            }
            Err(source) => {
                return Err(ComposeError::Decode {
                    name: item.name().to_string(),
                    source,
                });
            }
        };

        let width = scaled_width((decoded.width(), decoded.height()), row_height);
        let Some(slot) = cursor.place(width) else {
            tracing::info!(
                placed = records.len(),
                dropped = total - index,
                "canvas full, stopping early"
            );
            break;
        };

        // Only the part left of the right edge is resampled
        let visible = width.min(canvas_width.saturating_sub(slot.x));
        let source = if visible < width {
            let cols = visible_source_width(decoded.width(), width, visible);
            decoded.crop_imm(0, 0, cols, decoded.height())
        } else {
            decoded
        };
        let scaled = imageops::resize(&source.to_rgb8(), visible, row_height, FilterType::Lanczos3);
        imageops::replace(&mut canvas, &scaled, i64::from(slot.x), i64::from(slot.y));

        let elapsed = started.elapsed();
        tracing::debug!(file = item.name(), x = slot.x, y = slot.y, width, ?elapsed, "placed");
        sink.on_item_processed(item.name(), elapsed);
        records.push(ProcessingRecord::new(item.name(), elapsed));
    }

    Ok(Composition {
        canvas,
        records,
        unreadable,
    })
}
