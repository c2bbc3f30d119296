//! Pure calculation functions for mosaic geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Number of visual rows the canvas height is divided into.
///
/// Fixed regardless of how many images are available; the row height is
/// never re-derived from the item count.
pub const ROWS_PER_CANVAS: u32 = 11;

/// Centimetres per inch, for the physical size to pixel conversion.
pub const CM_PER_INCH: f64 = 2.54;

/// Largest canvas, in pixels, a run will allocate (about 3 GB as RGB8).
///
/// A 60 × 90 cm poster at 300 dpi is roughly 75 Mpx.
pub const MAX_CANVAS_PIXELS: u64 = 1_000_000_000;

/// Row height for a canvas: `floor(canvas_height / ROWS_PER_CANVAS)`.
///
/// # Examples
/// ```
/// # use photo_mosaic::imaging::calculations::row_height;
/// assert_eq!(row_height(900), 81);
/// assert_eq!(row_height(200), 18);
/// assert_eq!(row_height(10), 0);
/// ```
pub fn row_height(canvas_height: u32) -> u32 {
    canvas_height / ROWS_PER_CANVAS
}

/// Width of a source image scaled to `row_height`, preserving aspect ratio.
///
/// This is `round(src_w × row_height / src_h)` with one deviation: the
/// result is clamped to at least 1. The plain formula gives 0 once the
/// source's height-to-width ratio exceeds `2 × row_height`; such images
/// still occupy a one-pixel slot here.
///
/// # Examples
/// ```
/// # use photo_mosaic::imaging::calculations::scaled_width;
/// // 100x50 at row height 18 → 36px wide
/// assert_eq!(scaled_width((100, 50), 18), 36);
/// ```
pub fn scaled_width(source: (u32, u32), row_height: u32) -> u32 {
    let (src_w, src_h) = source;
    let w = (src_w as f64 * row_height as f64 / src_h.max(1) as f64).round() as u32;
    w.max(1)
}

/// Convert a physical length to pixels: `round(cm / 2.54 × dpi)`.
///
/// # Examples
/// ```
/// # use photo_mosaic::imaging::calculations::cm_to_pixels;
/// assert_eq!(cm_to_pixels(60.0, 300.0), 7087);
/// assert_eq!(cm_to_pixels(90.0, 300.0), 10630);
/// ```
///
/// Saturates at `u32::MAX`; check [`pixel_length`] first when the input
/// is not known to be in range.
pub fn cm_to_pixels(cm: f64, dpi: f64) -> u32 {
    pixel_length(cm, dpi) as u32
}

/// Unclamped `round(cm / 2.54 × dpi)`.
pub fn pixel_length(cm: f64, dpi: f64) -> f64 {
    (cm / CM_PER_INCH * dpi).round()
}

/// Whether a `width × height` canvas stays within [`MAX_CANVAS_PIXELS`].
///
/// # Examples
/// ```
/// # use photo_mosaic::imaging::calculations::canvas_within_limit;
/// assert!(canvas_within_limit(7087, 10630));
/// assert!(!canvas_within_limit(1_181_102_362, 10630));
/// ```
pub fn canvas_within_limit(width: u32, height: u32) -> bool {
    u64::from(width) * u64::from(height) <= MAX_CANVAS_PIXELS
}

/// Source columns needed to fill `visible_width` of an image scaled from
/// `source_width` to `scaled_width`.
///
/// Rounds up so the visible part is never starved, and never exceeds
/// `source_width`. Lets the composer crop before resampling when most of
/// a scaled image would be clipped.
pub fn visible_source_width(source_width: u32, scaled_width: u32, visible_width: u32) -> u32 {
    if visible_width >= scaled_width {
        return source_width;
    }
    let cols = (u64::from(source_width) * u64::from(visible_width))
        .div_ceil(u64::from(scaled_width.max(1)));
    cols.clamp(1, u64::from(source_width.max(1))) as u32
}

/// Percentage of items started: `floor(started × 100 / total)`.
///
/// Returns 0 for an empty run.
pub fn progress_percent(started: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (started.saturating_mul(100) / total).min(100) as u8
}
