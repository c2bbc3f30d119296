//! # Photo Mosaic
//!
//! Compose one large print-sized image from a folder of photos. Every photo
//! is scaled to a common row height and packed left to right, top to bottom,
//! in random order, until the photos run out or the canvas is full.
//!
//! # Architecture: Linear Pipeline
//!
//! ```text
//! 1. Collect   photos/   →  shuffled Vec<ImageSource>   (filter by suffix, shuffle)
//! 2. Compose   sources   →  RgbImage canvas              (decode one at a time, place)
//! 3. Encode    canvas    →  mosaic.jpg
//! ```
//!
//! The [`run`] module drives all three and is the only entry point a front
//! end needs. The pass is single and forward: no lookahead, no re-layout.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`collect`] | Directory scan, suffix filter, shuffle |
//! | [`compose`] | Row-packing layout cursor and canvas drawing |
//! | [`run`] | Validation, pipeline orchestration, background worker |
//! | [`sink`] | Progress/status reporting trait and channel-backed sink |
//! | [`config`] | `mosaic.toml` loading, validation, stock config |
//! | [`imaging`] | Decode/encode backend, pure geometry calculations |
//! | [`types`] | Per-image records and run summary |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Eleven Rows, Always
//!
//! Row height is `canvas_height / 11`, floored, no matter how many photos
//! there are. Few photos leave the bottom of the canvas empty; many photos
//! get cut off once the canvas is full. The constant is
//! [`imaging::ROWS_PER_CANVAS`].
//!
//! ## Sink, Not Callbacks Into a UI
//!
//! The core never prints and never touches a UI. It calls a
//! [`sink::MosaicSink`] synchronously from whichever thread runs the
//! pipeline. The CLI passes an `mpsc::Sender` and prints on the main thread;
//! tests pass a recording sink.
//!
//! ## Fail the Run, Not the Image
//!
//! A photo that cannot be decoded aborts the run by default, so a corrupt
//! file is noticed instead of silently leaving a gap. `skip_unreadable`
//! opts into skipping such photos.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, Lanczos3 scaling and JPEG encoding all come from the `image`
//! crate. No system libraries are needed.

pub mod collect;
pub mod compose;
pub mod config;
pub mod imaging;
pub mod output;
pub mod run;
pub mod sink;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
