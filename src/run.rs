//! End-to-end mosaic run.
//!
//! The runner is the seam front ends call. One run is:
//!
//! ```text
//! validate ─→ scan + shuffle ─→ compose ─→ encode JPEG
//! (no I/O)    source dir        canvas     output file
//! ```
//!
//! Every failure is fatal to the run and comes back as a [`RunError`];
//! nothing is retried. Progress, per-image timing and status lines go to a
//! [`MosaicSink`] as the run proceeds. [`spawn`] executes the same pipeline
//! on a dedicated worker thread so a caller's own loop stays responsive.

use crate::collect::{self, CollectError};
use crate::compose::{self, ComposeError, ComposeOptions};
use crate::config::MosaicConfig;
use crate::imaging::{
    BackendError, EncodeParams, MAX_CANVAS_PIXELS, MosaicBackend, Quality, RustBackend,
    cm_to_pixels, pixel_length,
};
use crate::sink::MosaicSink;
use crate::types::{RunSummary, duration_nanos};
use image::Rgb;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Invalid {field}: {value} (must be a positive number)")]
    InvalidParameter { field: &'static str, value: f64 },
    #[error("Canvas of {width}x{height} px exceeds the {max} pixel limit", max = MAX_CANVAS_PIXELS)]
    CanvasTooLarge { width: f64, height: f64 },
    #[error("Collecting images failed: {0}")]
    Collect(#[from] CollectError),
    #[error("Composing mosaic failed: {0}")]
    Compose(#[from] ComposeError),
    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// Everything one run needs. No global state is consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub width_cm: f64,
    pub height_cm: f64,
    pub dpi: f64,
    pub quality: Quality,
    pub background: Rgb<u8>,
    /// Fixed shuffle seed; `None` draws a fresh order from the thread RNG
    pub seed: Option<u64>,
    pub skip_unreadable: bool,
}

impl RunRequest {
    /// Request with the given geometry and default encoding/layout settings.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        width_cm: f64,
        height_cm: f64,
        dpi: f64,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: output.into(),
            width_cm,
            height_cm,
            dpi,
            quality: Quality::default(),
            background: Rgb([255, 255, 255]),
            seed: None,
            skip_unreadable: false,
        }
    }

    /// Request built from a loaded `mosaic.toml`.
    pub fn from_config(
        source_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        config: &MosaicConfig,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: output.into(),
            width_cm: config.canvas.width_cm,
            height_cm: config.canvas.height_cm,
            dpi: config.canvas.dpi,
            quality: Quality::new(config.output.quality),
            background: Rgb(config.canvas.background),
            seed: config.layout.seed,
            skip_unreadable: config.layout.skip_unreadable,
        }
    }

    /// Check the physical parameters and the resulting canvas size against
    /// [`MAX_CANVAS_PIXELS`]. Touches nothing on disk.
    pub fn validate(&self) -> Result<(), RunError> {
        for (field, value) in [
            ("width_cm", self.width_cm),
            ("height_cm", self.height_cm),
            ("dpi", self.dpi),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RunError::InvalidParameter { field, value });
            }
        }

        let width = pixel_length(self.width_cm, self.dpi);
        let height = pixel_length(self.height_cm, self.dpi);
        if width > f64::from(u32::MAX)
            || height > f64::from(u32::MAX)
            || width * height > MAX_CANVAS_PIXELS as f64
        {
            return Err(RunError::CanvasTooLarge { width, height });
        }
        Ok(())
    }

    /// Canvas size in pixels, `round(cm / 2.54 × dpi)` per axis.
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        (
            cm_to_pixels(self.width_cm, self.dpi),
            cm_to_pixels(self.height_cm, self.dpi),
        )
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Run the full pipeline with the pure Rust backend.
pub fn run(request: &RunRequest, sink: &(impl MosaicSink + ?Sized)) -> Result<RunSummary, RunError> {
    run_with_backend(&RustBackend::new(), request, sink)
}

/// Run the full pipeline using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl MosaicBackend,
    request: &RunRequest,
    sink: &(impl MosaicSink + ?Sized),
) -> Result<RunSummary, RunError> {
    let started = Instant::now();
    request.validate()?;

    let (canvas_width, canvas_height) = request.pixel_dimensions();
    tracing::info!(
        source = %request.source_dir.display(),
        output = %request.output.display(),
        canvas_width,
        canvas_height,
        "starting mosaic run"
    );

    let mut scan = collect::scan_directory(&request.source_dir)?;
    for name in &scan.skipped {
        sink.on_status(&format!("Skipped: {name}"));
    }
    scan.shuffle(&mut request.rng());

    let options = ComposeOptions {
        background: request.background,
        skip_unreadable: request.skip_unreadable,
    };
    let composition = compose::compose(
        backend,
        &scan.images,
        canvas_width,
        canvas_height,
        &options,
        sink,
    )?;

    let params = EncodeParams {
        output: request.output.clone(),
        quality: request.quality,
    };
    backend
        .encode(&composition.canvas, &params)
        .map_err(|source| RunError::Encode {
            path: request.output.clone(),
            source,
        })?;

    sink.on_progress(100);
    let total = started.elapsed();
    sink.on_finished(total);
    sink.on_status("Conversion finished");
    tracing::info!(
        placed = composition.records.len(),
        available = scan.images.len(),
        ?total,
        "mosaic written"
    );

    Ok(RunSummary {
        canvas_width,
        canvas_height,
        total_elapsed_nanos: duration_nanos(total),
        records: composition.records,
        skipped_files: scan.skipped,
        unreadable_files: composition.unreadable,
    })
}

/// Run on a new background worker thread.
///
/// The sink is called from that thread. Join the handle for the result.
pub fn spawn<S>(
    request: RunRequest,
    sink: S,
) -> std::io::Result<JoinHandle<Result<RunSummary, RunError>>>
where
    S: MosaicSink + Send + 'static,
{
    std::thread::Builder::new()
        .name("mosaic-worker".into())
        .spawn(move || run(&request, &sink))
}
