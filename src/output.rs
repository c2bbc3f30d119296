//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Images (3)
//!     IMG_0001.JPG
//!     beach.jpeg
//!     dunes.jpg
//! Skipped (1)
//!     notes.txt
//! ```
//!
//! ## Compose
//!
//! ```text
//! Skipped: notes.txt
//! [  0%] Processed: beach.jpeg in 41.208 ms
//! [ 33%] Processed: IMG_0001.JPG in 38.950 ms
//! [ 66%] Processed: dunes.jpg in 40.117 ms
//!
//! Whole processing took: 0.214 s
//! Conversion finished
//! Canvas: 7087 x 10630 px, 3 images placed
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` for testability; `print_*`
//! wrappers write to stdout. Formatting does no I/O.
//! Event formatting carries the last progress percentage, so it lives on
//! [`EventFormatter`] rather than a free function.

use crate::collect::DirectoryScan;
use crate::sink::MosaicEvent;
use crate::types::RunSummary;
use std::time::Duration;

fn format_millis(d: Duration) -> String {
    format!("{:.3} ms", d.as_secs_f64() * 1e3)
}

fn format_secs(d: Duration) -> String {
    format!("{:.3} s", d.as_secs_f64())
}

fn list_section(title: &str, names: &[String]) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", title, names.len())];
    lines.extend(names.iter().map(|n| format!("    {}", n)));
    lines
}

// ============================================================================
// Check
// ============================================================================

/// Format the accepted and skipped entries of a source directory.
pub fn format_check_output(scan: &DirectoryScan) -> Vec<String> {
    let images: Vec<String> = scan.images.iter().map(|i| i.name().to_string()).collect();
    let mut lines = list_section("Images", &images);
    if !scan.skipped.is_empty() {
        lines.extend(list_section("Skipped", &scan.skipped));
    }
    lines
}

pub fn print_check_output(scan: &DirectoryScan) {
    for line in format_check_output(scan) {
        println!("{}", line);
    }
}

// ============================================================================
// Compose
// ============================================================================

/// Turns sink events into display lines, prefixing each placed image with
/// the progress reported just before it started.
#[derive(Debug, Default)]
pub struct EventFormatter {
    percent: u8,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(&mut self, event: &MosaicEvent) -> Vec<String> {
        match event {
            MosaicEvent::Progress(percent) => {
                self.percent = *percent;
                Vec::new()
            }
            MosaicEvent::ItemProcessed { name, elapsed } => vec![format!(
                "[{:>3}%] Processed: {} in {}",
                self.percent,
                name,
                format_millis(*elapsed)
            )],
            MosaicEvent::Finished(total) => vec![
                String::new(),
                format!("Whole processing took: {}", format_secs(*total)),
            ],
            MosaicEvent::Status(message) => vec![message.clone()],
        }
    }
}

/// One-line result of a finished run, plus any unreadable images.
pub fn format_summary(summary: &RunSummary) -> Vec<String> {
    let available = summary.records.len() + summary.unreadable_files.len();
    let mut lines = vec![format!(
        "Canvas: {} x {} px, {} images placed",
        summary.canvas_width,
        summary.canvas_height,
        summary.records.len()
    )];
    if !summary.unreadable_files.is_empty() {
        lines.extend(list_section("Unreadable", &summary.unreadable_files));
    }
    if available == 0 {
        lines.push("No images found; the mosaic is blank".to_string());
    }
    lines
}

pub fn print_summary(summary: &RunSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
