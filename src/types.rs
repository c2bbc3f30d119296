//! Result types shared by the composer, the runner and the CLI report.
//!
//! Both types serialize to JSON for `compose --report`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing for one image that was placed on the canvas.
///
/// Records are append-only and ordered by placement. Images dropped by an
/// early stop (canvas full) have no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRecord {
    /// Display name of the source image (its file name)
    pub name: String,
    /// Wall time from decode start to finished draw
    pub elapsed_nanos: u64,
}

impl ProcessingRecord {
    pub fn new(name: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            elapsed_nanos: duration_nanos(elapsed),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Validation through encode, in nanoseconds
    pub total_elapsed_nanos: u64,
    pub records: Vec<ProcessingRecord>,
    /// Directory entries the collector rejected, by file name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_files: Vec<String>,
    /// Images skipped because they could not be decoded
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreadable_files: Vec<String>,
}

impl RunSummary {
    pub fn total_elapsed(&self) -> Duration {
        Duration::from_nanos(self.total_elapsed_nanos)
    }
}

/// Nanoseconds in `d`, saturating at `u64::MAX` (about 584 years).
pub(crate) fn duration_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
