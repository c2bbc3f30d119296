//! Progress and log reporting for a mosaic run.
//!
//! The composer and runner never print. They call a [`MosaicSink`]
//! synchronously from the worker that executes the run, in placement order.
//! Front ends decide what to do with the calls: the CLI hands a
//! [`Sender<MosaicEvent>`](std::sync::mpsc::Sender) to the worker and prints
//! on the main thread, a GUI would marshal onto its own event loop.

use std::sync::mpsc::Sender;
use std::time::Duration;

/// Receiver of progress, per-image timing and status messages.
pub trait MosaicSink {
    /// Percentage of items started, 0–100. Never decreases within a run.
    fn on_progress(&self, percent: u8);

    /// One image was placed on the canvas.
    fn on_item_processed(&self, name: &str, elapsed: Duration);

    /// The output file was written; `total` covers the whole run.
    fn on_finished(&self, total: Duration);

    /// Free-form status line (skipped entries, completion).
    fn on_status(&self, message: &str);
}

/// A sink call captured as a value, for transport across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MosaicEvent {
    Progress(u8),
    ItemProcessed { name: String, elapsed: Duration },
    Finished(Duration),
    Status(String),
}

/// Forward every call into a channel. A disconnected receiver is ignored:
/// the run carries on and the caller still gets its result.
impl MosaicSink for Sender<MosaicEvent> {
    fn on_progress(&self, percent: u8) {
        self.send(MosaicEvent::Progress(percent)).ok();
    }

    fn on_item_processed(&self, name: &str, elapsed: Duration) {
        self.send(MosaicEvent::ItemProcessed {
            name: name.to_string(),
            elapsed,
        })
        .ok();
    }

    fn on_finished(&self, total: Duration) {
        self.send(MosaicEvent::Finished(total)).ok();
    }

    fn on_status(&self, message: &str) {
        self.send(MosaicEvent::Status(message.to_string())).ok();
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MosaicSink for NullSink {
    fn on_progress(&self, _percent: u8) {}
    fn on_item_processed(&self, _name: &str, _elapsed: Duration) {}
    fn on_finished(&self, _total: Duration) {}
    fn on_status(&self, _message: &str) {}
}
