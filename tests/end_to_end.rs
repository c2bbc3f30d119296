//! End-to-end tests against the public API with real JPEG files on disk.
//!
//! Canvases are specified at 254 dpi so that `n / 100` cm is exactly `n`
//! pixels, which keeps the expected geometry readable.

use image::{Rgb, RgbImage};
use photo_mosaic::collect::{self, CollectError};
use photo_mosaic::compose::{self, ComposeOptions};
use photo_mosaic::imaging::RustBackend;
use photo_mosaic::run::{self, RunError, RunRequest};
use photo_mosaic::sink::{MosaicEvent, MosaicSink};
use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::TempDir;

const DPI: f64 = 254.0;
const RED: Rgb<u8> = Rgb([220, 30, 30]);

fn write_jpeg(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, RED).save(path).unwrap();
}

fn photo_dir(photos: &[(&str, u32, u32)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, w, h) in photos {
        write_jpeg(&tmp.path().join(name), *w, *h);
    }
    tmp
}

fn request(source: &Path, output: &Path, width_px: u32, height_px: u32) -> RunRequest {
    RunRequest::new(
        source,
        output,
        f64::from(width_px) / 100.0,
        f64::from(height_px) / 100.0,
        DPI,
    )
}

fn near(a: Rgb<u8>, b: Rgb<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 24)
}

#[derive(Default)]
struct Progress(Mutex<Vec<u8>>);

impl MosaicSink for Progress {
    fn on_progress(&self, percent: u8) {
        self.0.lock().unwrap().push(percent);
    }
    fn on_item_processed(&self, _name: &str, _elapsed: Duration) {}
    fn on_finished(&self, _total: Duration) {}
    fn on_status(&self, _message: &str) {}
}

#[test]
fn three_photos_fill_first_row() {
    let src = photo_dir(&[("a.jpg", 100, 50), ("b.jpg", 100, 50), ("c.jpg", 100, 50)]);
    let items = collect::collect(src.path()).unwrap();
    let sink = Progress::default();

    let composition = compose::compose(
        &RustBackend::new(),
        &items,
        300,
        200,
        &ComposeOptions::default(),
        &sink,
    )
    .unwrap();

    // Row height 18, each photo 36 px wide at x = 0, 36, 72
    let canvas = &composition.canvas;
    assert_eq!(canvas.dimensions(), (300, 200));
    assert_eq!(composition.records.len(), 3);
    for x in [5, 40, 100] {
        assert!(near(*canvas.get_pixel(x, 9), RED), "x={x} should be covered");
    }
    assert_eq!(*canvas.get_pixel(120, 9), Rgb([255, 255, 255]));
    assert_eq!(*canvas.get_pixel(5, 30), Rgb([255, 255, 255]));
    assert_eq!(*sink.0.lock().unwrap(), vec![0, 33, 66]);
}

#[test]
fn run_writes_jpeg_of_canvas_size() {
    let src = photo_dir(&[("a.jpg", 120, 80), ("b.JPEG", 80, 120)]);
    std::fs::write(src.path().join("notes.txt"), "not a photo").unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("mosaic.jpg");

    let summary = run::run(&request(src.path(), &output, 300, 220), &Progress::default()).unwrap();

    assert_eq!(image::image_dimensions(&output).unwrap(), (300, 220));
    assert_eq!(summary.records.len(), 2);
    assert_eq!(summary.skipped_files, vec!["notes.txt"]);
}

#[test]
fn full_canvas_drops_remaining_photos() {
    // Row height 2 → each 400x50 photo is 16 px wide, two per 40 px row,
    // eleven rows: 22 of 30 fit
    let names: Vec<String> = (0..30).map(|i| format!("{i:02}.jpg")).collect();
    let photos: Vec<(&str, u32, u32)> = names.iter().map(|n| (n.as_str(), 400, 50)).collect();
    let src = photo_dir(&photos);
    let out = TempDir::new().unwrap();

    let summary = run::run(
        &request(src.path(), &out.path().join("m.jpg"), 40, 22),
        &Progress::default(),
    )
    .unwrap();

    assert_eq!(summary.records.len(), 22);
}

#[test]
fn empty_directory_produces_blank_canvas() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("blank.jpg");
    let sink = Progress::default();

    let summary = run::run(&request(src.path(), &output, 50, 110), &sink).unwrap();

    assert!(summary.records.is_empty());
    assert_eq!(*sink.0.lock().unwrap(), vec![100]);
    let written = image::open(&output).unwrap().to_rgb8();
    assert!(near(*written.get_pixel(25, 55), Rgb([255, 255, 255])));
}

#[test]
fn corrupt_photo_aborts_without_output() {
    let src = photo_dir(&[("good.jpg", 100, 50)]);
    std::fs::write(src.path().join("broken.jpg"), b"definitely not a jpeg").unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("m.jpg");

    let result = run::run(&request(src.path(), &output, 100, 110), &Progress::default());

    assert!(matches!(result, Err(RunError::Compose(_))));
    assert!(!output.exists());
}

#[test]
fn invalid_geometry_rejected_before_touching_disk() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("m.jpg");
    let bad = RunRequest::new("/does/not/exist", &output, 60.0, 90.0, -300.0);

    let result = run::run(&bad, &Progress::default());

    assert!(matches!(
        result,
        Err(RunError::InvalidParameter { field: "dpi", .. })
    ));
}

#[test]
fn missing_source_directory() {
    let out = TempDir::new().unwrap();
    let result = run::run(
        &RunRequest::new("/does/not/exist", out.path().join("m.jpg"), 60.0, 90.0, 300.0),
        &Progress::default(),
    );
    assert!(matches!(
        result,
        Err(RunError::Collect(CollectError::DirectoryNotFound(_)))
    ));
}

#[test]
fn check_scan_lists_accepted_and_skipped() {
    let src = photo_dir(&[("b.jpg", 10, 10), ("a.JPG", 10, 10)]);
    std::fs::write(src.path().join("c.png"), b"").unwrap();
    std::fs::create_dir(src.path().join("nested.jpg")).unwrap();

    let scan = collect::scan_directory(src.path()).unwrap();

    let names: Vec<&str> = scan.images.iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["a.JPG", "b.jpg"]);
    assert_eq!(scan.skipped, vec!["c.png", "nested.jpg"]);
}

#[test]
fn spawned_worker_streams_to_channel() {
    let src = photo_dir(&[("a.jpg", 60, 40)]);
    let out = TempDir::new().unwrap();
    let (tx, rx) = mpsc::channel();

    let handle = run::spawn(request(src.path(), &out.path().join("m.jpg"), 100, 110), tx).unwrap();
    let events: Vec<MosaicEvent> = rx.iter().collect();
    handle.join().unwrap().unwrap();

    assert_eq!(events.first(), Some(&MosaicEvent::Progress(0)));
    assert!(matches!(events[1], MosaicEvent::ItemProcessed { ref name, .. } if name == "a.jpg"));
    assert_eq!(
        events.last(),
        Some(&MosaicEvent::Status("Conversion finished".to_string()))
    );
}
