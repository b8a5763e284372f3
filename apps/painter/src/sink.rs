//! Frame sinks that persist delivered frames to disk.
//!
//! Both run on the command loop thread. Write failures are logged and the
//! frame is dropped; the loop keeps going.

use std::path::{Path, PathBuf};

use painter_core::{Frame, FrameSink};
use painter_render::{Canvas, Recording};

/// `dir/frame-0001.ext`
pub fn frame_path(dir: &Path, sequence: u64, ext: &str) -> PathBuf {
    dir.join(format!("frame-{sequence:04}.{ext}"))
}

/// Writes each canvas as a PNG file.
#[derive(Debug)]
pub struct PngSink {
    dir: PathBuf,
}

impl PngSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl FrameSink<Canvas> for PngSink {
    fn on_frame(&mut self, frame: Frame<Canvas>) {
        let path = frame_path(&self.dir, frame.sequence(), "png");
        match frame.surface().save_png(&path) {
            Ok(()) => log::info!("wrote {}", path.display()),
            Err(e) => log::error!("failed to write {}: {}", path.display(), e),
        }
    }
}

/// Writes each recording as a pretty-printed JSON file.
#[derive(Debug)]
pub struct JsonSink {
    dir: PathBuf,
}

impl JsonSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl FrameSink<Recording> for JsonSink {
    fn on_frame(&mut self, frame: Frame<Recording>) {
        let path = frame_path(&self.dir, frame.sequence(), "json");
        let written = frame
            .surface()
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => log::info!("wrote {}", path.display()),
            Err(e) => log::error!("failed to write {}: {}", path.display(), e),
        }
    }
}
