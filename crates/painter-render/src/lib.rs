//! # Painter Render
//!
//! Concrete render targets for the command loop.
//!
//! [`Canvas`] rasterizes fills into a `tiny-skia` pixmap that can be encoded
//! as PNG. [`Recording`] keeps the fill calls themselves and serializes them
//! as JSON for out-of-process presenters.

pub mod canvas;
pub mod recording;

pub use canvas::{Canvas, CanvasError, CanvasFactory};
pub use recording::{FillCall, Recording, RecordingFactory};
