//! # Painter Core
//!
//! Scene accumulation and frame scheduling for Painter.
//!
//! Producers build [`Operation`]s and post them to a [`CommandLoop`]. A single
//! worker thread applies them to a [`SceneState`] in submission order and, on
//! every `update`, renders the scene onto a fresh [`Surface`] and hands it to a
//! [`FrameSink`]. Pixel work is delegated to whatever surface the caller's
//! [`SurfaceFactory`] produces.

pub mod color;
pub mod command_loop;
pub mod geometry;
pub mod operation;
pub mod queue;
pub mod render;
pub mod scene;
pub mod surface;

pub use color::Color;
pub use command_loop::{CommandLoop, Frame, FrameSink, LoopConfig, LoopError, LoopState, LoopStats};
pub use geometry::{PixelPoint, PixelRect, Point, Rect, Size};
pub use operation::Operation;
pub use queue::{CommandSender, QueueError};
pub use scene::SceneState;
pub use surface::{Surface, SurfaceError, SurfaceFactory};
