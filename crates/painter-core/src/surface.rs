//! Render target abstraction.
//!
//! The command loop never draws pixels itself. It replays a scene onto a
//! [`Surface`] obtained from a [`SurfaceFactory`], then hands the finished
//! surface to the frame sink.

use thiserror::Error;

use crate::color::Color;
use crate::geometry::{PixelRect, Size};

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("cannot allocate a {0} surface")]
    Allocation(Size),
}

/// A writable render target of fixed pixel dimensions.
pub trait Surface: Send + 'static {
    fn size(&self) -> Size;

    fn bounds(&self) -> PixelRect {
        self.size().bounds()
    }

    /// Overwrite `rect` with `color` (source compositing, no blending).
    /// Pixels outside the surface bounds are ignored.
    fn fill(&mut self, rect: PixelRect, color: Color);
}

/// Allocates fresh render targets for the command loop.
pub trait SurfaceFactory: Send + 'static {
    type Surface: Surface;

    fn create(&mut self, size: Size) -> Result<Self::Surface, SurfaceError>;
}
