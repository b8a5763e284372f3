use std::path::Path;

use thiserror::Error;
use tiny_skia::{BlendMode, Paint, Pixmap, Rect as SkiaRect, Transform};

use painter_core::{Color, PixelRect, Size, Surface, SurfaceError, SurfaceFactory};

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A CPU pixel buffer backed by a `tiny_skia::Pixmap`.
///
/// Fills overwrite pixels (source blend, no anti-aliasing), so repeated
/// renders of the same scene produce identical bytes.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(size: Size) -> Result<Self, SurfaceError> {
        let pixmap =
            Pixmap::new(size.width, size.height).ok_or(SurfaceError::Allocation(size))?;
        Ok(Self { pixmap })
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// The color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap
            .pixel(x, y)
            .map(|p| Color::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, CanvasError> {
        self.pixmap
            .encode_png()
            .map_err(|e| CanvasError::Encode(e.to_string()))
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Surface for Canvas {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    fn fill(&mut self, rect: PixelRect, color: Color) {
        let Some(clipped) = self.bounds().intersect(&rect) else {
            return;
        };

        if clipped == self.bounds() {
            self.pixmap
                .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
            return;
        }

        let Some(area) = SkiaRect::from_ltrb(
            clipped.min.x as f32,
            clipped.min.y as f32,
            clipped.max.x as f32,
            clipped.max.y as f32,
        ) else {
            log::warn!("skipping degenerate fill {:?}", clipped);
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.blend_mode = BlendMode::Source;
        paint.anti_alias = false;

        self.pixmap
            .fill_rect(area, &paint, Transform::identity(), None);
    }
}

/// Allocates a new [`Canvas`] per frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanvasFactory;

impl SurfaceFactory for CanvasFactory {
    type Surface = Canvas;

    fn create(&mut self, size: Size) -> Result<Canvas, SurfaceError> {
        Canvas::new(size)
    }
}
