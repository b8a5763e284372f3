use serde::{Deserialize, Serialize};

/// Default canvas side length in pixels.
pub const CANVAS_SIDE: u32 = 800;

/// A 2D point in normalized scene coordinates (`[0, 1]` covers the canvas).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale normalized coordinates by the canvas dimensions.
    pub fn scale(&self, size: Size) -> Self {
        Self {
            x: self.x * f64::from(size.width),
            y: self.y * f64::from(size.height),
        }
    }

    /// Convert to integer pixel coordinates, truncating toward zero.
    pub fn to_pixel(&self) -> PixelPoint {
        PixelPoint::new(self.x as i32, self.y as i32)
    }

    /// Clamp pixel-space coordinates to at most one canvas length past
    /// either edge. NaN maps to zero.
    pub fn clamp_to(&self, size: Size) -> Self {
        Self {
            x: clamp_axis(self.x, f64::from(size.width)),
            y: clamp_axis(self.y, f64::from(size.height)),
        }
    }

    /// Scale, clamp and truncate: the pixel a normalized point lands on.
    pub fn to_canvas(&self, size: Size) -> PixelPoint {
        self.scale(size).clamp_to(size).to_pixel()
    }
}

fn clamp_axis(v: f64, extent: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-extent, 2.0 * extent)
    }
}

/// An axis-aligned rectangle in normalized scene coordinates.
///
/// Corners are stored as given; [`Rect::to_pixels`] canonicalizes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    pub fn scale(&self, size: Size) -> Self {
        Self {
            min: self.min.scale(size),
            max: self.max.scale(size),
        }
    }

    pub fn to_pixels(&self) -> PixelRect {
        PixelRect::from_corners(self.min.to_pixel(), self.max.to_pixel())
    }

    /// Pixel rectangle for a normalized rect, with both corners clamped
    /// like [`Point::to_canvas`].
    pub fn to_canvas(&self, size: Size) -> PixelRect {
        PixelRect::from_corners(self.min.to_canvas(size), self.max.to_canvas(size))
    }
}

/// Pixel dimensions of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The full-surface rectangle anchored at the origin.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, clamp_dim(self.width), clamp_dim(self.height))
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(CANVAS_SIDE, CANVAS_SIDE)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn clamp_dim(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// An integer pixel position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A half-open integer rectangle: `min` is inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub min: PixelPoint,
    pub max: PixelPoint,
}

impl PixelRect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::from_corners(PixelPoint::new(x0, y0), PixelPoint::new(x1, y1))
    }

    /// Build a canonical rectangle from two arbitrary corners.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            min: PixelPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: PixelPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn height(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// The overlapping region, or `None` when the rectangles are disjoint.
    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let clipped = PixelRect {
            min: PixelPoint::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: PixelPoint::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }
}
