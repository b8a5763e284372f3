use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Accumulated drawing intent for the frame currently being built.
///
/// Owned by the command loop worker and mutated only through
/// [`Operation::apply`](crate::Operation::apply). A fresh instance replaces it
/// after every completed frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    background_color: Color,
    /// Drawn in insertion order; later rectangles paint over earlier ones.
    background_rects: Vec<Rect>,
    figures: Vec<Point>,
}

impl SceneState {
    /// An empty scene: black background, no rectangles, no figures.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn background_rects(&self) -> &[Rect] {
        &self.background_rects
    }

    pub fn figures(&self) -> &[Point] {
        &self.figures
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    // ── Mutation ─────────────────────────────────────────────────────

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn add_background_rect(&mut self, rect: Rect) {
        self.background_rects.push(rect);
    }

    pub fn add_figure(&mut self, at: Point) {
        self.figures.push(at);
    }

    /// Place every existing figure at `to`. This is absolute positioning, not
    /// a translation; with no figures it does nothing.
    pub fn move_figures(&mut self, to: Point) {
        for figure in &mut self.figures {
            *figure = to;
        }
    }

    /// Drop rectangles and figures and return the background to black.
    /// Allocated capacity is kept.
    pub fn reset(&mut self) {
        self.background_color = Color::BLACK;
        self.background_rects.clear();
        self.figures.clear();
    }
}
