//! Replays a [`SceneState`] onto a [`Surface`].
//!
//! Paint order is fixed: background fill over the full bounds, then each
//! background rectangle in insertion order, then each figure glyph. Output
//! depends only on the scene and the surface size.

use crate::color::Color;
use crate::geometry::{PixelPoint, PixelRect};
use crate::scene::SceneState;
use crate::surface::Surface;

/// Render `scene` onto `surface`.
pub fn render_scene<S: Surface + ?Sized>(scene: &SceneState, surface: &mut S) {
    let bounds = surface.bounds();
    let size = surface.size();

    surface.fill(bounds, scene.background_color());

    for rect in scene.background_rects() {
        let px = rect.to_canvas(size);
        surface.fill(offset(px, bounds.min), Color::OVERLAY);
    }

    for figure in scene.figures() {
        let p = figure.to_canvas(size);
        let center = PixelPoint::new(
            p.x.saturating_add(bounds.min.x),
            p.y.saturating_add(bounds.min.y),
        );
        draw_figure(surface, center, bounds);
    }
}

/// Draw the "T" figure glyph centred on `center`.
pub fn draw_figure<S: Surface + ?Sized>(surface: &mut S, center: PixelPoint, bounds: PixelRect) {
    for part in figure_parts(center, bounds) {
        surface.fill(part, Color::FIGURE);
    }
}

/// The two bars of the figure glyph: horizontal bar hanging below `center`,
/// vertical stem rising above it. Both scale with the surface bounds.
pub fn figure_parts(center: PixelPoint, bounds: PixelRect) -> [PixelRect; 2] {
    let (x, y) = (center.x, center.y);
    let (w, h) = (bounds.width(), bounds.height());

    let bar_w = w / 2;
    let bar_h = h / 6;
    let stem_w = w / 6;
    let stem_h = h / 4;

    [
        PixelRect::new(
            x.saturating_sub(bar_w / 2),
            y,
            x.saturating_add(bar_w / 2),
            y.saturating_add(bar_h),
        ),
        PixelRect::new(
            x.saturating_sub(stem_w / 2),
            y.saturating_sub(stem_h),
            x.saturating_add(stem_w / 2),
            y,
        ),
    ]
}

fn offset(rect: PixelRect, by: PixelPoint) -> PixelRect {
    PixelRect::new(
        rect.min.x.saturating_add(by.x),
        rect.min.y.saturating_add(by.y),
        rect.max.x.saturating_add(by.x),
        rect.max.y.saturating_add(by.y),
    )
}
