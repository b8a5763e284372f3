use serde::{Deserialize, Serialize};

use painter_core::{Color, PixelRect, Size, Surface, SurfaceError, SurfaceFactory};

/// A single fill as received by a [`Recording`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillCall {
    pub rect: PixelRect,
    pub color: Color,
}

/// A surface that keeps the fill calls made on it instead of pixels.
///
/// Useful for inspecting frames and for shipping them as JSON to a
/// presenter that rasterizes on its own side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub size: Size,
    pub calls: Vec<FillCall>,
}

impl Recording {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    /// Color of the first fill. A scene render always opens with the
    /// background.
    pub fn background(&self) -> Option<Color> {
        self.calls.first().map(|c| c.color)
    }

    /// Every fill after the background, in call order. A full-canvas
    /// rectangle still counts as a shape.
    pub fn shapes(&self) -> impl Iterator<Item = &FillCall> {
        self.calls.iter().skip(1)
    }

    /// Re-issue the recorded fills, in order, onto another surface.
    pub fn replay_onto<S: Surface + ?Sized>(&self, target: &mut S) {
        for call in &self.calls {
            target.fill(call.rect, call.color);
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Surface for Recording {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, rect: PixelRect, color: Color) {
        self.calls.push(FillCall { rect, color });
    }
}

/// Allocates an empty [`Recording`] per frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordingFactory;

impl SurfaceFactory for RecordingFactory {
    type Surface = Recording;

    fn create(&mut self, size: Size) -> Result<Recording, SurfaceError> {
        if size.is_empty() {
            return Err(SurfaceError::Allocation(size));
        }
        Ok(Recording::new(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use painter_core::render::render_scene;
    use painter_core::{Point, Rect, SceneState};

    fn sample_scene() -> SceneState {
        let mut scene = SceneState::new();
        scene.set_background_color(Color::GREEN);
        scene.add_background_rect(Rect::new(0.25, 0.25, 0.5, 0.5));
        scene.add_background_rect(Rect::new(0.375, 0.375, 0.75, 0.75));
        scene.add_figure(Point::new(0.5, 0.5));
        scene
    }

    #[test]
    fn test_background_and_shapes() {
        let mut rec = Recording::new(Size::default());
        render_scene(&sample_scene(), &mut rec);

        assert_eq!(rec.background(), Some(Color::GREEN));
        let shapes: Vec<_> = rec.shapes().collect();
        assert_eq!(shapes.len(), 4);
        assert_eq!(shapes[0].rect, PixelRect::new(200, 200, 400, 400));
        assert_eq!(shapes[1].rect, PixelRect::new(300, 300, 600, 600));
        assert_eq!(shapes[1].color, Color::OVERLAY);
    }

    #[test]
    fn test_full_canvas_rect_is_a_shape() {
        let mut scene = SceneState::new();
        scene.set_background_color(Color::WHITE);
        scene.add_background_rect(Rect::new(0.0, 0.0, 1.0, 1.0));

        let mut rec = Recording::new(Size::new(100, 100));
        render_scene(&scene, &mut rec);

        assert_eq!(rec.background(), Some(Color::WHITE));
        let shapes: Vec<_> = rec.shapes().collect();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].rect, Size::new(100, 100).bounds());
        assert_eq!(shapes[0].color, Color::OVERLAY);
        assert!(Recording::new(Size::new(1, 1)).background().is_none());
    }

    #[test]
    fn test_replay_matches_direct_render() {
        let scene = sample_scene();
        let mut rec = Recording::new(Size::new(64, 64));
        render_scene(&scene, &mut rec);

        let mut direct = Canvas::new(Size::new(64, 64)).unwrap();
        render_scene(&scene, &mut direct);
        let mut replayed = Canvas::new(Size::new(64, 64)).unwrap();
        rec.replay_onto(&mut replayed);

        assert_eq!(direct.data(), replayed.data());
    }

    #[test]
    fn test_json_survives_reload() {
        let mut rec = Recording::new(Size::new(100, 100));
        render_scene(&sample_scene(), &mut rec);
        let json = rec.to_json().unwrap();
        assert!(json.contains("\"calls\""));
        assert_eq!(Recording::from_json(&json).unwrap(), rec);
    }

    #[test]
    fn test_factory_rejects_empty() {
        assert!(RecordingFactory.create(Size::new(0, 0)).is_err());
        assert!(RecordingFactory.create(Size::new(1, 1)).unwrap().calls.is_empty());
    }
}
