use serde::{Deserialize, Serialize};

/// An opaque-by-default RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GREEN: Color = Color::rgb(0, 0xff, 0);
    /// Fill used for background rectangles.
    pub const OVERLAY: Color = Color::BLACK;
    /// Fill used for figure glyphs.
    pub const FIGURE: Color = Color::rgb(255, 200, 100);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette() {
        assert_eq!(Color::default(), Color::BLACK);
        assert_eq!(Color::GREEN.to_array(), [0, 255, 0, 255]);
        assert_eq!(Color::FIGURE, Color::rgba(255, 200, 100, 255));
    }
}
