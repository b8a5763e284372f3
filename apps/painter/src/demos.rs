//! Built-in producer scripts.

use painter_lang::Script;

pub const DEMO_NAMES: &[&str] = &["green-border", "diagonal-figure"];

pub fn by_name(name: &str) -> Option<Vec<Script>> {
    match name {
        "green-border" => Some(green_border()),
        "diagonal-figure" => Some(DiagonalFigure::default().scripts()),
        _ => None,
    }
}

/// Green background framed by one dark inset rectangle.
pub fn green_border() -> Vec<Script> {
    vec![Script::new(
        "green-border",
        "green\nbgrect 0.05 0.05 0.95 0.95\nupdate",
    )]
}

/// A figure walking down the diagonal, one payload per step.
///
/// The first payload places the figure; every later one moves it and
/// requests a frame.
#[derive(Debug, Clone, Copy)]
pub struct DiagonalFigure {
    pub start: f64,
    pub step: f64,
    pub limit: f64,
}

impl Default for DiagonalFigure {
    fn default() -> Self {
        Self {
            start: 0.5,
            step: 0.05,
            limit: 0.9,
        }
    }
}

impl DiagonalFigure {
    pub fn scripts(&self) -> Vec<Script> {
        let (mut x, mut y) = (self.start, self.start);
        let mut scripts = vec![Script::new(
            "diagonal-figure/0",
            &format!("white\nfigure {x:.2} {y:.2}\nupdate\n"),
        )];

        loop {
            x += self.step;
            y += self.step;
            if x > self.limit || y > self.limit {
                break;
            }
            let name = format!("diagonal-figure/{}", scripts.len());
            scripts.push(Script::new(&name, &format!("move {x:.2} {y:.2}\nupdate\n")));
        }
        scripts
    }
}
