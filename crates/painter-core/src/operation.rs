use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::scene::SceneState;

/// A unit of work for the command loop.
///
/// Applying an operation mutates the scene and reports whether the frame is
/// complete. Only [`Operation::Update`], alone or nested in a list, completes
/// a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    WhiteFill,
    GreenFill,
    BackgroundRect(Rect),
    Figure(Point),
    Move(Point),
    Reset,
    Update,
    /// Applied member by member, in order.
    List(Vec<Operation>),
}

impl Operation {
    /// Apply to `scene`; returns `true` when this completes the frame.
    pub fn apply(&self, scene: &mut SceneState) -> bool {
        match self {
            Operation::WhiteFill => scene.set_background_color(Color::WHITE),
            Operation::GreenFill => scene.set_background_color(Color::GREEN),
            Operation::BackgroundRect(rect) => scene.add_background_rect(*rect),
            Operation::Figure(at) => scene.add_figure(*at),
            Operation::Move(to) => scene.move_figures(*to),
            Operation::Reset => scene.reset(),
            Operation::Update => return true,
            Operation::List(ops) => {
                // Every member runs even after an update has been seen.
                return ops.iter().fold(false, |ready, op| op.apply(scene) || ready);
            }
        }
        false
    }

    /// Whether applying this operation would complete a frame.
    pub fn completes_frame(&self) -> bool {
        match self {
            Operation::Update => true,
            Operation::List(ops) => ops.iter().any(Operation::completes_frame),
            _ => false,
        }
    }

    /// Short human-readable name, used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::WhiteFill => "white",
            Operation::GreenFill => "green",
            Operation::BackgroundRect(_) => "bgrect",
            Operation::Figure(_) => "figure",
            Operation::Move(_) => "move",
            Operation::Reset => "reset",
            Operation::Update => "update",
            Operation::List(_) => "list",
        }
    }
}

impl From<Vec<Operation>> for Operation {
    fn from(ops: Vec<Operation>) -> Self {
        Operation::List(ops)
    }
}
