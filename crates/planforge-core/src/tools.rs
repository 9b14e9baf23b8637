//! Active tool and in-flight gesture state.

use crate::elements::LinearKind;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Select,
    Pan,
    Wall,
    Door,
    Window,
    Stairs,
    Measure,
    Text,
}

impl Tool {
    /// The linear element kind this tool draws, if it is a drawing tool.
    pub fn draw_kind(&self) -> Option<LinearKind> {
        match self {
            Tool::Wall => Some(LinearKind::wall()),
            Tool::Door => Some(LinearKind::door()),
            Tool::Window => Some(LinearKind::window()),
            Tool::Stairs => Some(LinearKind::stairs()),
            Tool::Measure => Some(LinearKind::Measurement),
            Tool::Select | Tool::Pan | Tool::Text => None,
        }
    }
}

/// Transient interaction state between pointer-down and pointer-up.
///
/// Gestures never touch the store until they commit; cancelling one leaves
/// the store exactly as it was.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No interaction in flight.
    #[default]
    Idle,
    /// Drawing a new linear element.
    Drawing {
        kind: LinearKind,
        start: Point,
        current: Point,
    },
    /// Moving the selection; `offset` is visual-only until commit.
    Dragging { origin: Point, offset: Vec2 },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}
