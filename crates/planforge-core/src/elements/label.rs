//! Free-standing text annotations.

use super::ElementId;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default label font size in world units.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// A text annotation anchored at a world-space point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub id: ElementId,
    pub position: Point,
    pub content: String,
    pub font_size: f64,
    #[serde(default)]
    pub locked: bool,
}

impl TextLabel {
    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
            locked: false,
        }
    }

    /// Nominal bounds around the anchor; the host measures real text.
    pub fn bounds(&self) -> Rect {
        let half = self.font_size / 2.0;
        Rect::new(
            self.position.x - half,
            self.position.y - half,
            self.position.x + half,
            self.position.y + half,
        )
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
