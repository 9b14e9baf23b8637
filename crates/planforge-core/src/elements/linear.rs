//! Linear elements: walls, doors, windows, stairs, and measurements.

use super::{ElementFamily, ElementId};
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum world-space length of a linear element.
///
/// Segments shorter than this are degenerate and are never materialized.
pub const MIN_ELEMENT_LENGTH: f64 = 5.0;

/// Hinge side of a door, viewed from outside the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DoorSwing {
    #[default]
    Left,
    Right,
}

/// Per-variant data for the linear element families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LinearKind {
    /// Load-bearing or partition wall; thickness in world units, height in feet.
    Wall { thickness: f64, height: f64 },
    /// Door opening placed along a wall run.
    Door { swing: DoorSwing },
    /// Window opening; sill height in feet.
    Window { sill_height: f64 },
    /// Straight stair run.
    Stairs { step_count: u32 },
    /// Dimension annotation between two points.
    Measurement,
}

impl LinearKind {
    /// Default wall: 10 world units thick (6" at 20 px/ft), 8 ft tall.
    pub fn wall() -> Self {
        LinearKind::Wall {
            thickness: 10.0,
            height: 8.0,
        }
    }

    pub fn door() -> Self {
        LinearKind::Door {
            swing: DoorSwing::default(),
        }
    }

    /// Default window with a 3 ft sill.
    pub fn window() -> Self {
        LinearKind::Window { sill_height: 3.0 }
    }

    pub fn stairs() -> Self {
        LinearKind::Stairs { step_count: 12 }
    }

    /// The store collection this kind belongs to.
    pub fn family(&self) -> ElementFamily {
        match self {
            LinearKind::Wall { .. } => ElementFamily::Wall,
            LinearKind::Door { .. } => ElementFamily::Door,
            LinearKind::Window { .. } => ElementFamily::Window,
            LinearKind::Stairs { .. } => ElementFamily::Stairs,
            LinearKind::Measurement => ElementFamily::Measurement,
        }
    }
}

/// A straight element defined by two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearElement {
    pub id: ElementId,
    /// Start point in world coordinates.
    pub start: Point,
    /// End point in world coordinates.
    pub end: Point,
    /// Variant data.
    pub kind: LinearKind,
    /// Locked elements stay selectable but are never moved by edits.
    #[serde(default)]
    pub locked: bool,
}

impl LinearElement {
    /// Create a new element, rejecting degenerate segments.
    ///
    /// Returns `None` when the endpoints are closer than
    /// [`MIN_ELEMENT_LENGTH`]; callers treat that as a silent no-op.
    pub fn new(kind: LinearKind, start: Point, end: Point) -> Option<Self> {
        if geometry::distance(start, end) < MIN_ELEMENT_LENGTH {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            start,
            end,
            kind,
            locked: false,
        })
    }

    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    pub fn midpoint(&self) -> Point {
        geometry::midpoint(self.start, self.end)
    }

    /// Both endpoints, used by rectangle selection and the wall graph.
    pub fn endpoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Check if a point (in world coordinates) hits this element.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::distance_to_segment(point, self.start, self.end) <= tolerance
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
