//! Room entities materialized by the boundary detector.

use super::ElementId;
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default ceiling height in feet.
pub const DEFAULT_CEILING_HEIGHT: f64 = 8.0;

/// Room usage category; feeds the external calculation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoomKind {
    #[default]
    Unassigned,
    Living,
    Bedroom,
    Kitchen,
    Bathroom,
    Hallway,
}

/// An enclosed region bounded by walls.
///
/// Rooms are never created or removed individually; the boundary detector
/// replaces the whole collection on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: ElementId,
    pub name: String,
    /// Simple closed polygon derived from the wall set, at least 3 points.
    pub points: Vec<Point>,
    /// Label anchor: arithmetic mean of the vertices.
    pub center: Point,
    /// Floor area in square feet.
    pub area: f64,
    pub kind: RoomKind,
    /// Ceiling height in feet.
    pub height: f64,
    #[serde(default)]
    pub locked: bool,
}

impl Room {
    /// Build a room from a detected boundary polygon.
    ///
    /// `area` is in square feet, already divided by `scale²` by the caller.
    pub fn from_boundary(name: String, points: Vec<Point>, area: f64) -> Self {
        let center = geometry::polygon_center(&points);
        Self {
            id: Uuid::new_v4(),
            name,
            points,
            center,
            area,
            kind: RoomKind::default(),
            height: DEFAULT_CEILING_HEIGHT,
            locked: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        geometry::bounding_box(&self.points)
            .unwrap_or_else(|| Rect::new(self.center.x, self.center.y, self.center.x, self.center.y))
    }

    /// Check if a point (in world coordinates) falls inside the room polygon.
    pub fn hit_test(&self, point: Point) -> bool {
        geometry::point_in_polygon(point, &self.points)
    }

    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
        self.center += delta;
    }
}
