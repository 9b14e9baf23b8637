//! The element store: typed collections owned by the engine.

use crate::elements::{ElementFamily, ElementId, LinearElement, Room, TextLabel};
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// All element collections of a blueprint.
///
/// The store is exclusively owned and mutated by the engine; history
/// snapshots deep-copy it via `Clone`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStore {
    pub walls: Vec<LinearElement>,
    pub doors: Vec<LinearElement>,
    pub windows: Vec<LinearElement>,
    pub stairs: Vec<LinearElement>,
    pub measurements: Vec<LinearElement>,
    pub rooms: Vec<Room>,
    pub text_labels: Vec<TextLabel>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a linear element into the collection its kind belongs to.
    pub fn insert_linear(&mut self, element: LinearElement) -> ElementId {
        let id = element.id;
        match element.kind.family() {
            ElementFamily::Wall => self.walls.push(element),
            ElementFamily::Door => self.doors.push(element),
            ElementFamily::Window => self.windows.push(element),
            ElementFamily::Stairs => self.stairs.push(element),
            ElementFamily::Measurement => self.measurements.push(element),
            // Tagged LinearKind cannot name these families.
            ElementFamily::Room | ElementFamily::TextLabel => unreachable!(),
        }
        id
    }

    pub fn insert_label(&mut self, label: TextLabel) -> ElementId {
        let id = label.id;
        self.text_labels.push(label);
        id
    }

    /// Replace the whole Room collection (boundary detector contract).
    pub fn replace_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    fn linear_collections_mut(&mut self) -> [&mut Vec<LinearElement>; 5] {
        [
            &mut self.walls,
            &mut self.doors,
            &mut self.windows,
            &mut self.stairs,
            &mut self.measurements,
        ]
    }

    /// Iterate every linear element across all five collections.
    pub fn iter_linear(&self) -> impl Iterator<Item = &LinearElement> {
        self.walls
            .iter()
            .chain(self.doors.iter())
            .chain(self.windows.iter())
            .chain(self.stairs.iter())
            .chain(self.measurements.iter())
    }

    pub fn find_linear(&self, id: ElementId) -> Option<&LinearElement> {
        self.iter_linear().find(|e| e.id == id)
    }

    pub fn find_linear_mut(&mut self, id: ElementId) -> Option<&mut LinearElement> {
        self.linear_collections_mut()
            .into_iter()
            .flat_map(|c| c.iter_mut())
            .find(|e| e.id == id)
    }

    pub fn room(&self, id: ElementId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn label(&self, id: ElementId) -> Option<&TextLabel> {
        self.text_labels.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.find_linear(id).is_some()
            || self.room(id).is_some()
            || self.label(id).is_some()
    }

    /// Bounding box of an element, if it exists.
    pub fn bounds_of(&self, id: ElementId) -> Option<Rect> {
        if let Some(e) = self.find_linear(id) {
            return Some(e.bounds());
        }
        if let Some(r) = self.room(id) {
            return Some(r.bounds());
        }
        self.label(id).map(|l| l.bounds())
    }

    /// Endpoints/vertices of an element, used by rectangle selection.
    pub fn vertices_of(&self, id: ElementId) -> Vec<Point> {
        if let Some(e) = self.find_linear(id) {
            return e.endpoints().to_vec();
        }
        if let Some(r) = self.room(id) {
            return r.points.clone();
        }
        self.label(id).map(|l| vec![l.position]).unwrap_or_default()
    }

    pub fn is_locked(&self, id: ElementId) -> bool {
        if let Some(e) = self.find_linear(id) {
            return e.locked;
        }
        if let Some(r) = self.room(id) {
            return r.locked;
        }
        self.label(id).map(|l| l.locked).unwrap_or(false)
    }

    pub fn set_locked(&mut self, id: ElementId, locked: bool) -> bool {
        if let Some(e) = self.find_linear_mut(id) {
            e.locked = locked;
            return true;
        }
        if let Some(r) = self.rooms.iter_mut().find(|r| r.id == id) {
            r.locked = locked;
            return true;
        }
        if let Some(l) = self.text_labels.iter_mut().find(|l| l.id == id) {
            l.locked = locked;
            return true;
        }
        false
    }

    /// Translate an element by a world-space delta.
    ///
    /// Returns false when the id is unknown; locked filtering is the
    /// caller's job so that explicit unlock-then-move stays possible.
    pub fn translate(&mut self, id: ElementId, delta: Vec2) -> bool {
        if let Some(e) = self.find_linear_mut(id) {
            e.translate(delta);
            return true;
        }
        if let Some(r) = self.rooms.iter_mut().find(|r| r.id == id) {
            r.translate(delta);
            return true;
        }
        if let Some(l) = self.text_labels.iter_mut().find(|l| l.id == id) {
            l.translate(delta);
            return true;
        }
        false
    }

    /// Remove an element from whichever collection holds it.
    pub fn remove(&mut self, id: ElementId) -> bool {
        for collection in self.linear_collections_mut() {
            if let Some(pos) = collection.iter().position(|e| e.id == id) {
                collection.remove(pos);
                return true;
            }
        }
        if let Some(pos) = self.rooms.iter().position(|r| r.id == id) {
            self.rooms.remove(pos);
            return true;
        }
        if let Some(pos) = self.text_labels.iter().position(|l| l.id == id) {
            self.text_labels.remove(pos);
            return true;
        }
        false
    }

    /// Find the topmost element at a point.
    ///
    /// Priority order: stairs, doors, windows, walls, rooms; the first
    /// match wins. `tolerance` is zoom-adjusted by the caller.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        for collection in [&self.stairs, &self.doors, &self.windows, &self.walls] {
            if let Some(e) = collection.iter().find(|e| e.hit_test(point, tolerance)) {
                return Some(e.id);
            }
        }
        self.rooms.iter().find(|r| r.hit_test(point)).map(|r| r.id)
    }

    /// All elements with at least one endpoint/vertex inside the box
    /// spanned by two corner points.
    pub fn ids_in_rect(&self, a: Point, b: Point) -> Vec<ElementId> {
        let rect = Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
        let mut hits = Vec::new();
        for e in self.iter_linear() {
            if e.endpoints().iter().any(|p| rect.contains(*p)) {
                hits.push(e.id);
            }
        }
        for r in &self.rooms {
            if r.points.iter().any(|p| rect.contains(*p)) {
                hits.push(r.id);
            }
        }
        for l in &self.text_labels {
            if rect.contains(l.position) {
                hits.push(l.id);
            }
        }
        hits
    }

    pub fn all_ids(&self) -> Vec<ElementId> {
        self.iter_linear()
            .map(|e| e.id)
            .chain(self.rooms.iter().map(|r| r.id))
            .chain(self.text_labels.iter().map(|l| l.id))
            .collect()
    }

    /// Bounding box of every element, for zoom-to-fit.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        let mut extend = |r: Rect| {
            result = Some(match result {
                Some(acc) => acc.union(r),
                None => r,
            });
        };
        for e in self.iter_linear() {
            extend(e.bounds());
        }
        for r in &self.rooms {
            extend(r.bounds());
        }
        for l in &self.text_labels {
            extend(l.bounds());
        }
        result
    }

    /// Bounding box of a set of elements, for alignment and zoom-to-selection.
    pub fn bounds_of_ids(&self, ids: &[ElementId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|&id| self.bounds_of(id))
            .reduce(|a, b| a.union(b))
    }

    /// Endpoints of walls, doors, and windows — the snap anchors.
    pub fn snap_endpoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.walls
            .iter()
            .chain(self.doors.iter())
            .chain(self.windows.iter())
            .flat_map(|e| e.endpoints())
    }

    /// Wall midpoints, the second snap priority.
    pub fn wall_midpoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.walls.iter().map(|w| w.midpoint())
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
            && self.doors.is_empty()
            && self.windows.is_empty()
            && self.stairs.is_empty()
            && self.measurements.is_empty()
            && self.rooms.is_empty()
            && self.text_labels.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Nearest snap endpoint within `radius` of a point.
    pub fn nearest_snap_endpoint(&self, point: Point, radius: f64) -> Option<Point> {
        nearest_within(self.snap_endpoints(), point, radius)
    }

    /// Nearest wall midpoint within `radius` of a point.
    pub fn nearest_wall_midpoint(&self, point: Point, radius: f64) -> Option<Point> {
        nearest_within(self.wall_midpoints(), point, radius)
    }
}

fn nearest_within(
    candidates: impl Iterator<Item = Point>,
    point: Point,
    radius: f64,
) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for candidate in candidates {
        let dist = geometry::distance(point, candidate);
        if dist <= radius && best.map(|(d, _)| dist < d).unwrap_or(true) {
            best = Some((dist, candidate));
        }
    }
    best.map(|(_, p)| p)
}
