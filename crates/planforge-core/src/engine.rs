//! The blueprint engine façade.
//!
//! An `Engine` instance owns every piece of editor state: the element
//! store, selection, groups, history, viewport, active tool, and the
//! in-flight gesture. The host event dispatcher is the only caller of the
//! mutating operations; the render collaborator reads state through the
//! accessors once per animation tick. All positions passed in are world
//! coordinates (the host converts pointer input through the viewport).
//!
//! Every committed mutation follows the same ordering: mutate the store,
//! commit a history snapshot, raise the redraw flag. Cancelling a gesture
//! discards transient state without a commit.

use crate::document::PlanDocument;
use crate::elements::{ElementFamily, ElementId, LinearElement, TextLabel};
use crate::error::EngineError;
use crate::history::History;
use crate::rooms;
use crate::selection::{align_elements, Alignment, ElementGroup, Selection};
use crate::snap::{self, AlignmentGuide, SnapPoint};
use crate::store::ElementStore;
use crate::tools::{Gesture, Tool};
use crate::viewport::{Viewport, FIT_ALL_MAX_ZOOM, MAX_ZOOM};
use kurbo::{Point, Size, Vec2};
use uuid::Uuid;

/// Default pixels-per-foot scale.
pub const DEFAULT_SCALE: f64 = 20.0;
/// Default grid spacing in world units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;
/// Screen-space hit-test tolerance; divided by zoom for world units.
pub const HIT_TOLERANCE: f64 = 10.0;
/// Padding around fitted bounds in screen units.
pub const FIT_PADDING: f64 = 50.0;

/// A self-contained, instantiable blueprint drawing engine.
#[derive(Debug, Clone)]
pub struct Engine {
    store: ElementStore,
    selection: Selection,
    groups: Vec<ElementGroup>,
    history: History,
    viewport: Viewport,
    tool: Tool,
    gesture: Gesture,
    scale: f64,
    grid_size: f64,
    grid_snap: bool,
    canvas_size: Size,
    needs_redraw: bool,
    active_snap: Option<SnapPoint>,
    guides: Vec<AlignmentGuide>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        let store = ElementStore::new();
        let history = History::new(&store);
        Self {
            store,
            selection: Selection::new(),
            groups: Vec::new(),
            history,
            viewport: Viewport::new(),
            tool: Tool::default(),
            gesture: Gesture::Idle,
            scale: DEFAULT_SCALE,
            grid_size: DEFAULT_GRID_SIZE,
            grid_snap: true,
            canvas_size: Size::new(800.0, 600.0),
            needs_redraw: false,
            active_snap: None,
            guides: Vec::new(),
        }
    }

    // ---- read surface for the render collaborator ----

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn groups(&self) -> &[ElementGroup] {
        &self.groups
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn grid_snap(&self) -> bool {
        self.grid_snap
    }

    /// The snap anchor currently indicated to the user, if any.
    pub fn snap_indicator(&self) -> Option<SnapPoint> {
        self.active_snap
    }

    /// Advisory alignment guides for the in-flight gesture.
    pub fn alignment_guides(&self) -> &[AlignmentGuide] {
        &self.guides
    }

    /// The preview segment of an in-flight drawing gesture.
    pub fn drawing_preview(&self) -> Option<(Point, Point)> {
        match &self.gesture {
            Gesture::Drawing { start, current, .. } => Some((*start, *current)),
            _ => None,
        }
    }

    /// Visual-only offset of an in-flight drag.
    pub fn drag_offset(&self) -> Vec2 {
        match &self.gesture {
            Gesture::Dragging { offset, .. } => *offset,
            _ => Vec2::ZERO,
        }
    }

    /// Report and clear the needs-redraw signal.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    // ---- configuration ----

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_size = Size::new(width, height);
    }

    pub fn set_grid_snap(&mut self, enabled: bool) {
        self.grid_snap = enabled;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        // Switching tools aborts whatever gesture was in flight.
        self.gesture = Gesture::Idle;
        self.active_snap = None;
        self.guides.clear();
        self.tool = tool;
        self.mark_dirty();
    }

    // ---- drawing ----

    /// Start drawing at a world position; no-op unless a drawing tool is
    /// active.
    pub fn begin_draw(&mut self, pos: Point) {
        let Some(kind) = self.tool.draw_kind() else {
            return;
        };
        let snapped = self.resolve_snap(pos);
        self.gesture = Gesture::Drawing {
            kind,
            start: snapped.point,
            current: snapped.point,
        };
        self.mark_dirty();
    }

    /// Move the in-flight drawing endpoint; no-op (and no snap feedback)
    /// unless a draw is in flight.
    pub fn update_drawing(&mut self, pos: Point) {
        if !matches!(self.gesture, Gesture::Drawing { .. }) {
            return;
        }
        let snapped = self.resolve_snap(pos);
        if let Gesture::Drawing { current, .. } = &mut self.gesture {
            *current = snapped.point;
        }
        self.mark_dirty();
    }

    /// Finish the drawing gesture, materializing the element.
    ///
    /// Returns `None` (and commits nothing) when no draw is in flight or
    /// when the segment is degenerate.
    pub fn commit_drawing(&mut self) -> Option<ElementId> {
        let (kind, start, current) = match &self.gesture {
            Gesture::Drawing {
                kind,
                start,
                current,
            } => (kind.clone(), *start, *current),
            _ => return None,
        };
        self.gesture = Gesture::Idle;
        self.active_snap = None;
        self.guides.clear();

        let Some(element) = LinearElement::new(kind, start, current) else {
            log::debug!("draw rejected: segment below minimum length");
            self.mark_dirty();
            return None;
        };
        let action = draw_action(element.kind.family());
        let id = self.store.insert_linear(element);
        self.history.commit(action, &self.store);
        self.mark_dirty();
        Some(id)
    }

    /// Abort the drawing gesture; the store is left untouched.
    pub fn cancel_drawing(&mut self) {
        if matches!(self.gesture, Gesture::Drawing { .. }) {
            self.gesture = Gesture::Idle;
            self.active_snap = None;
            self.guides.clear();
            self.mark_dirty();
        }
    }

    /// Place a text label at a world position.
    pub fn add_text_label(&mut self, pos: Point, content: impl Into<String>) -> ElementId {
        let id = self.store.insert_label(TextLabel::new(pos, content));
        self.history.commit("add label", &self.store);
        self.mark_dirty();
        id
    }

    fn resolve_snap(&mut self, pos: Point) -> SnapPoint {
        let snapped = snap::resolve(
            pos,
            &self.store,
            self.viewport.zoom,
            self.grid_snap,
            self.grid_size,
        );
        self.guides = snap::find_alignment_guides(pos, &self.store, self.viewport.zoom);
        self.active_snap = snapped.is_snapped().then_some(snapped);
        snapped
    }

    // ---- selection ----

    /// Select the topmost element at a world position.
    ///
    /// With `additive` the element toggles in and out of the selection;
    /// otherwise it replaces it. A miss clears a non-additive selection.
    pub fn select_at(&mut self, pos: Point, additive: bool) -> Option<ElementId> {
        let tolerance = HIT_TOLERANCE / self.viewport.zoom;
        let hit = self.store.hit_test(pos, tolerance);
        match hit {
            Some(id) if additive => self.selection.toggle(id),
            Some(id) => self.selection.select_only(id),
            None if !additive => self.selection.clear(),
            None => {}
        }
        self.mark_dirty();
        hit
    }

    /// Replace the selection with everything inside the box spanned by
    /// two world-space corners.
    pub fn select_in_rect(&mut self, a: Point, b: Point) -> usize {
        self.selection.clear();
        for id in self.store.ids_in_rect(a, b) {
            self.selection.insert(id);
        }
        self.mark_dirty();
        self.selection.len()
    }

    pub fn select_all(&mut self) {
        self.selection.clear();
        for id in self.store.all_ids() {
            self.selection.insert(id);
        }
        self.mark_dirty();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.mark_dirty();
    }

    // ---- dragging ----

    /// Start dragging from a world position.
    ///
    /// A hit outside the current selection re-selects that element first.
    /// Returns false (and starts nothing) on a miss.
    pub fn begin_drag(&mut self, pos: Point) -> bool {
        let tolerance = HIT_TOLERANCE / self.viewport.zoom;
        let Some(hit) = self.store.hit_test(pos, tolerance) else {
            return false;
        };
        if !self.selection.contains(hit) {
            self.selection.select_only(hit);
        }
        self.gesture = Gesture::Dragging {
            origin: pos,
            offset: Vec2::ZERO,
        };
        self.mark_dirty();
        true
    }

    /// Update the drag's visual offset; element coordinates stay put
    /// until commit.
    pub fn update_drag(&mut self, pos: Point) {
        if let Gesture::Dragging { origin, offset } = &mut self.gesture {
            *offset = pos - *origin;
            self.mark_dirty();
        }
    }

    /// Apply the drag offset to every selected non-locked element.
    ///
    /// A zero offset commits nothing, so an aborted click never pollutes
    /// the history.
    pub fn commit_drag(&mut self) {
        let offset = match &self.gesture {
            Gesture::Dragging { offset, .. } => *offset,
            _ => return,
        };
        self.gesture = Gesture::Idle;
        if offset.hypot2() == 0.0 {
            self.mark_dirty();
            return;
        }
        self.translate_selection(offset, "move elements");
    }

    /// Abort the drag; the store is left exactly as before the gesture.
    pub fn cancel_drag(&mut self) {
        if matches!(self.gesture, Gesture::Dragging { .. }) {
            self.gesture = Gesture::Idle;
            self.mark_dirty();
        }
    }

    /// Translate the selection by a fixed delta (arrow-key nudging).
    pub fn nudge(&mut self, delta: Vec2) {
        if self.selection.is_empty() || delta.hypot2() == 0.0 {
            return;
        }
        self.translate_selection(delta, "nudge elements");
    }

    fn translate_selection(&mut self, delta: Vec2, action: &str) {
        let mut moved = false;
        for id in self.selection.ids() {
            if self.store.is_locked(id) {
                continue;
            }
            moved |= self.store.translate(id, delta);
        }
        if moved {
            self.history.commit(action, &self.store);
        }
        self.mark_dirty();
    }

    // ---- editing ----

    /// Delete every selected element; returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids();
        let mut removed = 0;
        for id in &ids {
            if self.store.remove(*id) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.selection.retain_existing(&self.store);
            for group in &mut self.groups {
                group.members.retain(|id| !ids.contains(id));
            }
            self.groups.retain(|g| g.members.len() >= 2);
            self.history.commit("delete elements", &self.store);
        }
        self.mark_dirty();
        removed
    }

    /// Align the selection; requires at least two selected elements.
    /// An already-aligned selection commits nothing.
    pub fn align(&mut self, alignment: Alignment) -> Result<(), EngineError> {
        let ids = self.selection.ids();
        if align_elements(&mut self.store, &ids, alignment)? {
            self.history.commit("align elements", &self.store);
        }
        self.mark_dirty();
        Ok(())
    }

    /// Lock or unlock an element; locked elements stay selectable but are
    /// excluded from moves.
    pub fn set_locked(&mut self, id: ElementId, locked: bool) -> bool {
        if !self.store.set_locked(id, locked) {
            return false;
        }
        self.history
            .commit(if locked { "lock element" } else { "unlock element" }, &self.store);
        self.mark_dirty();
        true
    }

    // ---- grouping ----

    /// Capture the current selection as a named group for re-selection.
    pub fn group_selected(&mut self, name: impl Into<String>) -> Result<Uuid, EngineError> {
        if self.selection.len() < 2 {
            return Err(EngineError::InsufficientSelection);
        }
        let group = ElementGroup::new(name, self.selection.ids().into_iter().collect());
        let id = group.id;
        self.groups.push(group);
        self.mark_dirty();
        Ok(id)
    }

    /// Dissolve every group containing a currently selected element.
    pub fn ungroup_selected(&mut self) -> usize {
        let ids = self.selection.ids();
        let before = self.groups.len();
        self.groups.retain(|g| !g.contains_any(&ids));
        let removed = before - self.groups.len();
        if removed > 0 {
            self.mark_dirty();
        }
        removed
    }

    /// Re-select the members of a group.
    pub fn select_group(&mut self, group_id: Uuid) -> bool {
        let Some(group) = self.groups.iter().find(|g| g.id == group_id) else {
            return false;
        };
        self.selection.clear();
        for &id in &group.members {
            if self.store.contains(id) {
                self.selection.insert(id);
            }
        }
        self.mark_dirty();
        true
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.store);
        if applied {
            self.selection.retain_existing(&self.store);
            self.mark_dirty();
        }
        applied
    }

    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo(&mut self.store);
        if applied {
            self.selection.retain_existing(&self.store);
            self.mark_dirty();
        }
        applied
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- viewport ----

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
        self.mark_dirty();
    }

    /// Zoom by a factor around a screen-space anchor.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.viewport.zoom_at(anchor, factor);
        self.mark_dirty();
    }

    /// Pan by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
        self.mark_dirty();
    }

    /// Fit the whole plan in view (zoom capped at 2×).
    pub fn zoom_fit(&mut self) {
        if let Some(bounds) = self.store.bounds() {
            self.viewport
                .fit_to_bounds(bounds, self.canvas_size, FIT_PADDING, FIT_ALL_MAX_ZOOM);
            self.mark_dirty();
        }
    }

    /// Fit the selection in view (zoom capped at 5×).
    pub fn zoom_to_selection(&mut self) {
        let ids = self.selection.ids();
        if let Some(bounds) = self.store.bounds_of_ids(&ids) {
            self.viewport
                .fit_to_bounds(bounds, self.canvas_size, FIT_PADDING, MAX_ZOOM);
            self.mark_dirty();
        }
    }

    // ---- rooms ----

    /// Re-detect rooms from the wall set, replacing the Room collection
    /// wholesale. Returns the number of rooms found; zero is
    /// informational, not an error.
    pub fn detect_rooms(&mut self) -> usize {
        let rooms = rooms::detect_rooms(&self.store.walls, self.scale);
        let count = rooms.len();
        self.store.replace_rooms(rooms);
        // Previous Room ids are all stale after the replace.
        self.selection.retain_existing(&self.store);
        self.history.commit("detect rooms", &self.store);
        self.mark_dirty();
        count
    }

    // ---- persistence contract ----

    /// Produce the persistence record for the project-file collaborator.
    pub fn export_data(&self) -> PlanDocument {
        PlanDocument::capture(&self.store, &self.viewport, self.scale, self.grid_size)
    }

    /// Replace all collections and viewport state from a document, then
    /// commit one snapshot tagged "import data".
    pub fn import_data(&mut self, document: PlanDocument) {
        self.scale = document.scale;
        self.grid_size = document.grid_size;
        self.viewport.set_zoom(document.zoom);
        self.viewport.pan_offset = document.pan_offset;
        self.store = document.into_store();
        self.selection.clear();
        self.groups.clear();
        self.gesture = Gesture::Idle;
        self.history.commit("import data", &self.store);
        log::debug!("imported document with {} walls", self.store.walls.len());
        self.mark_dirty();
    }

    /// Serialize the current state to a JSON document.
    pub fn export_json(&self) -> Result<String, EngineError> {
        Ok(self.export_data().to_json()?)
    }

    /// Import from a JSON document; malformed payloads are the one hard
    /// error the engine raises.
    pub fn import_json(&mut self, json: &str) -> Result<(), EngineError> {
        let document = PlanDocument::from_json(json)?;
        self.import_data(document);
        Ok(())
    }
}

fn draw_action(family: ElementFamily) -> &'static str {
    match family {
        ElementFamily::Wall => "draw wall",
        ElementFamily::Door => "draw door",
        ElementFamily::Window => "draw window",
        ElementFamily::Stairs => "draw stairs",
        ElementFamily::Measurement => "draw measurement",
        ElementFamily::Room | ElementFamily::TextLabel => "draw element",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_wall(engine: &mut Engine, start: Point, end: Point) -> Option<ElementId> {
        engine.set_tool(Tool::Wall);
        engine.begin_draw(start);
        engine.update_drawing(end);
        engine.commit_drawing()
    }

    #[test]
    fn test_draw_commit_creates_wall_and_history() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        let id = draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        assert!(id.is_some());
        assert_eq!(engine.store().walls.len(), 1);
        assert!(engine.can_undo());
    }

    #[test]
    fn test_degenerate_draw_is_silent() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        let id = draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!(id.is_none());
        assert!(engine.store().walls.is_empty());
        // No history commit for a rejected draw.
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_cancel_drawing_leaves_store_untouched() {
        let mut engine = Engine::new();
        engine.set_tool(Tool::Wall);
        engine.begin_draw(Point::new(0.0, 0.0));
        engine.update_drawing(Point::new(300.0, 0.0));
        engine.cancel_drawing();
        assert!(engine.store().walls.is_empty());
        assert!(!engine.can_undo());
        assert!(engine.drawing_preview().is_none());
    }

    #[test]
    fn test_draw_snaps_to_existing_endpoint() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0));

        engine.set_tool(Tool::Wall);
        // Begin near the first wall's end; the start should snap onto it.
        engine.begin_draw(Point::new(205.0, 3.0));
        let (start, _) = engine.drawing_preview().unwrap();
        assert_eq!(start, Point::new(200.0, 0.0));
        assert!(engine.snap_indicator().is_some());
    }

    #[test]
    fn test_no_snap_feedback_without_gesture() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0));

        engine.set_tool(Tool::Wall);
        // Hovering near an endpoint with no draw in flight must not
        // light up the snap indicator or guides.
        engine.update_drawing(Point::new(200.0, 3.0));
        assert!(engine.snap_indicator().is_none());
        assert!(engine.alignment_guides().is_empty());
    }

    #[test]
    fn test_aligned_selection_commits_no_history() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        draw_wall(&mut engine, Point::new(0.0, 100.0), Point::new(100.0, 100.0));

        engine.set_tool(Tool::Select);
        engine.select_all();
        engine.align(Alignment::Left).unwrap();
        // Both walls already share the left edge; one undo must step
        // past the second draw, not a no-change alignment snapshot.
        assert!(engine.undo());
        assert_eq!(engine.store().walls.len(), 1);
    }

    #[test]
    fn test_select_and_drag_commits_offset() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        let id = draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0)).unwrap();

        engine.set_tool(Tool::Select);
        assert!(engine.begin_drag(Point::new(100.0, 0.0)));
        engine.update_drag(Point::new(100.0, 50.0));
        assert_eq!(engine.drag_offset(), Vec2::new(0.0, 50.0));
        // Visual only so far.
        assert_eq!(engine.store().find_linear(id).unwrap().start, Point::new(0.0, 0.0));

        engine.commit_drag();
        assert_eq!(engine.store().find_linear(id).unwrap().start, Point::new(0.0, 50.0));
    }

    #[test]
    fn test_zero_offset_drag_commits_nothing() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        let history_was_undoable = engine.can_undo();

        engine.set_tool(Tool::Select);
        engine.begin_drag(Point::new(100.0, 0.0));
        engine.commit_drag();

        // One draw commit only; the no-move drag added nothing.
        assert_eq!(engine.can_undo(), history_was_undoable);
        assert!(engine.undo());
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_locked_element_survives_drag_commit() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        let id = draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0)).unwrap();
        engine.set_locked(id, true);

        engine.set_tool(Tool::Select);
        assert!(engine.begin_drag(Point::new(100.0, 0.0)));
        engine.update_drag(Point::new(100.0, 80.0));
        engine.commit_drag();
        assert_eq!(engine.store().find_linear(id).unwrap().start, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_delete_prunes_selection_and_groups() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        let a = draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0)).unwrap();
        let b = draw_wall(&mut engine, Point::new(0.0, 100.0), Point::new(200.0, 100.0)).unwrap();

        engine.set_tool(Tool::Select);
        engine.select_in_rect(Point::new(-10.0, -10.0), Point::new(300.0, 150.0));
        engine.group_selected("walls").unwrap();
        assert_eq!(engine.delete_selected(), 2);
        assert!(engine.selection().is_empty());
        assert!(engine.groups().is_empty());
        assert!(!engine.store().contains(a));
        assert!(!engine.store().contains(b));
    }

    #[test]
    fn test_group_requires_two_elements() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        let id = draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0)).unwrap();
        engine.set_tool(Tool::Select);
        engine.select_at(Point::new(100.0, 0.0), false);
        assert!(engine.store().contains(id));
        assert!(matches!(
            engine.group_selected("solo"),
            Err(EngineError::InsufficientSelection)
        ));
    }

    #[test]
    fn test_select_group_reselects_members() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        draw_wall(&mut engine, Point::new(0.0, 100.0), Point::new(200.0, 100.0));
        engine.select_in_rect(Point::new(-10.0, -10.0), Point::new(300.0, 150.0));
        let group_id = engine.group_selected("pair").unwrap();

        engine.clear_selection();
        assert!(engine.select_group(group_id));
        assert_eq!(engine.selection().len(), 2);

        // Ungrouping removes any group containing a selected element.
        assert_eq!(engine.ungroup_selected(), 1);
        assert!(engine.groups().is_empty());
    }

    #[test]
    fn test_detect_rooms_invalidates_room_selection() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        draw_wall(&mut engine, Point::new(200.0, 0.0), Point::new(200.0, 200.0));
        draw_wall(&mut engine, Point::new(200.0, 200.0), Point::new(0.0, 200.0));
        draw_wall(&mut engine, Point::new(0.0, 200.0), Point::new(0.0, 0.0));
        assert_eq!(engine.detect_rooms(), 1);

        // Select the room, then re-detect: the id goes stale and must be
        // pruned from the selection.
        let room_id = engine.store().rooms[0].id;
        engine.set_tool(Tool::Select);
        engine.select_at(Point::new(100.0, 100.0), false);
        assert!(engine.selection().contains(room_id));
        engine.detect_rooms();
        assert!(!engine.selection().contains(room_id));
    }

    #[test]
    fn test_import_export_roundtrip() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        engine.add_text_label(Point::new(50.0, 50.0), "Hall");
        engine.set_zoom(1.5);

        let document = engine.export_data();
        let mut other = Engine::new();
        other.import_data(document.clone());
        assert_eq!(other.store(), engine.store());
        assert_eq!(other.export_data(), document);
    }

    #[test]
    fn test_import_json_error_is_hard() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.import_json("not json"),
            Err(EngineError::Document(_))
        ));
    }

    #[test]
    fn test_redraw_signal() {
        let mut engine = Engine::new();
        assert!(!engine.take_redraw());
        engine.pan(Vec2::new(10.0, 0.0));
        assert!(engine.take_redraw());
        assert!(!engine.take_redraw());
    }

    #[test]
    fn test_zoom_to_selection() {
        let mut engine = Engine::new();
        engine.set_grid_snap(false);
        engine.set_canvas_size(800.0, 600.0);
        draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        engine.select_all();
        engine.zoom_to_selection();
        // Selection center lands at canvas center.
        let screen = engine.viewport().world_to_screen(Point::new(50.0, 50.0));
        assert!((screen.x - 400.0).abs() < 1e-9);
        assert!((screen.y - 300.0).abs() < 1e-9);
    }
}
