//! Selection state, alignment operators, and element groups.

use crate::elements::ElementId;
use crate::error::EngineError;
use crate::store::ElementStore;
use kurbo::Vec2;
use std::collections::HashSet;
use uuid::Uuid;

/// The current selection, held as stable ids resolved against the store
/// on demand. Ids of deleted or wholesale-replaced elements are pruned
/// with [`Selection::retain_existing`].
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single element.
    pub fn select_only(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    pub fn insert(&mut self, id: ElementId) {
        self.ids.insert(id);
    }

    /// Add or remove an element (shift-click semantics).
    pub fn toggle(&mut self, id: ElementId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.ids.iter().copied().collect()
    }

    /// Drop ids that no longer resolve against the store.
    ///
    /// Called after deletion, import, history restore, and room
    /// re-detection, where previous Room ids all become stale.
    pub fn retain_existing(&mut self, store: &ElementStore) {
        self.ids.retain(|&id| store.contains(id));
    }
}

/// Alignment operators over the selection's combined bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    /// Match horizontal centers (equal center x).
    CenterHorizontal,
    /// Match vertical centers (equal center y).
    CenterVertical,
}

/// Translate every non-locked element so its bounding edge/center matches
/// the combined box of the whole set.
///
/// Returns whether any element actually moved, so callers can skip a
/// history commit for an already-aligned set. Fails soft with
/// [`EngineError::InsufficientSelection`] for fewer than two elements;
/// the store is untouched in that case.
pub fn align_elements(
    store: &mut ElementStore,
    ids: &[ElementId],
    alignment: Alignment,
) -> Result<bool, EngineError> {
    if ids.len() < 2 {
        return Err(EngineError::InsufficientSelection);
    }
    let Some(target) = store.bounds_of_ids(ids) else {
        return Err(EngineError::InsufficientSelection);
    };

    let mut moved = false;
    for &id in ids {
        if store.is_locked(id) {
            continue;
        }
        let Some(bounds) = store.bounds_of(id) else {
            continue;
        };
        let delta = match alignment {
            Alignment::Left => Vec2::new(target.x0 - bounds.x0, 0.0),
            Alignment::Right => Vec2::new(target.x1 - bounds.x1, 0.0),
            Alignment::Top => Vec2::new(0.0, target.y0 - bounds.y0),
            Alignment::Bottom => Vec2::new(0.0, target.y1 - bounds.y1),
            Alignment::CenterHorizontal => {
                Vec2::new(target.center().x - bounds.center().x, 0.0)
            }
            Alignment::CenterVertical => Vec2::new(0.0, target.center().y - bounds.center().y),
        };
        if delta.hypot2() > 0.0 {
            moved |= store.translate(id, delta);
        }
    }
    Ok(moved)
}

/// A named set of co-selected elements kept for later re-selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementGroup {
    pub id: Uuid,
    pub name: String,
    pub members: HashSet<ElementId>,
}

impl ElementGroup {
    pub fn new(name: impl Into<String>, members: HashSet<ElementId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
        }
    }

    pub fn contains_any(&self, ids: &[ElementId]) -> bool {
        ids.iter().any(|id| self.members.contains(id))
    }
}
