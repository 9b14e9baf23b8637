//! Bounded snapshot history for undo/redo.

use crate::store::ElementStore;
use serde::{Deserialize, Serialize};

/// Maximum number of snapshots to keep.
pub const MAX_HISTORY: usize = 50;

/// A deep copy of the element store tagged with a human-readable action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// What produced this state, e.g. "draw wall" or "import data".
    pub action: String,
    /// Full element collections at that point.
    pub state: ElementStore,
}

/// Snapshot stack with an index pointing at the active state.
///
/// The index always refers to the snapshot that mirrors the live store;
/// entries beyond it are the redo branch and are discarded on the next
/// commit. The stack is seeded with a baseline snapshot so the very first
/// user action can be undone.
#[derive(Debug, Clone)]
pub struct History {
    states: Vec<Snapshot>,
    index: usize,
}

impl History {
    /// Create a history whose baseline is the given (normally empty) store.
    pub fn new(baseline: &ElementStore) -> Self {
        Self {
            states: vec![Snapshot {
                action: "initial".to_string(),
                state: baseline.clone(),
            }],
            index: 0,
        }
    }

    /// Record a committed mutation.
    ///
    /// Truncates the redo branch, pushes a deep clone of the store, and
    /// evicts the oldest entry once [`MAX_HISTORY`] is exceeded.
    pub fn commit(&mut self, action: impl Into<String>, store: &ElementStore) {
        let action = action.into();
        log::debug!("history commit: {action}");
        self.states.truncate(self.index + 1);
        self.states.push(Snapshot {
            action,
            state: store.clone(),
        });
        if self.states.len() > MAX_HISTORY {
            self.states.remove(0);
            self.index = self.states.len() - 1;
        } else {
            self.index += 1;
        }
    }

    /// Step back one snapshot, restoring it into `store`.
    /// Returns false at the bottom of the stack.
    pub fn undo(&mut self, store: &mut ElementStore) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        *store = self.states[self.index].state.clone();
        true
    }

    /// Step forward one snapshot, restoring it into `store`.
    /// Returns false at the top of the stack.
    pub fn redo(&mut self, store: &mut ElementStore) -> bool {
        if self.index + 1 >= self.states.len() {
            return false;
        }
        self.index += 1;
        *store = self.states[self.index].state.clone();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.states.len()
    }

    /// Number of snapshots currently held (including the baseline).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Action tag of the active snapshot.
    pub fn current_action(&self) -> &str {
        &self.states[self.index].action
    }

    /// Action tag of the oldest retained snapshot.
    pub fn oldest_action(&self) -> &str {
        &self.states[0].action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{LinearElement, LinearKind};
    use kurbo::Point;

    fn add_wall(store: &mut ElementStore, x: f64) {
        store.insert_linear(
            LinearElement::new(
                LinearKind::wall(),
                Point::new(x, 0.0),
                Point::new(x + 100.0, 0.0),
            )
            .unwrap(),
        );
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);

        add_wall(&mut store, 0.0);
        history.commit("draw wall", &store);
        add_wall(&mut store, 200.0);
        history.commit("draw wall", &store);
        let full = store.clone();

        assert!(history.undo(&mut store));
        assert_eq!(store.walls.len(), 1);
        assert!(history.undo(&mut store));
        assert!(store.walls.is_empty());
        assert!(!history.undo(&mut store));

        assert!(history.redo(&mut store));
        assert!(history.redo(&mut store));
        assert_eq!(store, full);
        assert!(!history.redo(&mut store));
    }

    #[test]
    fn test_commit_discards_redo_branch() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);

        add_wall(&mut store, 0.0);
        history.commit("draw wall", &store);
        assert!(history.undo(&mut store));
        assert!(history.can_redo());

        add_wall(&mut store, 400.0);
        history.commit("draw wall", &store);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);

        for i in 0..60 {
            add_wall(&mut store, i as f64 * 200.0);
            history.commit(format!("commit {}", i + 1), &store);
        }
        assert_eq!(history.len(), MAX_HISTORY);
        // Baseline plus commits 1..=10 have been evicted; the oldest
        // reachable undo state is the 11th commit.
        assert_eq!(history.oldest_action(), "commit 11");
        assert_eq!(history.current_action(), "commit 60");

        // Walk all the way down: the store bottoms out at 11 walls.
        while history.undo(&mut store) {}
        assert_eq!(store.walls.len(), 11);
    }

    #[test]
    fn test_snapshots_do_not_alias_live_store() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);
        add_wall(&mut store, 0.0);
        history.commit("draw wall", &store);

        // Mutating the live store must not leak into the snapshot.
        store.walls[0].translate(kurbo::Vec2::new(50.0, 0.0));
        assert!(history.undo(&mut store));
        assert!(history.redo(&mut store));
        assert_eq!(store.walls[0].start, Point::new(0.0, 0.0));
    }
}
