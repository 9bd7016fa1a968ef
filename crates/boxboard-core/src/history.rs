//! Snapshot-based undo/redo history.

use crate::selection::Selection;
use crate::store::Entity;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default maximum number of undo states to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A full copy of document state for undo/redo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// All entities, in store order.
    pub entities: Vec<Entity>,
    /// Selected ids at the time of the snapshot.
    pub selection: Selection,
}

/// Undo and redo stacks of snapshots, most recent last.
///
/// Each entry is the state *before* a user action. The oldest undo entries
/// are dropped silently once `limit` is exceeded.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<HistorySnapshot>,
    redo_stack: Vec<HistorySnapshot>,
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Some(DEFAULT_HISTORY_LIMIT))
    }
}

impl History {
    /// Create an empty history. `None` keeps every entry.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Record the pre-mutation state of a new user action.
    pub fn commit(&mut self, before: HistorySnapshot) {
        self.push_undo(before);
        self.redo_stack.clear();
    }

    /// Step back. `current` is the live state, saved for redo.
    /// Returns the snapshot to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let next = self.redo_stack.pop()?;
        self.push_undo(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: HistorySnapshot) {
        self.undo_stack.push_back(snapshot);
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};

    fn state(n: usize) -> HistorySnapshot {
        let entities = (0..n)
            .map(|i| {
                Entity::new(
                    format!("e{i}").as_str(),
                    Point::new(i as f64, 0.0),
                    Size::new(10.0, 10.0),
                    format!("Box {}", i + 1),
                )
            })
            .collect();
        HistorySnapshot {
            entities,
            selection: Selection::new(),
        }
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut history = History::default();
        assert!(!history.can_undo());
        assert!(history.undo(state(0)).is_none());
        assert!(!history.can_redo());
        assert!(history.redo(state(0)).is_none());
        // A failed undo must not leak the current state onto the redo stack.
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_commit_undo_redo_round_trip() {
        let mut history = History::default();
        let before = state(1);
        let after = state(2);

        history.commit(before.clone());
        let restored = history.undo(after.clone()).unwrap();
        assert_eq!(restored, before);
        assert!(history.can_redo());

        let redone = history.redo(restored).unwrap();
        assert_eq!(redone, after);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut history = History::default();
        history.commit(state(0));
        history.undo(state(1));
        assert!(history.can_redo());
        history.commit(state(0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(Some(3));
        assert_eq!(history.limit(), Some(3));
        for n in 0..5 {
            history.commit(state(n));
        }
        assert_eq!(history.undo_depth(), 3);
        assert_eq!(history.undo(state(9)).unwrap(), state(4));
        assert_eq!(history.undo(state(9)).unwrap(), state(3));
        assert_eq!(history.undo(state(9)).unwrap(), state(2));
        assert!(history.undo(state(9)).is_none());
    }

    #[test]
    fn test_unbounded_history() {
        let mut history = History::new(None);
        assert_eq!(history.limit(), None);
        for n in 0..250 {
            history.commit(state(n % 3));
        }
        assert_eq!(history.undo_depth(), 250);
    }
}
