//! Selection set and marquee gesture state.

use crate::geometry::rect_from_corners;
use crate::store::EntityId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The set of selected entity ids.
///
/// Iteration order is unspecified; callers that need a stable order must
/// sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: HashSet<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single id.
    pub fn select_only(&mut self, id: EntityId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, id: EntityId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Apply the result of a marquee: replace, or union when `additive`.
    pub fn select_from_marquee(&mut self, ids: impl IntoIterator<Item = EntityId>, additive: bool) {
        if !additive {
            self.ids.clear();
        }
        self.ids.extend(ids);
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    /// Drop every listed id.
    pub fn remove_all(&mut self, ids: &[EntityId]) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Keep only ids for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&EntityId) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.ids.iter()
    }

    /// Selected ids sorted, for display and deterministic output.
    pub fn sorted(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<EntityId> for Selection {
    fn from_iter<T: IntoIterator<Item = EntityId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Rubber-band rectangle of an in-progress select-mode canvas drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marquee {
    /// Where the drag started, canvas space.
    pub start: Point,
    /// Latest pointer position, canvas space.
    pub end: Point,
    /// Shift was held at the start: union with the existing selection.
    pub additive: bool,
}

impl Marquee {
    pub fn new(start: Point, additive: bool) -> Self {
        Self {
            start,
            end: start,
            additive,
        }
    }

    pub fn update(&mut self, end: Point) {
        self.end = end;
    }

    /// The normalized marquee rectangle.
    pub fn rect(&self) -> Rect {
        rect_from_corners(self.start, self.end)
    }
}
