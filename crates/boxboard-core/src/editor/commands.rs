//! Discrete editor commands: toolbar, keyboard and menu actions.

use super::{Editor, Mode};
use crate::store::{Entity, EntityId};
use crate::viewport::ZoomDirection;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A user action that is not part of a pointer gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Undo,
    Redo,
    SetMode(Mode),
    /// Zoom in one step around the viewport centre.
    ZoomIn { fine: bool },
    ZoomOut { fine: bool },
    ResetView,
    /// Add a box, at the viewport centre when no position is given.
    AddEntity { position: Option<Point> },
    SelectOnly(EntityId),
    ToggleSelection(EntityId),
    ClearSelection,
    Duplicate(EntityId),
    /// Stage ids for deletion; nothing is removed until confirmed.
    RequestDelete(Vec<EntityId>),
    RequestDeleteSelection,
    ConfirmDelete,
    CancelDelete,
    ToggleSnap,
    ToggleTrace,
    ClearTrace,
}

impl Editor {
    /// Run a command. Returns true if it changed anything.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::SetMode(mode) => self.set_mode(mode),
            Command::ZoomIn { fine } => self.zoom_at_center(ZoomDirection::In, fine),
            Command::ZoomOut { fine } => self.zoom_at_center(ZoomDirection::Out, fine),
            Command::ResetView => self.reset_view(),
            Command::AddEntity { position } => self.add_entity(position).is_some(),
            Command::SelectOnly(id) => self.select_only(id),
            Command::ToggleSelection(id) => self.toggle_selection(id),
            Command::ClearSelection => {
                let changed = !self.selection.is_empty();
                self.selection.clear();
                changed
            }
            Command::Duplicate(id) => self.duplicate(&id).is_some(),
            Command::RequestDelete(ids) => self.request_delete(ids),
            Command::RequestDeleteSelection => self.request_delete(self.selection.sorted()),
            Command::ConfirmDelete => self.perform_delete() > 0,
            Command::CancelDelete => self.cancel_delete(),
            Command::ToggleSnap => {
                self.snap_enabled = !self.snap_enabled;
                log::debug!("Snap {}", if self.snap_enabled { "on" } else { "off" });
                true
            }
            Command::ToggleTrace => {
                self.trace_enabled = !self.trace_enabled;
                true
            }
            Command::ClearTrace => {
                let changed = !self.trace.is_empty();
                self.trace.clear();
                changed
            }
        }
    }

    /// Switch interaction mode. In-flight gestures keep the mode they began in.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::debug!("Mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        true
    }

    /// Zoom one step around a canvas point.
    pub fn zoom_at(&mut self, direction: ZoomDirection, center: Point, fine: bool) -> bool {
        let step = self.config.zoom_step(fine);
        self.viewport.zoom_step_at(direction, center, step)
    }

    /// Zoom one step around the centre of the current viewport.
    pub fn zoom_at_center(&mut self, direction: ZoomDirection, fine: bool) -> bool {
        let center = self.viewport.viewport().center();
        self.zoom_at(direction, center, fine)
    }

    pub fn reset_view(&mut self) -> bool {
        let changed = self.viewport.viewport() != self.viewport.base();
        self.viewport.reset();
        changed
    }

    /// Document edits are refused while any drag is active.
    fn edit_blocked(&self, what: &str) -> bool {
        let blocked = self.drags.is_dragging();
        if blocked {
            log::debug!("{} ignored while dragging", what);
        }
        blocked
    }

    /// Add a default-sized box and return its id. `None` while dragging.
    pub fn add_entity(&mut self, position: Option<Point>) -> Option<EntityId> {
        if self.edit_blocked("Add") {
            return None;
        }
        self.commit(None);
        let center = position.unwrap_or_else(|| self.viewport.viewport().center());
        let id = EntityId::generate();
        let label = self.store.next_label();
        log::debug!("Add {} '{}' at ({:.1}, {:.1})", id, label, center.x, center.y);
        self.store
            .insert(Entity::new(id.clone(), center, self.config.default_entity_size, label));
        Some(id)
    }

    /// Copy an entity with an offset. `None` if `id` is unknown or a drag
    /// is in progress.
    pub fn duplicate(&mut self, id: &EntityId) -> Option<EntityId> {
        if self.edit_blocked("Duplicate") {
            return None;
        }
        let source = self.store.get(id)?.clone();
        self.commit(None);
        let new_id = EntityId::generate();
        let copy = Entity::new(
            new_id.clone(),
            source.center + self.config.duplicate_offset,
            source.size,
            format!("{} Copy", source.label),
        );
        log::debug!("Duplicate {} -> {}", id, new_id);
        self.store.insert(copy);
        Some(new_id)
    }

    pub fn select_only(&mut self, id: EntityId) -> bool {
        if !self.store.contains(&id) {
            return false;
        }
        self.selection.select_only(id);
        true
    }

    pub fn toggle_selection(&mut self, id: EntityId) -> bool {
        if !self.store.contains(&id) {
            return false;
        }
        self.selection.toggle(id);
        true
    }

    /// Stage ids for confirmation. Empty input is ignored.
    pub fn request_delete(&mut self, ids: Vec<EntityId>) -> bool {
        if ids.is_empty() {
            return false;
        }
        log::debug!("Delete requested for {} box(es)", ids.len());
        self.pending_delete = Some(ids);
        true
    }

    /// Delete the staged ids. Returns how many boxes were removed.
    /// While dragging nothing happens and the ids stay staged.
    pub fn perform_delete(&mut self) -> usize {
        if self.edit_blocked("Delete") {
            return 0;
        }
        match self.pending_delete.take() {
            Some(ids) => self.perform_delete_ids(&ids),
            None => 0,
        }
    }

    /// Delete `ids` now, skipping unknown ones, and prune the selection.
    /// Any staged request is cleared.
    pub fn perform_delete_ids(&mut self, ids: &[EntityId]) -> usize {
        if self.edit_blocked("Delete") {
            return 0;
        }
        self.pending_delete = None;
        let before = self.snapshot();
        let removed = self.store.remove_all(ids);
        if removed == 0 {
            return 0;
        }
        self.selection.remove_all(ids);
        self.commit(Some(before));
        log::debug!("Deleted {} box(es)", removed);
        removed
    }

    /// Drop the staged ids without deleting anything.
    pub fn cancel_delete(&mut self) -> bool {
        self.pending_delete.take().is_some()
    }
}
