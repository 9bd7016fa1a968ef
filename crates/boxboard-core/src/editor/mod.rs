//! The editor: one owner for document, view and gesture state.
//!
//! Presentation code forwards raw input to [`Editor::handle_pointer`] and
//! [`Editor::handle_key`], calls [`Editor::on_frame`] once per display frame,
//! and reads everything it draws back through the accessors.

mod commands;
mod context_menu;
mod pointer;

pub use commands::Command;
pub use context_menu::{ContextAction, ContextTarget};
pub use pointer::PointerOutcome;

use crate::config::{ConfigError, EditorConfig};
use crate::drag::{DragEngine, PositionUpdate};
use crate::history::{History, HistorySnapshot};
use crate::input::{KeyInput, PointerId, Surface};
use crate::selection::{Marquee, Selection};
use crate::shortcuts::command_for_key;
use crate::store::{Entity, EntityId, EntityStore};
use crate::trace::{TraceBuffer, TraceClock, TraceEvent, TraceKind};
use crate::viewport::{Viewport, ViewportController};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Interaction mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Boxes can be dragged and marquee-selected.
    #[default]
    Select,
    /// Primary drags pan the view; boxes are inert.
    Pan,
}

/// Interaction and state engine for the box canvas.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    store: EntityStore,
    selection: Selection,
    viewport: ViewportController,
    history: History,
    drags: DragEngine,
    marquee: Option<Marquee>,
    marquee_pointer: Option<PointerId>,
    pan_pointer: Option<PointerId>,
    mode: Mode,
    snap_enabled: bool,
    pending_delete: Option<Vec<EntityId>>,
    trace: TraceBuffer,
    trace_enabled: bool,
    clock: TraceClock,
    pointer_canvas: Option<Point>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::from_valid_config(EditorConfig::default(), EntityStore::new())
    }
}

impl Editor {
    /// Create an editor with an empty document.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        Self::with_entities(config, Vec::new())
    }

    /// Create an editor over an existing set of entities.
    pub fn with_entities(config: EditorConfig, entities: Vec<Entity>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, EntityStore::from_entities(entities)))
    }

    /// Default configuration with the three-box sample document.
    pub fn sample() -> Self {
        Self::from_valid_config(EditorConfig::default(), EntityStore::sample())
    }

    fn from_valid_config(config: EditorConfig, store: EntityStore) -> Self {
        Self {
            viewport: ViewportController::new(config.base_viewport),
            history: History::new(config.history_limit),
            trace: TraceBuffer::new(config.trace_capacity),
            snap_enabled: config.snap_enabled,
            trace_enabled: config.trace_enabled,
            store,
            selection: Selection::new(),
            drags: DragEngine::new(),
            marquee: None,
            marquee_pointer: None,
            pan_pointer: None,
            mode: Mode::Select,
            pending_delete: None,
            clock: TraceClock::new(),
            pointer_canvas: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn entities(&self) -> &[Entity] {
        self.store.entities()
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.store.get(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selection.contains(id)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    pub fn zoom_percent(&self) -> f64 {
        self.viewport.zoom_percent()
    }

    /// Zoom percent rounded for the toolbar readout.
    pub fn zoom_percent_rounded(&self) -> i64 {
        self.viewport.zoom_percent_rounded()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The rubber band being drawn, if any.
    pub fn marquee(&self) -> Option<&Marquee> {
        self.marquee.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drags.is_dragging()
    }

    pub fn is_panning(&self) -> bool {
        self.viewport.is_panning()
    }

    /// A coalesced drag position is waiting for [`Editor::on_frame`].
    pub fn has_pending_frame(&self) -> bool {
        self.drags.has_pending()
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace_enabled
    }

    /// Last pointer position seen, canvas space (debug crosshair).
    pub fn pointer_canvas_position(&self) -> Option<Point> {
        self.pointer_canvas
    }

    /// Ids staged for deletion, awaiting confirmation.
    pub fn pending_delete(&self) -> Option<&[EntityId]> {
        self.pending_delete.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Deep copy of entities and selection.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entities: self.store.entities().to_vec(),
            selection: self.selection.clone(),
        }
    }

    /// Record an undo step. Without `before`, the current state is used.
    pub fn commit(&mut self, before: Option<HistorySnapshot>) {
        let before = before.unwrap_or_else(|| self.snapshot());
        self.history.commit(before);
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.drags.is_dragging() {
            log::debug!("Undo ignored while dragging");
            return false;
        }
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                log::debug!("Undo ({} left)", self.history.undo_depth());
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.drags.is_dragging() {
            log::debug!("Redo ignored while dragging");
            return false;
        }
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                log::debug!("Redo ({} left)", self.history.redo_depth());
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.store.replace(snapshot.entities);
        self.selection = snapshot.selection;
        let store = &self.store;
        self.selection.retain(|id| store.contains(id));
    }

    /// Apply coalesced drag positions. Call once per display frame.
    /// Returns true if anything moved.
    pub fn on_frame(&mut self) -> bool {
        let updates = self.drags.take_pending();
        let applied = !updates.is_empty();
        self.apply_updates(updates);
        applied
    }

    fn apply_updates(&mut self, updates: Vec<PositionUpdate>) {
        for update in updates {
            self.store.set_center(&update.id, update.center);
        }
    }

    /// Route a key press through the accelerator table.
    /// Returns true if the key was consumed.
    pub fn handle_key(&mut self, input: KeyInput) -> bool {
        let command = command_for_key(
            &input,
            self.config.primary_modifier,
            !self.selection.is_empty(),
            self.pending_delete.is_some(),
        );
        match command {
            Some(command) => {
                log::debug!("Key {:?} -> {:?}", input.key, command);
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Abort every gesture and release every pointer capture.
    ///
    /// Call before the surface goes away. Dragged boxes return to where the
    /// gesture found them and nothing is committed.
    pub fn teardown(&mut self, surface: &mut dyn Surface) {
        let mut pointers: Vec<PointerId> =
            self.marquee_pointer.into_iter().chain(self.pan_pointer).collect();
        for session in self.drags.drain() {
            pointers.push(session.pointer);
            self.rollback(session, TraceKind::Cancel);
        }
        self.marquee = None;
        self.marquee_pointer = None;
        self.pan_pointer = None;
        self.viewport.end_pan();
        for pointer in pointers {
            surface.release_pointer_capture(pointer);
        }
        log::debug!("Editor torn down");
    }

    fn record(&mut self, event: TraceEvent) {
        if self.trace_enabled {
            let timestamp = self.clock.now_ms();
            self.trace.push(event.at(timestamp));
        }
    }
}
