//! Boxboard Replay
//!
//! Feeds a scripted input stream through a headless [`Editor`] and reports
//! the resulting document, view and trace state.

pub mod script;

pub use script::{Script, Step, SurfaceLayout};

use boxboard_core::{
    ConfigError, ContextTarget, Editor, EditorConfig, Entity, EntityId, EntityStore, FixedSurface,
    Mode, PointerOutcome, TraceEvent, Viewport,
};
use serde::Serialize;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Script parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid surface: {0}x{1}")]
    InvalidSurface(f64, f64),
}

/// Final editor state after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub entities: Vec<Entity>,
    /// Sorted for stable output.
    pub selection: Vec<EntityId>,
    pub viewport: Viewport,
    pub zoom_percent: i64,
    pub mode: Mode,
    pub snap_enabled: bool,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub pending_delete: Option<Vec<EntityId>>,
    /// Context menu requests raised by secondary clicks, in order.
    pub context_menus: Vec<ContextTarget>,
    pub trace: Vec<TraceEvent>,
}

impl Report {
    fn new(editor: &Editor, context_menus: Vec<ContextTarget>) -> Self {
        Self {
            entities: editor.entities().to_vec(),
            selection: editor.selection().sorted(),
            viewport: editor.viewport(),
            zoom_percent: editor.zoom_percent_rounded(),
            mode: editor.mode(),
            snap_enabled: editor.snap_enabled(),
            undo_depth: editor.history().undo_depth(),
            redo_depth: editor.history().redo_depth(),
            pending_delete: editor.pending_delete().map(<[EntityId]>::to_vec),
            context_menus,
            trace: editor.trace().events().cloned().collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ReplayError> {
        serde_json::to_string_pretty(self).map_err(|e| ReplayError::Serialization(e.to_string()))
    }
}

/// Parse a script from JSON text.
pub fn load(json: &str) -> Result<Script, ReplayError> {
    Script::from_json(json).map_err(|e| ReplayError::Parse(e.to_string()))
}

fn check_surface(layout: &SurfaceLayout) -> Result<(), ReplayError> {
    if layout.width.is_finite()
        && layout.height.is_finite()
        && layout.width >= 0.0
        && layout.height >= 0.0
    {
        Ok(())
    } else {
        Err(ReplayError::InvalidSurface(layout.width, layout.height))
    }
}

/// Run every step of `script` against a fresh editor.
pub fn run(script: Script) -> Result<Report, ReplayError> {
    check_surface(&script.surface)?;

    let config = script.config.unwrap_or_default();
    let mut entities = if script.sample {
        EntityStore::sample().entities().to_vec()
    } else {
        Vec::new()
    };
    entities.extend(script.entities);

    let mut editor = Editor::with_entities(config, entities)?;
    let mut surface = FixedSurface::new(script.surface.to_rect());
    let mut context_menus = Vec::new();

    log::info!("Replaying {} step(s)", script.steps.len());
    for (index, step) in script.steps.into_iter().enumerate() {
        log::debug!("Step {}: {:?}", index, step);
        match step {
            Step::Pointer { event } => {
                let outcome = editor.handle_pointer(event, &mut surface);
                if let PointerOutcome::ContextMenu(target) = outcome {
                    context_menus.push(target);
                }
            }
            Step::Key { input } => {
                editor.handle_key(input);
            }
            Step::Frame => {
                editor.on_frame();
            }
            Step::Command { command } => {
                editor.execute(command);
            }
            Step::ContextAction { target, action } => {
                if !editor.apply_context_action(&target, action) {
                    log::warn!("Step {}: context action {:?} had no effect", index, action);
                }
            }
            Step::Resize { surface: layout } => match layout {
                Some(layout) => {
                    check_surface(&layout)?;
                    surface.set_bounds(Some(layout.to_rect()));
                }
                None => surface.set_bounds(None),
            },
            Step::Teardown => editor.teardown(&mut surface),
        }
    }

    Ok(Report::new(&editor, context_menus))
}

/// Default configuration as pretty JSON, as a starting point for scripts.
pub fn default_config_json() -> Result<String, ReplayError> {
    serde_json::to_string_pretty(&EditorConfig::default())
        .map_err(|e| ReplayError::Serialization(e.to_string()))
}
