//! Boxboard Core Library
//!
//! Platform-agnostic interaction and state engine for the Boxboard diagram
//! canvas: coordinate mapping, drag gestures, selection, pan/zoom and
//! snapshot undo.

pub mod config;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod selection;
pub mod shortcuts;
pub mod store;
pub mod trace;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use drag::{DragEngine, DragSession, snap_to_grid};
pub use editor::{Command, ContextAction, ContextTarget, Editor, Mode, PointerOutcome};
pub use geometry::{rect_from_corners, rects_intersect, to_canvas_point, viewbox_transform};
pub use history::{History, HistorySnapshot};
pub use input::{
    FixedSurface, Key, KeyInput, Modifiers, MouseButton, PointerEvent, PointerId, PrimaryModifier,
    Surface,
};
pub use selection::{Marquee, Selection};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use store::{Entity, EntityId, EntityStore};
pub use trace::{TraceBuffer, TraceEvent, TraceKind};
pub use viewport::{Viewport, ViewportController, ZoomDirection};
