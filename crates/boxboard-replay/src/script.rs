//! Replay script format.
//!
//! A script is a JSON document describing the starting document, the
//! on-screen surface and an ordered list of input steps:
//!
//! ```json
//! {
//!   "sample": true,
//!   "surface": { "x": 0, "y": 0, "width": 1200, "height": 800 },
//!   "steps": [
//!     { "type": "pointer", "event": { "Down": {
//!         "pointer": 1, "position": { "x": 240, "y": 140 }, "button": "Left"
//!     } } },
//!     { "type": "frame" },
//!     { "type": "key", "input": { "key": "Delete" } }
//!   ]
//! }
//! ```

use boxboard_core::{
    Command, ContextAction, ContextTarget, EditorConfig, Entity, KeyInput, PointerEvent,
};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// On-screen rectangle of the simulated surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl SurfaceLayout {
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Pointer { event: PointerEvent },
    Key { input: KeyInput },
    /// A display frame: apply coalesced drag positions.
    Frame,
    Command { command: Command },
    ContextAction { target: ContextTarget, action: ContextAction },
    /// Change the surface's on-screen rectangle; `null` detaches it.
    Resize { surface: Option<SurfaceLayout> },
    /// Abort all gestures as if the surface was destroyed.
    Teardown,
}

/// A complete replay script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub config: Option<EditorConfig>,
    pub surface: SurfaceLayout,
    /// Start from the three-box sample document.
    pub sample: bool,
    /// Extra entities, appended after the sample ones.
    pub entities: Vec<Entity>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
