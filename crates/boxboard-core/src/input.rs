//! Input events and the rendering-surface boundary.

use crate::geometry::viewbox_transform;
use crate::viewport::Viewport;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifies one physical pointer (mouse, pen, or touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u64);

/// Mouse button identifiers. `Left` is the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Whether the platform's primary accelerator key is held.
    pub fn primary(self, primary: PrimaryModifier) -> bool {
        match primary {
            PrimaryModifier::Ctrl => self.ctrl,
            PrimaryModifier::Meta => self.meta,
        }
    }
}

/// Which key acts as the accelerator modifier (Cmd on macOS, Ctrl elsewhere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimaryModifier {
    Ctrl,
    Meta,
}

impl Default for PrimaryModifier {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            PrimaryModifier::Meta
        } else {
            PrimaryModifier::Ctrl
        }
    }
}

/// Pointer event in device coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        pointer: PointerId,
        position: Point,
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        pointer: PointerId,
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        pointer: PointerId,
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Cancel {
        pointer: PointerId,
    },
    LostCapture {
        pointer: PointerId,
    },
    Wheel {
        position: Point,
        delta: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl PointerEvent {
    /// The pointer this event belongs to, if any.
    pub fn pointer(&self) -> Option<PointerId> {
        match self {
            PointerEvent::Down { pointer, .. }
            | PointerEvent::Move { pointer, .. }
            | PointerEvent::Up { pointer, .. }
            | PointerEvent::Cancel { pointer }
            | PointerEvent::LostCapture { pointer } => Some(*pointer),
            PointerEvent::Wheel { .. } => None,
        }
    }
}

/// Keys the accelerator surface understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Character(char),
    Delete,
    Backspace,
    Enter,
    Escape,
    Other,
}

/// A key press together with the context needed to route it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Focus is on a text field; accelerators must not fire.
    #[serde(default)]
    pub text_input_focused: bool,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            text_input_focused: false,
        }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// The rendering surface the canvas is displayed on.
///
/// The core asks it for the coordinate mapping on every pointer event and
/// hands pointer capture to it for the duration of a gesture.
pub trait Surface {
    /// On-screen rectangle of the surface, `None` when not laid out.
    fn bounds(&self) -> Option<Rect>;

    /// Canvas→device transform for `viewport`.
    fn screen_transform(&self, viewport: &Viewport) -> Option<Affine> {
        self.bounds().and_then(|b| viewbox_transform(viewport, b))
    }

    /// On-screen pixel size of the surface.
    fn size(&self) -> Size {
        self.bounds().map(|b| b.size()).unwrap_or(Size::ZERO)
    }

    /// Route all further events of `pointer` to the canvas.
    fn set_pointer_capture(&mut self, _pointer: PointerId) {}

    /// Undo a previous `set_pointer_capture`.
    fn release_pointer_capture(&mut self, _pointer: PointerId) {}
}

/// A surface with fixed on-screen bounds that records pointer captures.
#[derive(Debug, Clone, Default)]
pub struct FixedSurface {
    bounds: Option<Rect>,
    captured: HashSet<PointerId>,
}

impl FixedSurface {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Some(bounds),
            captured: HashSet::new(),
        }
    }

    /// A surface that has not been laid out; conversions fall back to identity.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    pub fn is_captured(&self, pointer: PointerId) -> bool {
        self.captured.contains(&pointer)
    }

    pub fn capture_count(&self) -> usize {
        self.captured.len()
    }
}

impl Surface for FixedSurface {
    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    fn set_pointer_capture(&mut self, pointer: PointerId) {
        self.captured.insert(pointer);
    }

    fn release_pointer_capture(&mut self, pointer: PointerId) {
        self.captured.remove(&pointer);
    }
}
