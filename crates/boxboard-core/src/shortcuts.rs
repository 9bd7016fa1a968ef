//! Keyboard accelerators and the shortcut registry.

use crate::editor::{Command, Mode};
use crate::input::{Key, KeyInput, PrimaryModifier};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub primary: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        primary: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            primary,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z", "Cmd+Shift+Z").
    pub fn format(&self, primary: PrimaryModifier) -> String {
        let mut parts = Vec::new();
        if self.primary {
            parts.push(match primary {
                PrimaryModifier::Ctrl => "Ctrl",
                PrimaryModifier::Meta => "Cmd",
            });
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("V", false, false, "Select mode"),
            Shortcut::new("H", false, false, "Pan mode"),
            Shortcut::new("K", false, false, "Zoom in at view centre"),
            Shortcut::new("Delete", false, false, "Delete selected boxes"),
            Shortcut::new("Backspace", false, false, "Delete selected boxes"),
            Shortcut::new("Enter", false, false, "Confirm pending delete"),
            Shortcut::new("Escape", false, false, "Cancel pending delete"),
            Shortcut::new("Shift+Click", false, false, "Toggle box in selection"),
            Shortcut::new("Shift+Drag", false, false, "Add marquee hits to selection"),
            Shortcut::new("Alt+Drag", false, false, "Move without grid snapping"),
        ]
    }

    /// One formatted line per shortcut.
    pub fn lines(primary: PrimaryModifier) -> Vec<String> {
        Self::all()
            .iter()
            .map(|s| format!("{:20} {}", s.format(primary), s.description))
            .collect()
    }
}

/// Map a key press to the command it triggers, if any.
///
/// `has_selection` gates Delete/Backspace; `delete_pending` enables the
/// Enter/Escape confirmation keys. Nothing fires while a text field has focus.
pub fn command_for_key(
    input: &KeyInput,
    primary: PrimaryModifier,
    has_selection: bool,
    delete_pending: bool,
) -> Option<Command> {
    if input.text_input_focused {
        return None;
    }

    let mods = input.modifiers;
    let with_primary = mods.primary(primary);

    match input.key {
        Key::Character(c) => {
            let c = c.to_ascii_lowercase();
            if with_primary {
                return match c {
                    'z' if mods.shift => Some(Command::Redo),
                    'z' => Some(Command::Undo),
                    'y' => Some(Command::Redo),
                    _ => None,
                };
            }
            match c {
                'v' => Some(Command::SetMode(Mode::Select)),
                'h' => Some(Command::SetMode(Mode::Pan)),
                'k' => Some(Command::ZoomIn { fine: false }),
                _ => None,
            }
        }
        Key::Delete | Key::Backspace if has_selection => Some(Command::RequestDeleteSelection),
        Key::Enter if delete_pending => Some(Command::ConfirmDelete),
        Key::Escape if delete_pending => Some(Command::CancelDelete),
        _ => None,
    }
}
