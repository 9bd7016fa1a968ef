//! Context menu targets and actions.

use super::Editor;
use crate::store::EntityId;
use crate::viewport::ZoomDirection;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What was under the pointer when the menu was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContextTarget {
    /// Empty canvas, at this canvas point.
    Canvas(Point),
    Entity(EntityId),
}

/// Actions a context menu can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextAction {
    AddEntityHere,
    ZoomIn,
    ZoomOut,
    ResetView,
    SelectOnly,
    Duplicate,
    /// Routed to the delete confirmation.
    Delete,
}

impl ContextAction {
    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ContextAction::AddEntityHere => "Add box here",
            ContextAction::ZoomIn => "Zoom in",
            ContextAction::ZoomOut => "Zoom out",
            ContextAction::ResetView => "Reset view",
            ContextAction::SelectOnly => "Select only",
            ContextAction::Duplicate => "Duplicate",
            ContextAction::Delete => "Delete…",
        }
    }
}

impl Editor {
    /// Actions applicable to `target`, in menu order.
    pub fn context_actions(&self, target: &ContextTarget) -> Vec<ContextAction> {
        match target {
            ContextTarget::Canvas(_) => vec![
                ContextAction::AddEntityHere,
                ContextAction::ZoomIn,
                ContextAction::ZoomOut,
                ContextAction::ResetView,
            ],
            ContextTarget::Entity(id) if self.store.contains(id) => vec![
                ContextAction::SelectOnly,
                ContextAction::Duplicate,
                ContextAction::Delete,
            ],
            ContextTarget::Entity(_) => Vec::new(),
        }
    }

    /// Run a menu action. Returns false when the action does not apply to
    /// the target or changed nothing.
    pub fn apply_context_action(&mut self, target: &ContextTarget, action: ContextAction) -> bool {
        match (target, action) {
            (ContextTarget::Canvas(point), ContextAction::AddEntityHere) => {
                self.add_entity(Some(*point)).is_some()
            }
            (ContextTarget::Canvas(point), ContextAction::ZoomIn) => {
                self.zoom_at(ZoomDirection::In, *point, false)
            }
            (ContextTarget::Canvas(point), ContextAction::ZoomOut) => {
                self.zoom_at(ZoomDirection::Out, *point, false)
            }
            (ContextTarget::Canvas(_), ContextAction::ResetView) => self.reset_view(),
            (ContextTarget::Entity(id), ContextAction::SelectOnly) => self.select_only(id.clone()),
            (ContextTarget::Entity(id), ContextAction::Duplicate) => self.duplicate(id).is_some(),
            (ContextTarget::Entity(id), ContextAction::Delete) if self.store.contains(id) => {
                self.request_delete(vec![id.clone()])
            }
            _ => {
                log::debug!("Context action {:?} does not apply to {:?}", action, target);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_actions() {
        let mut editor = Editor::sample();
        let target = ContextTarget::Canvas(Point::new(50.0, 60.0));
        let actions = editor.context_actions(&target);
        let labels: Vec<_> = actions.iter().map(|a| a.label()).collect();
        assert_eq!(labels, vec!["Add box here", "Zoom in", "Zoom out", "Reset view"]);
        assert!(!actions.contains(&ContextAction::Duplicate));

        assert!(editor.apply_context_action(&target, ContextAction::AddEntityHere));
        let added = editor.entities().last().unwrap();
        assert_eq!(added.center, Point::new(50.0, 60.0));
        assert_eq!(added.label, "Box 4");
    }

    #[test]
    fn test_zoom_at_point_keeps_point_fixed() {
        let mut editor = Editor::sample();
        let point = Point::new(300.0, 200.0);
        let target = ContextTarget::Canvas(point);
        assert!(editor.apply_context_action(&target, ContextAction::ZoomIn));
        let v = editor.viewport();
        assert!(((point.x - v.x) / v.w - 0.25).abs() < 1e-12);
        assert!(((point.y - v.y) / v.h - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_entity_delete_goes_to_confirmation() {
        let mut editor = Editor::sample();
        let target = ContextTarget::Entity("c".into());
        assert!(editor.apply_context_action(&target, ContextAction::Delete));
        assert_eq!(editor.pending_delete(), Some(&[EntityId::from("c")][..]));
        assert_eq!(editor.entities().len(), 3);
    }

    #[test]
    fn test_mismatched_action_is_rejected() {
        let mut editor = Editor::sample();
        let target = ContextTarget::Entity("a".into());
        assert!(!editor.apply_context_action(&target, ContextAction::AddEntityHere));
        let unknown = ContextTarget::Entity("zzz".into());
        assert!(editor.context_actions(&unknown).is_empty());
        assert!(!editor.apply_context_action(&unknown, ContextAction::Delete));
    }
}
