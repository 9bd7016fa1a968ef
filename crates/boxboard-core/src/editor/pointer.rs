//! Pointer gesture routing: entity drags, marquee, pan and wheel zoom.

use super::{ContextTarget, Editor, Mode};
use crate::drag::{DragSession, DragStep};
use crate::geometry::to_canvas_point;
use crate::input::{Modifiers, MouseButton, PointerEvent, PointerId, Surface};
use crate::selection::Marquee;
use crate::store::EntityId;
use crate::trace::{TraceEvent, TraceKind};
use crate::viewport::ZoomDirection;
use kurbo::{Point, Vec2};

/// What the editor did with a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Nothing to do for this event.
    Ignored,
    /// State changed or a gesture advanced.
    Handled,
    /// Secondary button: the presentation layer should open a context menu.
    ContextMenu(ContextTarget),
}

impl Editor {
    /// Feed one pointer event from the input source.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        surface: &mut dyn Surface,
    ) -> PointerOutcome {
        match event {
            PointerEvent::Down {
                pointer,
                position,
                button,
                modifiers,
            } => self.pointer_down(pointer, position, button, modifiers, surface),
            PointerEvent::Move {
                pointer,
                position,
                modifiers,
            } => self.pointer_move(pointer, position, modifiers, surface),
            PointerEvent::Up {
                pointer,
                position,
                modifiers,
            } => self.pointer_up(pointer, position, modifiers, surface),
            PointerEvent::Cancel { pointer } => {
                self.pointer_cancel(pointer, TraceKind::Cancel, surface)
            }
            PointerEvent::LostCapture { pointer } => {
                self.pointer_cancel(pointer, TraceKind::Lost, surface)
            }
            PointerEvent::Wheel {
                position,
                delta,
                modifiers,
            } => self.wheel(position, delta, modifiers, surface),
        }
    }

    fn canvas_point(&mut self, device: Point, surface: &dyn Surface) -> Point {
        let ctm = surface.screen_transform(&self.viewport.viewport());
        let canvas = to_canvas_point(device, ctm);
        self.pointer_canvas = Some(canvas);
        canvas
    }

    fn pointer_down(
        &mut self,
        pointer: PointerId,
        device: Point,
        button: MouseButton,
        modifiers: Modifiers,
        surface: &mut dyn Surface,
    ) -> PointerOutcome {
        let canvas = self.canvas_point(device, surface);

        match button {
            MouseButton::Left => {}
            MouseButton::Right => {
                let target = match (self.mode, self.store.hit_test(canvas)) {
                    (Mode::Select, Some(id)) => ContextTarget::Entity(id.clone()),
                    _ => ContextTarget::Canvas(canvas),
                };
                return PointerOutcome::ContextMenu(target);
            }
            MouseButton::Middle => return PointerOutcome::Ignored,
        }

        // A pointer that never delivered its up event still owns a gesture.
        if self.owns_gesture(pointer) {
            log::debug!("Pointer {:?} restarted, cancelling stale gesture", pointer);
            self.pointer_cancel(pointer, TraceKind::Cancel, surface);
        }

        if self.mode == Mode::Pan {
            self.cancel_canvas_gesture(surface);
            self.viewport.begin_pan(device);
            self.pan_pointer = Some(pointer);
            surface.set_pointer_capture(pointer);
            return PointerOutcome::Handled;
        }

        match self.store.hit_test(canvas).cloned() {
            Some(id) => self.begin_drag(pointer, id, device, canvas),
            None => {
                self.cancel_canvas_gesture(surface);
                self.marquee = Some(Marquee::new(canvas, modifiers.shift));
                self.marquee_pointer = Some(pointer);
            }
        }
        surface.set_pointer_capture(pointer);
        PointerOutcome::Handled
    }

    fn begin_drag(&mut self, pointer: PointerId, id: EntityId, device: Point, canvas: Point) {
        let before = self.snapshot();
        let group = self.selection.contains(&id) && self.selection.len() > 1;
        let session = if group {
            let origins = self
                .store
                .iter()
                .filter(|e| self.selection.contains(&e.id))
                .map(|e| (e.id.clone(), e.center))
                .collect();
            DragSession::group(pointer, id.clone(), canvas, origins, before)
        } else {
            let Some(origin) = self.store.get(&id).map(|e| e.center) else {
                return;
            };
            let snap = if self.snap_enabled { self.config.snap_size } else { 0.0 };
            DragSession::single(pointer, id.clone(), canvas, origin, snap, before)
        };
        self.drags.begin(session);
        self.record(
            TraceEvent::new(TraceKind::Start, pointer)
                .entity(Some(id))
                .points(device, canvas)
                .dragging(true),
        );
    }

    fn pointer_move(
        &mut self,
        pointer: PointerId,
        device: Point,
        modifiers: Modifiers,
        surface: &mut dyn Surface,
    ) -> PointerOutcome {
        let canvas = self.canvas_point(device, surface);

        if let Some(step) = self.drags.drag_to(pointer, canvas, modifiers) {
            let delta = step.delta();
            if let DragStep::Group { updates, .. } = step {
                self.apply_updates(updates);
            }
            let entity = self.drags.session(pointer).map(|s| s.entity.clone());
            self.record(
                TraceEvent::new(TraceKind::Move, pointer)
                    .entity(entity)
                    .points(device, canvas)
                    .delta(delta)
                    .dragging(true),
            );
            return PointerOutcome::Handled;
        }

        if self.pan_pointer == Some(pointer) {
            let size = surface.size();
            self.viewport.pan_to(device, size);
            return PointerOutcome::Handled;
        }

        if self.marquee_pointer == Some(pointer) {
            if let Some(marquee) = self.marquee.as_mut() {
                marquee.update(canvas);
            }
            return PointerOutcome::Handled;
        }

        PointerOutcome::Ignored
    }

    fn pointer_up(
        &mut self,
        pointer: PointerId,
        device: Point,
        modifiers: Modifiers,
        surface: &mut dyn Surface,
    ) -> PointerOutcome {
        let canvas = self.canvas_point(device, surface);

        if self.drags.is_dragging_pointer(pointer) {
            // The last move must land even if its frame never came.
            if let Some(update) = self.drags.flush(pointer) {
                self.apply_updates(vec![update]);
            }
            if let Some(session) = self.drags.finish(pointer) {
                surface.release_pointer_capture(pointer);
                self.end_drag(session, device, canvas, modifiers);
            }
            return PointerOutcome::Handled;
        }

        if self.pan_pointer == Some(pointer) {
            self.pan_pointer = None;
            self.viewport.end_pan();
            surface.release_pointer_capture(pointer);
            return PointerOutcome::Handled;
        }

        if self.marquee_pointer == Some(pointer) {
            self.marquee_pointer = None;
            surface.release_pointer_capture(pointer);
            if let Some(mut marquee) = self.marquee.take() {
                marquee.update(canvas);
                let hits = self.store.ids_in_rect(marquee.rect());
                log::debug!(
                    "Marquee selected {} box(es), additive: {}",
                    hits.len(),
                    marquee.additive
                );
                self.selection.select_from_marquee(hits, marquee.additive);
            }
            return PointerOutcome::Handled;
        }

        PointerOutcome::Ignored
    }

    fn end_drag(
        &mut self,
        session: DragSession,
        device: Point,
        canvas: Point,
        modifiers: Modifiers,
    ) {
        let displaced = session
            .origins()
            .iter()
            .any(|(id, origin)| self.store.get(id).is_some_and(|e| e.center != *origin));
        let delta = canvas - session.start;

        self.record(
            TraceEvent::new(TraceKind::End, session.pointer)
                .entity(Some(session.entity.clone()))
                .points(device, canvas)
                .delta(delta)
                .dragging(true),
        );

        if displaced {
            log::debug!("Drag end: entity {} moved, committing", session.entity);
            self.commit(Some(session.into_before()));
        } else if !session.moved && self.store.contains(&session.entity) {
            // No movement at all: this was a click.
            if modifiers.shift {
                self.selection.toggle(session.entity);
            } else {
                self.selection.select_only(session.entity);
            }
        } else {
            log::debug!("Drag end: no net displacement, nothing committed");
        }
    }

    /// Abort whatever gesture `pointer` owns. `kind` says why.
    fn pointer_cancel(
        &mut self,
        pointer: PointerId,
        kind: TraceKind,
        surface: &mut dyn Surface,
    ) -> PointerOutcome {
        if let Some(session) = self.drags.finish(pointer) {
            surface.release_pointer_capture(pointer);
            self.rollback(session, kind);
            return PointerOutcome::Handled;
        }

        if self.pan_pointer == Some(pointer) {
            self.pan_pointer = None;
            self.viewport.end_pan();
            surface.release_pointer_capture(pointer);
            return PointerOutcome::Handled;
        }

        if self.marquee_pointer == Some(pointer) {
            self.marquee_pointer = None;
            self.marquee = None;
            surface.release_pointer_capture(pointer);
            return PointerOutcome::Handled;
        }

        if kind == TraceKind::Lost {
            self.record(TraceEvent::new(TraceKind::Lost, pointer));
        }
        PointerOutcome::Ignored
    }

    /// Put every entity of `session` back where the gesture found it.
    pub(super) fn rollback(&mut self, mut session: DragSession, kind: TraceKind) {
        session.discard_pending();
        for (id, origin) in session.origins() {
            self.store.set_center(&id, origin);
        }
        log::debug!("Drag {:?}: pointer {:?} entity {}", kind, session.pointer, session.entity);
        self.record(
            TraceEvent::new(kind, session.pointer)
                .entity(Some(session.entity))
                .dragging(true),
        );
    }

    /// Only one pan or marquee runs at a time; a second pointer takes over.
    fn cancel_canvas_gesture(&mut self, surface: &mut dyn Surface) {
        if let Some(other) = self.pan_pointer.or(self.marquee_pointer) {
            self.pointer_cancel(other, TraceKind::Cancel, surface);
        }
    }

    fn owns_gesture(&self, pointer: PointerId) -> bool {
        self.drags.is_dragging_pointer(pointer)
            || self.pan_pointer == Some(pointer)
            || self.marquee_pointer == Some(pointer)
    }

    fn wheel(
        &mut self,
        device: Point,
        delta: Vec2,
        modifiers: Modifiers,
        surface: &mut dyn Surface,
    ) -> PointerOutcome {
        if delta.y == 0.0 || delta.y.is_nan() {
            return PointerOutcome::Ignored;
        }
        let center = self.canvas_point(device, surface);
        let direction = if delta.y < 0.0 { ZoomDirection::In } else { ZoomDirection::Out };
        let step = self.config.zoom_step(modifiers.alt || modifiers.shift);
        if self.viewport.zoom_step_at(direction, center, step) {
            PointerOutcome::Handled
        } else {
            PointerOutcome::Ignored
        }
    }
}
