//! Pointer-driven drag sessions for single and group entity moves.
//!
//! The engine only tracks gesture state and computes target positions; the
//! editor applies them to the store. Single drags are coalesced: each move
//! overwrites one pending position that is applied on the next frame. Group
//! drags apply immediately so the grouped boxes never drift apart.

use crate::history::HistorySnapshot;
use crate::input::{Modifiers, PointerId};
use crate::store::EntityId;
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Snap a value to the nearest multiple of `grid_size`.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap both coordinates of a point to a square grid.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size))
}

/// How a session moves its entities.
#[derive(Debug, Clone, PartialEq)]
pub enum DragMode {
    /// One entity, snapped to the grid captured at start (`0` disables).
    Single { origin: Point, snap: f64 },
    /// Several entities translated by the same raw delta, in store order.
    Group { origins: Vec<(EntityId, Point)> },
}

/// A new target centre for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionUpdate {
    pub id: EntityId,
    pub center: Point,
}

/// Result of feeding a move into a session.
#[derive(Debug, Clone, PartialEq)]
pub enum DragStep {
    /// Single drag: the position waits for the next frame.
    Scheduled { delta: Vec2, pending: Point },
    /// Group drag: apply these now.
    Group { delta: Vec2, updates: Vec<PositionUpdate> },
}

impl DragStep {
    pub fn delta(&self) -> Vec2 {
        match self {
            DragStep::Scheduled { delta, .. } | DragStep::Group { delta, .. } => *delta,
        }
    }
}

/// Context of one drag gesture, built once at pointer-down.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub pointer: PointerId,
    /// The entity under the pointer at start.
    pub entity: EntityId,
    /// Pointer position at start, canvas space.
    pub start: Point,
    pub mode: DragMode,
    /// Some move produced a non-zero delta.
    pub moved: bool,
    pending: Option<Point>,
    before: HistorySnapshot,
}

impl DragSession {
    pub fn single(
        pointer: PointerId,
        entity: EntityId,
        start: Point,
        origin: Point,
        snap: f64,
        before: HistorySnapshot,
    ) -> Self {
        Self {
            pointer,
            entity,
            start,
            mode: DragMode::Single { origin, snap },
            moved: false,
            pending: None,
            before,
        }
    }

    pub fn group(
        pointer: PointerId,
        entity: EntityId,
        start: Point,
        origins: Vec<(EntityId, Point)>,
        before: HistorySnapshot,
    ) -> Self {
        Self {
            pointer,
            entity,
            start,
            mode: DragMode::Group { origins },
            moved: false,
            pending: None,
            before,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.mode, DragMode::Group { .. })
    }

    /// Pre-drag centre of every entity this session moves.
    pub fn origins(&self) -> Vec<(EntityId, Point)> {
        match &self.mode {
            DragMode::Single { origin, .. } => vec![(self.entity.clone(), *origin)],
            DragMode::Group { origins } => origins.clone(),
        }
    }

    pub fn pending(&self) -> Option<Point> {
        self.pending
    }

    /// Take the coalesced position, if any.
    pub fn take_pending(&mut self) -> Option<PositionUpdate> {
        self.pending.take().map(|center| PositionUpdate {
            id: self.entity.clone(),
            center,
        })
    }

    /// Drop the coalesced position without applying it.
    pub fn discard_pending(&mut self) {
        self.pending = None;
    }

    /// The document state captured before the drag started.
    pub fn into_before(self) -> HistorySnapshot {
        self.before
    }

    fn step(&mut self, canvas: Point, modifiers: Modifiers) -> DragStep {
        let delta = canvas - self.start;
        if delta != Vec2::ZERO {
            self.moved = true;
        }
        match &self.mode {
            DragMode::Single { origin, snap } => {
                let candidate = *origin + delta;
                let pending = if *snap > 0.0 && !modifiers.alt {
                    snap_to_grid(candidate, *snap)
                } else {
                    candidate
                };
                self.pending = Some(pending);
                DragStep::Scheduled { delta, pending }
            }
            DragMode::Group { origins } => {
                let updates = origins
                    .iter()
                    .map(|(id, origin)| PositionUpdate {
                        id: id.clone(),
                        center: *origin + delta,
                    })
                    .collect();
                DragStep::Group { delta, updates }
            }
        }
    }
}

/// Active drag sessions keyed by pointer.
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    sessions: HashMap<PointerId, DragSession>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session. A session already owned by the same pointer is
    /// returned so the caller can cancel it.
    pub fn begin(&mut self, session: DragSession) -> Option<DragSession> {
        log::debug!(
            "Drag start: pointer {:?} entity {} ({})",
            session.pointer,
            session.entity,
            if session.is_group() { "group" } else { "single" }
        );
        self.sessions.insert(session.pointer, session)
    }

    /// Feed a pointer move. `None` when the pointer has no session.
    pub fn drag_to(
        &mut self,
        pointer: PointerId,
        canvas: Point,
        modifiers: Modifiers,
    ) -> Option<DragStep> {
        let session = self.sessions.get_mut(&pointer)?;
        let step = session.step(canvas, modifiers);
        log::trace!("Drag move: pointer {:?} delta {:?}", pointer, step.delta());
        Some(step)
    }

    /// Take the pending position of every session, for the frame callback.
    pub fn take_pending(&mut self) -> Vec<PositionUpdate> {
        let mut pointers: Vec<_> = self.sessions.keys().copied().collect();
        pointers.sort();
        pointers
            .into_iter()
            .filter_map(|p| self.sessions.get_mut(&p).and_then(DragSession::take_pending))
            .collect()
    }

    /// Take the pending position of one session, ahead of its frame.
    pub fn flush(&mut self, pointer: PointerId) -> Option<PositionUpdate> {
        self.sessions.get_mut(&pointer)?.take_pending()
    }

    /// Remove and return a session.
    pub fn finish(&mut self, pointer: PointerId) -> Option<DragSession> {
        self.sessions.remove(&pointer)
    }

    /// Remove every session, in pointer order.
    pub fn drain(&mut self) -> Vec<DragSession> {
        let mut sessions: Vec<_> = self.sessions.drain().map(|(_, s)| s).collect();
        sessions.sort_by_key(|s| s.pointer);
        sessions
    }

    pub fn session(&self, pointer: PointerId) -> Option<&DragSession> {
        self.sessions.get(&pointer)
    }

    pub fn is_dragging(&self) -> bool {
        !self.sessions.is_empty()
    }

    pub fn is_dragging_pointer(&self, pointer: PointerId) -> bool {
        self.sessions.contains_key(&pointer)
    }

    pub fn has_pending(&self) -> bool {
        self.sessions.values().any(|s| s.pending.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PointerId = PointerId(1);

    fn single(snap: f64) -> DragSession {
        DragSession::single(
            P,
            EntityId::from("a"),
            Point::new(100.0, 100.0),
            Point::new(240.0, 140.0),
            snap,
            HistorySnapshot::default(),
        )
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(Point::new(14.0, 16.0), 10.0), Point::new(10.0, 20.0));
        assert_eq!(snap_value(-4.0, 10.0), 0.0);
    }

    #[test]
    fn test_single_drag_snaps() {
        let mut engine = DragEngine::new();
        assert!(engine.begin(single(10.0)).is_none());
        let step = engine.drag_to(P, Point::new(113.0, 96.0), Modifiers::NONE).unwrap();
        assert_eq!(
            step,
            DragStep::Scheduled {
                delta: Vec2::new(13.0, -4.0),
                pending: Point::new(250.0, 140.0),
            }
        );
        assert!(engine.session(P).unwrap().moved);
    }

    #[test]
    fn test_alt_disables_snap() {
        let mut engine = DragEngine::new();
        engine.begin(single(10.0));
        engine.drag_to(P, Point::new(113.0, 96.0), Modifiers::ALT);
        assert_eq!(engine.flush(P).unwrap().center, Point::new(253.0, 136.0));
    }

    #[test]
    fn test_zero_snap_is_raw() {
        let mut engine = DragEngine::new();
        engine.begin(single(0.0));
        engine.drag_to(P, Point::new(101.5, 100.0), Modifiers::NONE);
        assert_eq!(engine.flush(P).unwrap().center, Point::new(241.5, 140.0));
    }

    #[test]
    fn test_coalescing_keeps_last_move() {
        let mut engine = DragEngine::new();
        engine.begin(single(0.0));
        for x in [105.0, 110.0, 120.0] {
            engine.drag_to(P, Point::new(x, 100.0), Modifiers::NONE);
        }
        assert!(engine.has_pending());
        assert_eq!(engine.session(P).unwrap().pending(), Some(Point::new(260.0, 140.0)));
        let updates = engine.take_pending();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].center, Point::new(260.0, 140.0));
        assert!(!engine.has_pending());
        assert!(engine.take_pending().is_empty());
    }

    #[test]
    fn test_group_drag_applies_raw_delta() {
        let mut engine = DragEngine::new();
        let origins = vec![
            (EntityId::from("a"), Point::new(240.0, 140.0)),
            (EntityId::from("b"), Point::new(460.0, 220.0)),
        ];
        engine.begin(DragSession::group(
            P,
            EntityId::from("a"),
            Point::new(240.0, 140.0),
            origins,
            HistorySnapshot::default(),
        ));
        let step = engine.drag_to(P, Point::new(243.0, 137.0), Modifiers::NONE).unwrap();
        match step {
            DragStep::Group { delta, updates } => {
                assert_eq!(delta, Vec2::new(3.0, -3.0));
                assert_eq!(updates[0].center, Point::new(243.0, 137.0));
                assert_eq!(updates[1].center, Point::new(463.0, 217.0));
            }
            other => panic!("expected group step, got {other:?}"),
        }
        assert!(!engine.has_pending());
    }

    #[test]
    fn test_zero_delta_move_is_not_movement() {
        let mut engine = DragEngine::new();
        engine.begin(single(10.0));
        engine.drag_to(P, Point::new(100.0, 100.0), Modifiers::NONE);
        assert!(!engine.session(P).unwrap().moved);
    }

    #[test]
    fn test_begin_returns_stale_session() {
        let mut engine = DragEngine::new();
        engine.begin(single(10.0));
        let stale = engine.begin(single(10.0));
        assert!(stale.is_some());
        assert_eq!(engine.drain().len(), 1);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_move_without_session() {
        let mut engine = DragEngine::new();
        assert!(engine.drag_to(P, Point::ZERO, Modifiers::NONE).is_none());
        assert!(engine.finish(P).is_none());
    }
}
