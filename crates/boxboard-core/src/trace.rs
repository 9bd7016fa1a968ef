//! Bounded ring buffer of drag lifecycle events.

use crate::input::PointerId;
use crate::store::EntityId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Default number of events retained.
pub const DEFAULT_TRACE_CAPACITY: usize = 300;

/// Drag lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Start,
    Move,
    End,
    Cancel,
    /// Pointer capture was taken away by the platform.
    Lost,
}

/// One recorded drag event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Milliseconds since the trace clock started.
    pub timestamp_ms: f64,
    pub kind: TraceKind,
    pub entity_id: Option<EntityId>,
    pub pointer_id: PointerId,
    pub device: Option<Point>,
    pub canvas: Option<Point>,
    pub delta: Option<Vec2>,
    /// Whether a drag session was active when the event was recorded.
    pub dragging: bool,
}

impl TraceEvent {
    pub fn new(kind: TraceKind, pointer_id: PointerId) -> Self {
        Self {
            timestamp_ms: 0.0,
            kind,
            entity_id: None,
            pointer_id,
            device: None,
            canvas: None,
            delta: None,
            dragging: false,
        }
    }

    pub fn at(mut self, timestamp_ms: f64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn entity(mut self, id: Option<EntityId>) -> Self {
        self.entity_id = id;
        self
    }

    pub fn points(mut self, device: Point, canvas: Point) -> Self {
        self.device = Some(device);
        self.canvas = Some(canvas);
        self
    }

    pub fn delta(mut self, delta: Vec2) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }
}

/// Keeps the most recent `capacity` events; older ones are evicted silently.
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    events: VecDeque<TraceEvent>,
    capacity: usize,
}

impl TraceBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_TRACE_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, event: TraceEvent) {
        if self.capacity == 0 {
            return;
        }
        while self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Events oldest first.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = &TraceEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&TraceEvent> {
        self.events.back()
    }

    /// The newest `n` events, newest first.
    pub fn recent(&self, n: usize) -> Vec<&TraceEvent> {
        self.events.iter().rev().take(n).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_CAPACITY)
    }
}

/// Monotonic millisecond clock for trace timestamps.
#[derive(Debug, Clone, Copy)]
pub struct TraceClock {
    origin: Instant,
}

impl TraceClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for TraceClock {
    fn default() -> Self {
        Self::new()
    }
}
