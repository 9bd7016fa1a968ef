//! Box entities and the ordered store that owns them.

use crate::geometry::rects_intersect;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default extent of a newly added box.
pub const DEFAULT_ENTITY_SIZE: Size = Size::new(120.0, 80.0);
/// Offset applied to a duplicate relative to its source.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Opaque, unique entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A labelled box on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Centre in canvas space.
    pub center: Point,
    /// Extent, fixed at creation.
    pub size: Size,
    pub label: String,
}

impl Entity {
    pub fn new(
        id: impl Into<EntityId>,
        center: Point,
        size: Size,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            center,
            size,
            label: label.into(),
        }
    }

    /// Axis-aligned bounds in canvas space.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Check if a canvas point lies on the box (edges included).
    pub fn hit_test(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }
}

/// Ordered collection of entities, back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// The three-box starter document.
    pub fn sample() -> Self {
        Self::from_entities(vec![
            Entity::new("a", Point::new(240.0, 140.0), Size::new(120.0, 80.0), "Box A"),
            Entity::new("b", Point::new(460.0, 220.0), Size::new(140.0, 90.0), "Box B"),
            Entity::new("c", Point::new(360.0, 360.0), Size::new(100.0, 70.0), "Box C"),
        ])
    }

    /// Append an entity on top.
    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| &e.id == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Move an entity's centre. Returns false for unknown ids.
    pub fn set_center(&mut self, id: &EntityId, center: Point) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.center = center;
                true
            }
            None => false,
        }
    }

    /// Remove every entity whose id is listed. Unknown ids are skipped.
    /// Returns the number removed.
    pub fn remove_all(&mut self, ids: &[EntityId]) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !ids.contains(&e.id));
        before - self.entities.len()
    }

    /// Replace the whole collection (history restore).
    pub fn replace(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.entities.iter().map(|e| &e.id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Label for the next auto-numbered box.
    pub fn next_label(&self) -> String {
        format!("Box {}", self.entities.len() + 1)
    }

    /// Serialize the store to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a store from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Topmost entity under a canvas point.
    pub fn hit_test(&self, point: Point) -> Option<&EntityId> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.hit_test(point))
            .map(|e| &e.id)
    }

    /// Entities whose bounds overlap `rect`, in store order.
    pub fn ids_in_rect(&self, rect: Rect) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| rects_intersect(rect, e.bounds()))
            .map(|e| e.id.clone())
            .collect()
    }
}
