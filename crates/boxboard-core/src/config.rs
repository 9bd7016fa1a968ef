//! Editor configuration.

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::input::PrimaryModifier;
use crate::store::{DEFAULT_ENTITY_SIZE, DUPLICATE_OFFSET};
use crate::trace::DEFAULT_TRACE_CAPACITY;
use crate::viewport::Viewport;
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default grid size for single-entity drags.
pub const DEFAULT_SNAP_SIZE: f64 = 10.0;
/// Zoom step for toolbar, keyboard and wheel, in percent.
pub const DEFAULT_ZOOM_STEP_PERCENT: f64 = 10.0;
/// Zoom step when Alt or Shift is held.
pub const DEFAULT_FINE_ZOOM_STEP_PERCENT: f64 = 5.0;

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid base viewport: {0}")]
    InvalidViewport(String),
    #[error("Invalid snap size: {0}")]
    InvalidSnapSize(f64),
    #[error("Invalid entity size: {0}x{1}")]
    InvalidEntitySize(f64, f64),
    #[error("History limit must be at least 1")]
    InvalidHistoryLimit,
    #[error("Trace capacity must be at least 1")]
    InvalidTraceCapacity,
    #[error("Invalid zoom step: {0}")]
    InvalidZoomStep(f64),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Tunables for an [`Editor`](crate::Editor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Viewport shown at 100% zoom and restored by reset.
    pub base_viewport: Viewport,
    /// Grid size for single drags; `0` turns snapping off.
    pub snap_size: f64,
    pub snap_enabled: bool,
    pub default_entity_size: Size,
    pub duplicate_offset: Vec2,
    /// `None` keeps every undo step.
    pub history_limit: Option<usize>,
    pub trace_capacity: usize,
    pub trace_enabled: bool,
    pub zoom_step_percent: f64,
    pub fine_zoom_step_percent: f64,
    pub primary_modifier: PrimaryModifier,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_viewport: Viewport::default(),
            snap_size: DEFAULT_SNAP_SIZE,
            snap_enabled: true,
            default_entity_size: DEFAULT_ENTITY_SIZE,
            duplicate_offset: DUPLICATE_OFFSET,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            trace_capacity: DEFAULT_TRACE_CAPACITY,
            trace_enabled: false,
            zoom_step_percent: DEFAULT_ZOOM_STEP_PERCENT,
            fine_zoom_step_percent: DEFAULT_FINE_ZOOM_STEP_PERCENT,
            primary_modifier: PrimaryModifier::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field for values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = self.base_viewport;
        let finite = [v.x, v.y, v.w, v.h].iter().all(|c| c.is_finite());
        if !finite || v.w <= 0.0 || v.h <= 0.0 {
            return Err(ConfigError::InvalidViewport(format!(
                "{} {} {} {}",
                v.x, v.y, v.w, v.h
            )));
        }
        if !self.snap_size.is_finite() || self.snap_size < 0.0 {
            return Err(ConfigError::InvalidSnapSize(self.snap_size));
        }
        let size = self.default_entity_size;
        if !size.is_finite() || size.width <= 0.0 || size.height <= 0.0 {
            return Err(ConfigError::InvalidEntitySize(size.width, size.height));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::InvalidHistoryLimit);
        }
        if self.trace_capacity == 0 {
            return Err(ConfigError::InvalidTraceCapacity);
        }
        for step in [self.zoom_step_percent, self.fine_zoom_step_percent] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::InvalidZoomStep(step));
            }
        }
        Ok(())
    }

    /// Zoom step for the given fine-adjust state.
    pub fn zoom_step(&self, fine: bool) -> f64 {
        if fine {
            self.fine_zoom_step_percent
        } else {
            self.zoom_step_percent
        }
    }
}
