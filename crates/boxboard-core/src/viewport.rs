//! Viewport module for pan and stepped zoom.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Lowest reachable zoom level, in percent.
pub const MIN_ZOOM_PERCENT: f64 = 10.0;
/// Highest reachable zoom level, in percent.
pub const MAX_ZOOM_PERCENT: f64 = 400.0;
/// Two zoom percentages closer than this are the same level.
const ZOOM_EPSILON: f64 = 1e-3;

/// The visible canvas-space rectangle: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1200.0, 800.0)
    }
}

impl Viewport {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// The viewport as a kurbo Rect.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    /// Centre of the visible area in canvas space.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }
}

/// Direction of a zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    fn step(self) -> f64 {
        match self {
            ZoomDirection::In => 1.0,
            ZoomDirection::Out => -1.0,
        }
    }
}

/// An in-progress pan drag.
#[derive(Debug, Clone, Copy)]
struct PanGesture {
    start_device: Point,
    start_viewport: Viewport,
    last_device: Point,
}

/// Owns the viewport and applies pan/zoom to it.
///
/// Zoom is expressed as a percentage of the base viewport width and moves in
/// whole steps, so repeated zooming never drifts off the reachable levels.
#[derive(Debug, Clone)]
pub struct ViewportController {
    viewport: Viewport,
    base: Viewport,
    pan: Option<PanGesture>,
}

impl ViewportController {
    /// Create a controller showing `base`. `base` must have positive extent.
    pub fn new(base: Viewport) -> Self {
        Self {
            viewport: base,
            base,
            pan: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn base(&self) -> Viewport {
        self.base
    }

    /// Current zoom in percent of the base width.
    pub fn zoom_percent(&self) -> f64 {
        100.0 * self.base.w / self.viewport.w
    }

    /// Zoom percent rounded for display.
    pub fn zoom_percent_rounded(&self) -> i64 {
        self.zoom_percent().round() as i64
    }

    /// Pan by a device-space delta. Content follows the pointer, so the
    /// viewport origin moves the opposite way.
    pub fn pan(&mut self, delta_device: Vec2, surface_size: Size) {
        if surface_size.width <= 0.0 || surface_size.height <= 0.0 || !surface_size.is_finite() {
            return;
        }
        let scale_x = self.viewport.w / surface_size.width;
        let scale_y = self.viewport.h / surface_size.height;
        self.viewport.x -= delta_device.x * scale_x;
        self.viewport.y -= delta_device.y * scale_y;
    }

    /// Zoom one step in `direction`, keeping canvas point `center` fixed.
    ///
    /// Returns `false` when the zoom level would not change (already at a
    /// clamp boundary).
    pub fn zoom_step_at(
        &mut self,
        direction: ZoomDirection,
        center: Point,
        step_percent: f64,
    ) -> bool {
        if step_percent.is_nan() || step_percent <= 0.0 {
            return false;
        }

        let current = self.zoom_percent();
        let current_step = (current / step_percent).round();
        let target = ((current_step + direction.step()) * step_percent)
            .clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT);
        if (target - current).abs() < ZOOM_EPSILON {
            return false;
        }

        let factor = target / 100.0;
        let old = self.viewport;
        let new_w = self.base.w / factor;
        let new_h = self.base.h / factor;
        self.viewport = Viewport {
            x: center.x - (center.x - old.x) * (new_w / old.w),
            y: center.y - (center.y - old.y) * (new_h / old.h),
            w: new_w,
            h: new_h,
        };
        log::debug!(
            "Zoom {:.1}% -> {:.1}% at ({:.1}, {:.1})",
            current,
            target,
            center.x,
            center.y
        );
        self.reanchor_pan();
        true
    }

    /// Restore the base viewport exactly.
    pub fn reset(&mut self) {
        self.viewport = self.base;
        self.reanchor_pan();
    }

    /// Start a pan drag at a device position.
    pub fn begin_pan(&mut self, device: Point) {
        self.pan = Some(PanGesture {
            start_device: device,
            start_viewport: self.viewport,
            last_device: device,
        });
    }

    /// Continue a pan drag. The offset is always measured from the gesture
    /// start, so dropped move events do not accumulate error.
    pub fn pan_to(&mut self, device: Point, surface_size: Size) -> bool {
        let Some(gesture) = self.pan.as_mut() else {
            return false;
        };
        gesture.last_device = device;
        let (start_device, start_viewport) = (gesture.start_device, gesture.start_viewport);
        self.viewport = start_viewport;
        self.pan(device - start_device, surface_size);
        true
    }

    /// A zoom or reset during a pan becomes the new gesture origin.
    fn reanchor_pan(&mut self) {
        if let Some(gesture) = self.pan.as_mut() {
            gesture.start_device = gesture.last_device;
            gesture.start_viewport = self.viewport;
        }
    }

    /// Finish a pan drag, keeping the current viewport.
    pub fn end_pan(&mut self) -> bool {
        self.pan.take().is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
