//! Coordinate conversion and rectangle helpers.
//!
//! Canvas space is the plane entities live on; device space is whatever the
//! input source reports (window pixels). The rendering surface describes the
//! canvas→device mapping as an [`Affine`]; input goes through its inverse.

use crate::viewport::Viewport;
use kurbo::{Affine, Point, Rect};

/// Determinant magnitude below which a transform is treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Convert a device-space point to canvas space.
///
/// `screen_transform` maps canvas to device coordinates (an SVG screen CTM).
/// When it is missing, singular, or produces non-finite output the device
/// point is returned unchanged, so the interaction loop keeps running in a
/// degraded identity mapping instead of propagating NaN.
pub fn to_canvas_point(device: Point, screen_transform: Option<Affine>) -> Point {
    let Some(ctm) = screen_transform else {
        return device;
    };

    let finite = ctm.as_coeffs().iter().all(|c| c.is_finite());
    if !finite || ctm.determinant().abs() < SINGULAR_EPSILON {
        log::warn!("Screen transform unusable ({:?}), using identity mapping", ctm);
        return device;
    }

    let canvas = ctm.inverse() * device;
    if canvas.x.is_finite() && canvas.y.is_finite() {
        canvas
    } else {
        log::warn!("Non-finite canvas point for device {:?}, using identity mapping", device);
        device
    }
}

/// Convert a canvas-space point to device space. Identity without a transform.
pub fn to_device_point(canvas: Point, screen_transform: Option<Affine>) -> Point {
    match screen_transform {
        Some(ctm) => ctm * canvas,
        None => canvas,
    }
}

/// Canvas→device transform for a viewport shown in `surface_bounds`.
///
/// Matches SVG `viewBox` with the default `preserveAspectRatio="xMidYMid meet"`:
/// uniform scale that fits the whole viewport, centred on the free axis.
/// Returns `None` when the surface has no area.
pub fn viewbox_transform(viewport: &Viewport, surface_bounds: Rect) -> Option<Affine> {
    let sw = surface_bounds.width();
    let sh = surface_bounds.height();
    if !(sw > 0.0 && sh > 0.0 && viewport.w > 0.0 && viewport.h > 0.0) {
        return None;
    }

    let scale = (sw / viewport.w).min(sh / viewport.h);
    let tx = surface_bounds.x0 + (sw - viewport.w * scale) / 2.0 - viewport.x * scale;
    let ty = surface_bounds.y0 + (sh - viewport.h * scale) / 2.0 - viewport.y * scale;
    Some(Affine::new([scale, 0.0, 0.0, scale, tx, ty]))
}

/// Normalize two arbitrary corners into a rectangle with non-negative extents.
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Axis-aligned overlap test.
///
/// Rectangles that only share an edge do not intersect, so a marquee that
/// stops exactly at a box boundary does not pick it up.
pub fn rects_intersect(r1: Rect, r2: Rect) -> bool {
    r1.x0 < r2.x1 && r2.x0 < r1.x1 && r1.y0 < r2.y1 && r2.y0 < r1.y1
}
