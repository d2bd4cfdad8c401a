//! Geometry and clip engine
//!
//! Rounded die-cut outlines and the transforms that place objects, built on
//! `kurbo`. All geometry is y-down: the origin is the top-left corner and y
//! grows toward the bottom edge, the same frame the document model uses.

mod corners;
mod path;

pub use corners::{CornerSet, OutlineRole};
pub use kurbo::{Affine, BezPath, PathEl, Point, Rect};
pub use path::{Outline, curve_count, trace_outline};

use crate::constants::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::model::Document;

/// Rectangle with its top-left corner at `(x, y)`
pub fn rect_xywh(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(x, y, x + width, y + height)
}

/// Shrink `rect` by `amount` on every side (negative grows). The size never
/// goes below zero.
pub fn shrink(rect: Rect, amount: f64) -> Rect {
    let width = (rect.width() - amount * 2.0).max(0.0);
    let height = (rect.height() - amount * 2.0).max(0.0);
    rect_xywh(rect.x0 + amount, rect.y0 + amount, width, height)
}

/// Placement of an object's local frame: rotate clockwise (on screen) about
/// the local origin, then move the origin to `anchor`
pub fn placement(anchor: Point, rotation_degrees: f64) -> Affine {
    Affine::translate(anchor.to_vec2()) * Affine::rotate(rotation_degrees.to_radians())
}

/// Cut outline of `role` in inches, with the document's corner radius.
///
/// A panel outline starts at the origin; the wrap outline spans the full
/// wrap width.
pub fn cover_outline(document: &Document, role: OutlineRole) -> Outline {
    let width = match role {
        OutlineRole::Panel(_) => PANEL_WIDTH,
        OutlineRole::Wrap => document.wrap_width(),
    };
    Outline::new(
        rect_xywh(0.0, 0.0, width, PANEL_HEIGHT),
        document.corner_radius(),
        CornerSet::for_role(role),
    )
}
