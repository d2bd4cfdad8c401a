//! Rounded outline construction
//!
//! One routine builds every cover outline: panel clips, the wrap clip, the
//! cut line and the safe area. Each surface consumes the resulting
//! [`BezPath`] in its own way.

use kurbo::{BezPath, PathEl, Point, Rect};

use super::corners::CornerSet;
use super::shrink;

/// Trace a rectangle whose `corners` are rounded by `radius`.
///
/// The walk runs clockwise from just after the top-left corner. A rounded
/// corner stops the incoming edge `radius` short of the true corner and joins
/// the next edge with a quadratic curve whose control point is the corner; a
/// square corner runs the edge all the way into it. The radius is capped at
/// half the shorter side.
pub fn trace_outline(path: &mut BezPath, rect: Rect, radius: f64, corners: CornerSet) {
    let r = radius.max(0.0).min(rect.width() / 2.0).min(rect.height() / 2.0);
    let pick = |rounded: bool| if rounded { r } else { 0.0 };
    let tl = pick(corners.top_left);
    let tr = pick(corners.top_right);
    let br = pick(corners.bottom_right);
    let bl = pick(corners.bottom_left);

    let (left, top, right, bottom) = (rect.x0, rect.y0, rect.x1, rect.y1);

    path.move_to(Point::new(left + tl, top));

    path.line_to(Point::new(right - tr, top));
    if corners.top_right && r > 0.0 {
        path.quad_to(Point::new(right, top), Point::new(right, top + tr));
    }

    path.line_to(Point::new(right, bottom - br));
    if corners.bottom_right && r > 0.0 {
        path.quad_to(Point::new(right, bottom), Point::new(right - br, bottom));
    }

    path.line_to(Point::new(left + bl, bottom));
    if corners.bottom_left && r > 0.0 {
        path.quad_to(Point::new(left, bottom), Point::new(left, bottom - bl));
    }

    if corners.top_left && r > 0.0 {
        path.line_to(Point::new(left, top + tl));
        path.quad_to(Point::new(left, top), Point::new(left + tl, top));
    }

    path.close_path();
}

/// Number of curve segments in `path`
pub fn curve_count(path: &BezPath) -> usize {
    path.elements()
        .iter()
        .filter(|el| matches!(el, PathEl::QuadTo(..) | PathEl::CurveTo(..)))
        .count()
}

/// A rounded-corner rectangle outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub rect: Rect,
    pub radius: f64,
    pub corners: CornerSet,
}

impl Outline {
    pub fn new(rect: Rect, radius: f64, corners: CornerSet) -> Self {
        Self {
            rect,
            radius,
            corners,
        }
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        trace_outline(&mut path, self.rect, self.radius, self.corners);
        path
    }

    /// Shrink by `amount` on every side, keeping the curves concentric
    pub fn inset(&self, amount: f64) -> Self {
        Self {
            rect: shrink(self.rect, amount),
            radius: (self.radius - amount).max(0.0),
            corners: self.corners,
        }
    }

    /// Inset by half of `stroke_width` so a centered stroke stays inside the
    /// original bounds
    pub fn for_stroke(&self, stroke_width: f64) -> Self {
        Self {
            rect: shrink(self.rect, stroke_width / 2.0),
            radius: self.radius,
            corners: self.corners,
        }
    }
}
