//! Hit-testing and gesture results for the interactive panel surface
//!
//! Points arrive in device units of a panel-mode [`Viewport`]. Gestures that
//! end on an object turn into `UPDATE_OBJECT` actions.

use crate::geometry::{Point, Rect, placement, rect_xywh};
use crate::model::{
    Action, CanvasObject, Document, ObjectKind, ObjectPatch, Position, Side, Size,
};
use crate::units::points_to_inches;

use super::viewport::Viewport;

/// Local bounds of an object in inches, relative to its anchor
pub fn object_bounds(obj: &CanvasObject) -> Rect {
    match &obj.kind {
        ObjectKind::Text(text) => {
            let lines = text.content.split('\n').count() as f64;
            let height = lines * points_to_inches(text.font_size) * text.line_height;
            rect_xywh(0.0, 0.0, text.width, height)
        }
        ObjectKind::Image(image) => rect_xywh(0.0, 0.0, image.size.width, image.size.height),
        ObjectKind::Shape(shape) => rect_xywh(0.0, 0.0, shape.size.width, shape.size.height),
    }
}

/// Topmost visible object on `side` under `point`. Locked objects can still
/// be hit (and so selected).
pub fn hit_test(document: &Document, side: Side, viewport: &Viewport, point: Point) -> Option<String> {
    let p = viewport.to_inches(point);
    document
        .panel(side)
        .objects
        .iter()
        .rev()
        .filter(|obj| obj.visible)
        .find(|obj| {
            let local = placement(Point::new(obj.position.x, obj.position.y), obj.rotation)
                .inverse()
                * p;
            object_bounds(obj).contains(local)
        })
        .map(|obj| obj.id.clone())
}

fn movable<'a>(document: &'a Document, side: Side, id: &str) -> Option<&'a CanvasObject> {
    document.panel(side).find(id).filter(|obj| !obj.locked)
}

/// Drop an object with its anchor at device point `anchor`
pub fn drag_end(
    document: &Document,
    side: Side,
    id: &str,
    viewport: &Viewport,
    anchor: Point,
) -> Option<Action> {
    movable(document, side, id)?;
    let p = viewport.to_inches(anchor);

    Some(Action::UpdateObject {
        side,
        id: id.to_string(),
        updates: ObjectPatch {
            position: Some(Position::new(p.x, p.y)),
            ..ObjectPatch::default()
        },
    })
}

/// Final state of a resize/rotate handle gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformGesture {
    /// New anchor in device units
    pub anchor: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees clockwise
    pub rotation: f64,
}

/// Fold a transform gesture into the object's geometry. Text only changes its
/// box width; images and shapes change their size.
pub fn transform_end(
    document: &Document,
    side: Side,
    id: &str,
    viewport: &Viewport,
    gesture: TransformGesture,
) -> Option<Action> {
    let obj = movable(document, side, id)?;
    let p = viewport.to_inches(gesture.anchor);

    let mut updates = ObjectPatch {
        position: Some(Position::new(p.x, p.y)),
        rotation: Some(gesture.rotation),
        ..ObjectPatch::default()
    };

    match &obj.kind {
        ObjectKind::Text(text) => updates.width = Some(text.width * gesture.scale_x),
        ObjectKind::Image(image) => {
            updates.size = Some(scaled(image.size, &gesture));
        }
        ObjectKind::Shape(shape) => {
            updates.size = Some(scaled(shape.size, &gesture));
        }
    }

    Some(Action::UpdateObject {
        side,
        id: id.to_string(),
        updates,
    })
}

fn scaled(size: Size, gesture: &TransformGesture) -> Size {
    Size::new(size.width * gesture.scale_x, size.height * gesture.scale_y)
}
