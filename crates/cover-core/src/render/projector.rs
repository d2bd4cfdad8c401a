//! Projection of a document into device-space draw instructions
//!
//! Objects keep their z-order: a panel's objects are emitted in model order,
//! and in wrap mode the back panel's objects come before the front's.

use crate::constants::{
    CENTERLINE_COLOR, CENTERLINE_DASH, CUT_LINE_COLOR, CUT_LINE_DASH, CUT_LINE_WIDTH,
    FOLD_LINE_COLOR, FOLD_LINE_DASH, GUIDE_LINE_WIDTH, PANEL_HEIGHT, PANEL_OUTLINE_COLOR,
    PANEL_OUTLINE_WIDTH, PANEL_WIDTH, SAFE_AREA_COLOR, SAFE_AREA_DASH,
};
use crate::geometry::{CornerSet, Outline, OutlineRole, Point, Rect, cover_outline, rect_xywh};
use crate::model::{CanvasObject, Document, ObjectKind, Settings, Side, TextAlign};
use crate::units::get_fold_line_positions;

use super::draw::*;
use super::fit::resolve_fit;
use super::viewport::{PresentationMode, Viewport};

/// Optional guides; the cut line is always drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuideSet {
    pub fold_lines: bool,
    pub safe_area: bool,
    pub centerline: bool,
}

impl GuideSet {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fold_lines: settings.show_fold_lines,
            safe_area: settings.show_safe_area,
            centerline: settings.show_centerline,
        }
    }
}

/// Produce the ordered draw list for `mode` at `viewport`
pub fn project(document: &Document, viewport: &Viewport, mode: PresentationMode) -> DrawList {
    let (width, height) = mode.size_inches(document);
    let clip = device_outline(&cover_outline(document, mode.outline_role()), viewport);
    let mut ops = Vec::new();

    match mode {
        PresentationMode::Panel(side) => {
            ops.push(DrawOp::Background(BackgroundOp {
                side,
                outline: clip,
                color: document.panel(side).background_color.clone(),
            }));
            project_panel(&mut ops, document, side, viewport, mode);
            ops.push(DrawOp::Guide(GuideOp {
                kind: GuideKind::PanelOutline,
                shape: GuideShape::Outline(clip),
                color: PANEL_OUTLINE_COLOR,
                width: PANEL_OUTLINE_WIDTH,
                dash: Vec::new(),
            }));
        }
        PresentationMode::Wrap => {
            ops.extend(wrap_backgrounds(document, viewport).into_iter().map(DrawOp::Background));
            if let Some(op) = project_wrap_image(document, viewport) {
                ops.push(DrawOp::WrapImage(op));
            }
            project_panel(&mut ops, document, Side::Back, viewport, mode);
            project_panel(&mut ops, document, Side::Front, viewport, mode);
            ops.extend(
                project_guides(document, viewport, GuideSet::from_settings(&document.settings))
                    .into_iter()
                    .map(DrawOp::Guide),
            );
        }
    }

    DrawList {
        width: viewport.length(width),
        height: viewport.length(height),
        clip,
        ops,
    }
}

/// Wrap guides in draw order: fold lines, safe area, centerline, then the
/// cut line on top
pub fn project_guides(document: &Document, viewport: &Viewport, guides: GuideSet) -> Vec<GuideOp> {
    let wrap_width = document.wrap_width();
    let mut ops = Vec::new();

    let vertical = |x: f64| GuideShape::Line {
        from: viewport.to_device(Point::new(x, 0.0)),
        to: viewport.to_device(Point::new(x, PANEL_HEIGHT)),
    };

    if guides.fold_lines {
        let folds = get_fold_line_positions(document.settings.spine_width);
        for x in [folds.back_fold, folds.front_fold] {
            ops.push(GuideOp {
                kind: GuideKind::FoldLine,
                shape: vertical(x),
                color: FOLD_LINE_COLOR,
                width: GUIDE_LINE_WIDTH,
                dash: FOLD_LINE_DASH.to_vec(),
            });
        }
    }

    let wrap_outline = device_outline(&cover_outline(document, OutlineRole::Wrap), viewport);

    if guides.safe_area {
        let inset = viewport.length(document.settings.safe_area_inset);
        ops.push(GuideOp {
            kind: GuideKind::SafeArea,
            shape: GuideShape::Outline(wrap_outline.inset(inset)),
            color: SAFE_AREA_COLOR,
            width: GUIDE_LINE_WIDTH,
            dash: SAFE_AREA_DASH.to_vec(),
        });
    }

    if guides.centerline {
        ops.push(GuideOp {
            kind: GuideKind::Centerline,
            shape: vertical(wrap_width / 2.0),
            color: CENTERLINE_COLOR,
            width: GUIDE_LINE_WIDTH,
            dash: CENTERLINE_DASH.to_vec(),
        });
    }

    ops.push(GuideOp {
        kind: GuideKind::CutLine,
        shape: GuideShape::Outline(wrap_outline.for_stroke(CUT_LINE_WIDTH)),
        color: CUT_LINE_COLOR,
        width: CUT_LINE_WIDTH,
        dash: CUT_LINE_DASH.to_vec(),
    });

    ops
}

/// Panel backgrounds of the unfolded wrap. The back fill runs across the
/// spine; each fill rounds only its outer corners.
pub fn wrap_backgrounds(document: &Document, viewport: &Viewport) -> Vec<BackgroundOp> {
    let spine = document.settings.spine_width;
    let radius = viewport.length(document.corner_radius());
    let fill = |side: Side, rect: Rect, corners: CornerSet| BackgroundOp {
        side,
        outline: Outline::new(device_rect(rect, viewport), radius, corners),
        color: document.panel(side).background_color.clone(),
    };

    vec![
        fill(
            Side::Back,
            rect_xywh(0.0, 0.0, PANEL_WIDTH + spine, PANEL_HEIGHT),
            CornerSet::LEFT,
        ),
        fill(
            Side::Front,
            rect_xywh(PANEL_WIDTH + spine, 0.0, PANEL_WIDTH, PANEL_HEIGHT),
            CornerSet::RIGHT,
        ),
    ]
}

/// The wrap background image, when enabled and set
pub fn project_wrap_image(document: &Document, viewport: &Viewport) -> Option<ImageOp> {
    let wrap = &document.wrap_image;
    if !wrap.is_drawable() {
        return None;
    }

    let placement = resolve_fit(
        wrap.fit,
        wrap.size.width,
        wrap.size.height,
        wrap.original_width,
        wrap.original_height,
    );

    Some(ImageOp {
        object: ObjectFrame {
            id: String::new(),
            side: None,
            origin: viewport.to_device(Point::new(wrap.position.x, wrap.position.y)),
            rotation: 0.0,
            opacity: wrap.opacity,
        },
        src: wrap.src.clone(),
        width: viewport.length(wrap.size.width),
        height: viewport.length(wrap.size.height),
        placement: placement.scaled(viewport.scale),
        clip_to_outline: true,
    })
}

fn project_panel(
    ops: &mut Vec<DrawOp>,
    document: &Document,
    side: Side,
    viewport: &Viewport,
    mode: PresentationMode,
) {
    let offset = mode.panel_offset(document, side);
    ops.extend(
        document
            .panel(side)
            .objects
            .iter()
            .filter_map(|obj| project_object(obj, side, offset, viewport)),
    );
}

/// Draw op for one object, or `None` when it is hidden
pub fn project_object(
    obj: &CanvasObject,
    side: Side,
    offset_x: f64,
    viewport: &Viewport,
) -> Option<DrawOp> {
    if !obj.visible {
        return None;
    }

    let object = ObjectFrame {
        id: obj.id.clone(),
        side: Some(side),
        origin: viewport.to_device(Point::new(obj.position.x + offset_x, obj.position.y)),
        rotation: obj.rotation,
        opacity: obj.opacity,
    };

    let op = match &obj.kind {
        ObjectKind::Text(text) => {
            let font_size = viewport.point_size(text.font_size);
            let box_width = viewport.length(text.width);
            let anchor_x = match text.text_align {
                TextAlign::Left => 0.0,
                TextAlign::Center => box_width / 2.0,
                TextAlign::Right => box_width,
            };
            let advance = font_size * text.line_height;
            let lines = text
                .content
                .split('\n')
                .enumerate()
                .map(|(i, line)| TextLine {
                    text: line.to_string(),
                    offset: Point::new(anchor_x, i as f64 * advance),
                })
                .collect();

            DrawOp::Text(TextOp {
                object,
                lines,
                align: text.text_align,
                box_width,
                font_family: text.font_family.clone(),
                font_weight: text.font_weight,
                font_size,
                font_size_pt: text.font_size,
                letter_spacing: text.letter_spacing * font_size,
                line_height: text.line_height,
                fill: text.fill.clone(),
                stroke: text.stroke.clone(),
                stroke_width: text.stroke_width.map(|w| viewport.point_size(w)),
            })
        }
        ObjectKind::Image(image) => {
            let placement = resolve_fit(
                image.fit,
                image.size.width,
                image.size.height,
                image.original_width,
                image.original_height,
            );
            DrawOp::Image(ImageOp {
                object,
                src: image.src.clone(),
                width: viewport.length(image.size.width),
                height: viewport.length(image.size.height),
                placement: placement.scaled(viewport.scale),
                clip_to_outline: image.crop_to_corners,
            })
        }
        ObjectKind::Shape(shape) => DrawOp::Shape(ShapeOp {
            object,
            shape_type: shape.shape_type,
            width: viewport.length(shape.size.width),
            height: viewport.length(shape.size.height),
            fill: shape.fill.clone(),
            stroke: shape.stroke.clone(),
            stroke_width: viewport.point_size(shape.stroke_width),
            corner_radius: viewport.length(shape.corner_radius.unwrap_or(0.0)),
        }),
    };

    Some(op)
}

fn device_rect(rect: Rect, viewport: &Viewport) -> Rect {
    let origin = viewport.to_device(rect.origin());
    rect_xywh(
        origin.x,
        origin.y,
        viewport.length(rect.width()),
        viewport.length(rect.height()),
    )
}

fn device_outline(outline: &Outline, viewport: &Viewport) -> Outline {
    Outline::new(
        device_rect(outline.rect, viewport),
        viewport.length(outline.radius),
        outline.corners,
    )
}
