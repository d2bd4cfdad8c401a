//! Raster composite of backgrounds, the wrap image, images and shapes
//!
//! Runs on a blocking thread. The canvas covers the wrap only (no bleed);
//! pixels outside the die-cut outline stay transparent.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use kurbo::{Ellipse, Shape};
use log::debug;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pattern, Pixmap, SpreadMode,
    Stroke, Transform,
};

use crate::constants::PATH_TOLERANCE;
use crate::geometry::{Affine, BezPath, CornerSet, Outline, PathEl, Point, rect_xywh};
use crate::model::ShapeType;
use crate::render::{DrawList, DrawOp, ImageOp, ShapeOp};
use crate::types::{CoverError, Result};

use super::ExportPhase;
use super::color::parse_color;
use super::decode::DecodedImage;

/// Composite the non-text ops of `list`, in order, onto a transparent canvas
pub fn composite(list: &DrawList, images: &HashMap<String, DecodedImage>) -> Result<RgbaImage> {
    let width = list.width.round().max(1.0) as u32;
    let height = list.height.round().max(1.0) as u32;
    let mut canvas = Pixmap::new(width, height)
        .ok_or_else(|| composite_failed(format!("cannot allocate a {}x{} canvas", width, height)))?;
    let clip = clip_mask(&list.clip, width, height)
        .ok_or_else(|| composite_failed("cannot build the die-cut mask".to_string()))?;

    let sources: HashMap<&str, Pixmap> = images
        .iter()
        .filter_map(|(src, decoded)| to_pixmap(&decoded.pixels).map(|p| (src.as_str(), p)))
        .collect();

    for op in &list.ops {
        match op {
            DrawOp::Background(background) => {
                let (Some(rgb), Some(path)) = (
                    color_or_skip(&background.color),
                    skia_path(&background.outline.to_path()),
                ) else {
                    continue;
                };
                let paint = solid_paint(rgb, 1.0);
                canvas.fill_path(
                    &path,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    Some(&clip),
                );
            }
            DrawOp::WrapImage(op) | DrawOp::Image(op) => {
                if let Some(source) = sources.get(op.src.as_str()) {
                    draw_image(&mut canvas, op, source, op.clip_to_outline.then_some(&clip));
                }
            }
            DrawOp::Shape(op) => draw_shape(&mut canvas, op, &clip),
            DrawOp::Text(_) | DrawOp::Guide(_) => {}
        }
    }

    let mut out = RgbaImage::new(width, height);
    for (dst, px) in out.pixels_mut().zip(canvas.pixels()) {
        let c = px.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}

/// Anti-aliased coverage of `outline` on a `width` x `height` canvas
pub fn clip_mask(outline: &Outline, width: u32, height: u32) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    let path = skia_path(&outline.to_path())?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

fn composite_failed(message: String) -> CoverError {
    CoverError::Export {
        phase: ExportPhase::Composite,
        message,
    }
}

fn color_or_skip(color: &str) -> Option<[u8; 3]> {
    let rgb = parse_color(color);
    if rgb.is_none() {
        debug!("Skipping fill with unrecognized color {:?}", color);
    }
    rgb
}

fn solid_paint(rgb: [u8; 3], opacity: f64) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        ..Default::default()
    };
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    paint.set_color_rgba8(rgb[0], rgb[1], rgb[2], alpha);
    paint
}

fn skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

fn skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Premultiplied copy of a decoded image
fn to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Fill the op's destination rect with the cropped source, placed by the
/// object's transform
fn draw_image(canvas: &mut Pixmap, op: &ImageOp, source: &Pixmap, clip: Option<&Mask>) {
    let dest = op.placement.dest;
    let crop = op.placement.crop;
    if crop.width() <= 0.0 || crop.height() <= 0.0 {
        return;
    }
    let Some(rect) =
        tiny_skia::Rect::from_ltrb(dest.x0 as f32, dest.y0 as f32, dest.x1 as f32, dest.y1 as f32)
    else {
        return;
    };

    let (sw, sh) = (source.width() as f64, source.height() as f64);
    let source_to_local = Transform::from_translate(dest.x0 as f32, dest.y0 as f32)
        .pre_scale(
            (dest.width() / (crop.width() * sw)) as f32,
            (dest.height() / (crop.height() * sh)) as f32,
        )
        .pre_translate(-(crop.x0 * sw) as f32, -(crop.y0 * sh) as f32);

    let paint = Paint {
        shader: Pattern::new(
            source.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            op.object.opacity.clamp(0.0, 1.0) as f32,
            source_to_local,
        ),
        anti_alias: true,
        ..Default::default()
    };
    canvas.fill_rect(rect, &paint, skia_transform(op.object.transform()), clip);
}

fn draw_shape(canvas: &mut Pixmap, op: &ShapeOp, clip: &Mask) {
    let transform = skia_transform(op.object.transform());
    let local = rect_xywh(0.0, 0.0, op.width, op.height);
    let stroke = Stroke {
        width: op.stroke_width as f32,
        ..Default::default()
    };

    let mut paint_with = |path: &tiny_skia::Path, color: &str, stroked: bool| {
        let Some(rgb) = color_or_skip(color) else {
            return;
        };
        let paint = solid_paint(rgb, op.object.opacity);
        if stroked {
            canvas.stroke_path(path, &paint, &stroke, transform, Some(clip));
        } else {
            canvas.fill_path(path, &paint, FillRule::Winding, transform, Some(clip));
        }
    };

    match op.shape_type {
        ShapeType::Line => {
            let mut line = BezPath::new();
            line.move_to(Point::ZERO);
            line.line_to(Point::new(op.width, op.height));
            if let (Some(color), Some(path)) =
                (op.stroke.as_deref().or(op.fill.as_deref()), skia_path(&line))
            {
                if op.stroke_width > 0.0 {
                    paint_with(&path, color, true);
                }
            }
        }
        ShapeType::Rectangle | ShapeType::Ellipse => {
            let outline = if op.shape_type == ShapeType::Ellipse {
                Ellipse::from_rect(local).to_path(PATH_TOLERANCE)
            } else {
                Outline::new(local, op.corner_radius, CornerSet::ALL).to_path()
            };
            let Some(path) = skia_path(&outline) else {
                return;
            };
            if let Some(fill) = &op.fill {
                paint_with(&path, fill, false);
            }
            if let Some(color) = &op.stroke {
                if op.stroke_width > 0.0 {
                    paint_with(&path, color, true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ObjectFrame;

    fn square(fill: &str, opacity: f64) -> DrawList {
        DrawList {
            width: 40.0,
            height: 40.0,
            clip: Outline::new(rect_xywh(0.0, 0.0, 40.0, 40.0), 0.0, CornerSet::ALL),
            ops: vec![DrawOp::Shape(ShapeOp {
                object: ObjectFrame {
                    id: "s".to_string(),
                    side: None,
                    origin: Point::new(10.0, 10.0),
                    rotation: 0.0,
                    opacity,
                },
                shape_type: ShapeType::Rectangle,
                width: 20.0,
                height: 20.0,
                fill: Some(fill.to_string()),
                stroke: None,
                stroke_width: 0.0,
                corner_radius: 0.0,
            })],
        }
    }

    #[test]
    fn test_opaque_fill_keeps_its_color() {
        let out = composite(&square("#c83214", 1.0), &HashMap::new()).unwrap();
        assert_eq!(out.get_pixel(20, 20).0, [200, 50, 20, 255]);
        assert_eq!(out.get_pixel(5, 5).0[3], 0);
    }

    #[test]
    fn test_translucent_fill_over_transparent() {
        let out = composite(&square("#ffffff", 0.5), &HashMap::new()).unwrap();
        let alpha = out.get_pixel(20, 20).0[3];
        assert!((126..=129).contains(&alpha));
    }
}
