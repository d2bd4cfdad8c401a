//! Image fit resolution shared by every surface

use crate::constants::ORIGINAL_FIT_DPI;
use crate::geometry::{Rect, rect_xywh};
use crate::model::ImageFit;

/// Where an image lands inside its box, and which part of the source it shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// Destination rectangle relative to the box's top-left, in box units
    pub dest: Rect,
    /// Visible source region, normalized to `0.0..=1.0` of the source size
    pub crop: Rect,
}

impl ImagePlacement {
    fn full(dest: Rect) -> Self {
        Self {
            dest,
            crop: rect_xywh(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Same placement with the destination scaled (e.g. inches to pixels)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            dest: self.dest.scale_from_origin(factor),
            crop: self.crop,
        }
    }
}

/// Resolve `fit` for a `box_width` x `box_height` inch box showing a
/// `source_width` x `source_height` pixel image.
///
/// An image with unknown pixel dimensions is stretched.
pub fn resolve_fit(
    fit: ImageFit,
    box_width: f64,
    box_height: f64,
    source_width: u32,
    source_height: u32,
) -> ImagePlacement {
    let box_rect = rect_xywh(0.0, 0.0, box_width, box_height);
    if source_width == 0 || source_height == 0 || box_width <= 0.0 || box_height <= 0.0 {
        return ImagePlacement::full(box_rect);
    }

    let (sw, sh) = (source_width as f64, source_height as f64);
    let source_aspect = sw / sh;
    let box_aspect = box_width / box_height;

    match fit {
        ImageFit::Stretch => ImagePlacement::full(box_rect),
        ImageFit::Contain => {
            let scale = (box_width / sw).min(box_height / sh);
            let (w, h) = (sw * scale, sh * scale);
            ImagePlacement::full(rect_xywh(
                (box_width - w) / 2.0,
                (box_height - h) / 2.0,
                w,
                h,
            ))
        }
        ImageFit::Cover => {
            let crop = if source_aspect > box_aspect {
                let visible = box_aspect / source_aspect;
                rect_xywh((1.0 - visible) / 2.0, 0.0, visible, 1.0)
            } else {
                let visible = source_aspect / box_aspect;
                rect_xywh(0.0, (1.0 - visible) / 2.0, 1.0, visible)
            };
            ImagePlacement {
                dest: box_rect,
                crop,
            }
        }
        ImageFit::Original => ImagePlacement::full(rect_xywh(
            0.0,
            0.0,
            sw / ORIGINAL_FIT_DPI,
            sh / ORIGINAL_FIT_DPI,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contain_letterboxes_wide_image() {
        let p = resolve_fit(ImageFit::Contain, 2.0, 2.0, 400, 200);
        assert!(p.dest.x0.abs() < 1e-12);
        assert!((p.dest.y0 - 0.5).abs() < 1e-12);
        assert!((p.dest.width() - 2.0).abs() < 1e-12);
        assert!((p.dest.height() - 1.0).abs() < 1e-12);
        assert_eq!(p.crop, rect_xywh(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_cover_crops_wide_image_horizontally() {
        let p = resolve_fit(ImageFit::Cover, 2.0, 2.0, 400, 200);
        assert_eq!(p.dest, rect_xywh(0.0, 0.0, 2.0, 2.0));
        assert!((p.crop.x0 - 0.25).abs() < 1e-12);
        assert!((p.crop.width() - 0.5).abs() < 1e-12);
        assert_eq!(p.crop.height(), 1.0);
    }

    #[test]
    fn test_original_uses_reference_resolution() {
        let p = resolve_fit(ImageFit::Original, 1.0, 1.0, 300, 150);
        assert_eq!(p.dest, rect_xywh(0.0, 0.0, 2.0, 1.0));
    }

    #[test]
    fn test_unknown_source_size_stretches() {
        let p = resolve_fit(ImageFit::Cover, 1.5, 1.0, 0, 0);
        assert_eq!(p.dest, rect_xywh(0.0, 0.0, 1.5, 1.0));
    }
}
