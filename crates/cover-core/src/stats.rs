use crate::model::{Document, ObjectKind, Side};
use crate::units::{EffectiveDpi, calculate_effective_dpi, is_print_dpi_adequate};

/// Print resolution of one placed image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDpi {
    /// `None` for the wrap image
    pub side: Option<Side>,
    /// Empty for the wrap image
    pub object_id: String,
    pub dpi: EffectiveDpi,
    pub adequate: bool,
}

/// Summary of a document for display and reporting
#[derive(Debug, Clone, PartialEq)]
pub struct CoverStatistics {
    pub front_objects: usize,
    pub back_objects: usize,
    pub hidden_objects: usize,
    pub images: Vec<ImageDpi>,
}

impl CoverStatistics {
    /// Images below the print threshold
    pub fn low_resolution(&self) -> impl Iterator<Item = &ImageDpi> {
        self.images.iter().filter(|img| !img.adequate)
    }
}

/// Calculate object counts and the effective DPI of every placed image.
///
/// Images without known pixel dimensions are left out of the DPI report.
pub fn calculate_statistics(document: &Document) -> CoverStatistics {
    let mut images = Vec::new();

    let wrap = &document.wrap_image;
    if wrap.is_drawable() {
        if let Some(dpi) = placed_dpi(
            wrap.original_width,
            wrap.original_height,
            wrap.size.width,
            wrap.size.height,
        ) {
            images.push(ImageDpi {
                side: None,
                object_id: String::new(),
                adequate: is_print_dpi_adequate(dpi.min_dpi),
                dpi,
            });
        }
    }

    for side in [Side::Back, Side::Front] {
        for obj in &document.panel(side).objects {
            let ObjectKind::Image(image) = &obj.kind else {
                continue;
            };
            if let Some(dpi) = placed_dpi(
                image.original_width,
                image.original_height,
                image.size.width,
                image.size.height,
            ) {
                images.push(ImageDpi {
                    side: Some(side),
                    object_id: obj.id.clone(),
                    adequate: is_print_dpi_adequate(dpi.min_dpi),
                    dpi,
                });
            }
        }
    }

    let hidden_objects = document
        .front
        .objects
        .iter()
        .chain(&document.back.objects)
        .filter(|obj| !obj.visible)
        .count();

    CoverStatistics {
        front_objects: document.front.objects.len(),
        back_objects: document.back.objects.len(),
        hidden_objects,
        images,
    }
}

fn placed_dpi(pixel_width: u32, pixel_height: u32, width: f64, height: f64) -> Option<EffectiveDpi> {
    if pixel_width == 0 || pixel_height == 0 || width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(calculate_effective_dpi(
        pixel_width as f64,
        pixel_height as f64,
        width,
        height,
    ))
}
