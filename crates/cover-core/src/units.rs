//! Unit conversion and wrap geometry
//!
//! Everything in the document model is measured in inches. These helpers map
//! inches onto screen pixels (at a caller-chosen pixels-per-inch scale) and
//! onto PDF points (fixed at 72 per inch). Inputs are expected to be finite
//! and non-negative; nothing here guards against NaN.

use crate::constants::{MIN_PRINT_DPI, MM_PER_INCH, PANEL_HEIGHT, PANEL_WIDTH, POINTS_PER_INCH};

/// Convert inches to pixels at `scale` pixels per inch
#[inline]
pub fn inches_to_pixels(inches: f64, scale: f64) -> f64 {
    inches * scale
}

/// Convert pixels back to inches at `scale` pixels per inch
#[inline]
pub fn pixels_to_inches(pixels: f64, scale: f64) -> f64 {
    pixels / scale
}

/// Convert inches to PDF points
#[inline]
pub fn inches_to_points(inches: f64) -> f64 {
    inches * POINTS_PER_INCH
}

/// Convert PDF points to inches
#[inline]
pub fn points_to_inches(points: f64) -> f64 {
    points / POINTS_PER_INCH
}

/// Convert a font size in points to pixels at `scale` pixels per inch.
///
/// Goes through inches so on-screen text stays consistent with the
/// physical model at every zoom level.
#[inline]
pub fn font_size_to_pixels(points: f64, scale: f64) -> f64 {
    points_to_inches(points) * scale
}

/// Total wrap width: back panel + spine + front panel
pub fn get_wrap_width(spine_width: f64) -> f64 {
    PANEL_WIDTH + spine_width + PANEL_WIDTH
}

/// Physical dimensions of the wrap in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapDimensions {
    pub width: f64,
    pub height: f64,
}

/// Wrap dimensions, grown by the bleed on every side when bleed is enabled
pub fn get_wrap_dimensions(spine_width: f64, bleed_enabled: bool, bleed_amount: f64) -> WrapDimensions {
    let width = get_wrap_width(spine_width);
    if bleed_enabled {
        WrapDimensions {
            width: width + bleed_amount * 2.0,
            height: PANEL_HEIGHT + bleed_amount * 2.0,
        }
    } else {
        WrapDimensions {
            width,
            height: PANEL_HEIGHT,
        }
    }
}

/// Fold positions measured from the wrap's left edge (start of the back panel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldLines {
    /// Where the back panel meets the spine
    pub back_fold: f64,
    /// Where the spine meets the front panel
    pub front_fold: f64,
}

pub fn get_fold_line_positions(spine_width: f64) -> FoldLines {
    FoldLines {
        back_fold: PANEL_WIDTH,
        front_fold: PANEL_WIDTH + spine_width,
    }
}

/// Effective resolution of an image at its placed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveDpi {
    pub width_dpi: f64,
    pub height_dpi: f64,
    pub min_dpi: f64,
}

pub fn calculate_effective_dpi(
    original_width_px: f64,
    original_height_px: f64,
    placed_width_in: f64,
    placed_height_in: f64,
) -> EffectiveDpi {
    let width_dpi = original_width_px / placed_width_in;
    let height_dpi = original_height_px / placed_height_in;
    EffectiveDpi {
        width_dpi,
        height_dpi,
        min_dpi: width_dpi.min(height_dpi),
    }
}

/// Whether `dpi` meets `threshold`
#[inline]
pub fn is_dpi_adequate(dpi: f64, threshold: f64) -> bool {
    dpi >= threshold
}

/// [`is_dpi_adequate`] against the default print threshold of 150 DPI
#[inline]
pub fn is_print_dpi_adequate(dpi: f64) -> bool {
    is_dpi_adequate(dpi, MIN_PRINT_DPI)
}

/// Format inches for display, e.g. `3.500"`
pub fn format_inches(inches: f64, decimals: usize) -> String {
    format!("{:.*}\"", decimals, inches)
}

/// Format a length given in inches as millimeters, e.g. `88.9 mm`
pub fn format_millimeters(inches: f64) -> String {
    format!("{:.1} mm", inches * MM_PER_INCH)
}
