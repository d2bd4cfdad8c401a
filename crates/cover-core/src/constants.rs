//! Shared constants for the cover model and its rendering surfaces
//!
//! Physical dimensions are in inches. Guide styles are in PDF points
//! (or device pixels on screen surfaces).

// =============================================================================
// Physical Notebook
// =============================================================================

/// Width of one cover panel (inches)
pub const PANEL_WIDTH: f64 = 3.5;

/// Height of a panel and of the whole wrap (inches)
pub const PANEL_HEIGHT: f64 = 5.5;

/// Radius of the die-cut outer corners (3/8 inch)
pub const CORNER_RADIUS: f64 = 0.375;

/// Spine width of a freshly created document (inches)
pub const DEFAULT_SPINE_WIDTH: f64 = 0.125;

/// Smallest spine width the editor offers (inches)
pub const MIN_SPINE_WIDTH: f64 = 0.0625;

/// Largest spine width the editor offers (inches)
pub const MAX_SPINE_WIDTH: f64 = 0.5;

// =============================================================================
// Unit Conversion
// =============================================================================

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Default on-screen editing resolution (pixels per inch)
pub const DEFAULT_SCREEN_SCALE: f64 = 96.0;

// =============================================================================
// Images
// =============================================================================

/// Minimum effective DPI considered adequate for print
pub const MIN_PRINT_DPI: f64 = 150.0;

/// Resolution used to size images placed with `ImageFit::Original`,
/// and to size freshly added images
pub const ORIGINAL_FIT_DPI: f64 = 150.0;

/// Longest side of a freshly added image (inches)
pub const MAX_INITIAL_IMAGE_SIDE: f64 = 3.0;

/// Resolution of the raster composite embedded in the export
pub const DEFAULT_EXPORT_DPI: f64 = 300.0;

// =============================================================================
// Colors
// =============================================================================

/// Classic kraft cover stock
pub const KRAFT_COLOR: &str = "#c9b896";

/// Default ink color for text
pub const BLACK_INK: &str = "#1a1a1a";

// =============================================================================
// Guides
// =============================================================================

/// Fold line color (blue)
pub const FOLD_LINE_COLOR: [u8; 3] = [0, 153, 255];

/// Safe area color (green)
pub const SAFE_AREA_COLOR: [u8; 3] = [0, 255, 102];

/// Centerline color (yellow)
pub const CENTERLINE_COLOR: [u8; 3] = [255, 204, 0];

/// Cut line color (magenta)
pub const CUT_LINE_COLOR: [u8; 3] = [255, 0, 102];

/// Editor panel border color (gray)
pub const PANEL_OUTLINE_COLOR: [u8; 3] = [102, 102, 102];

/// Line width for fold, safe area and centerline guides (points)
pub const GUIDE_LINE_WIDTH: f64 = 0.5;

/// Line width for the cut line (points)
pub const CUT_LINE_WIDTH: f64 = 1.0;

/// Line width for the editor panel border
pub const PANEL_OUTLINE_WIDTH: f64 = 1.0;

/// Dash patterns: (dash, gap) in points
pub const FOLD_LINE_DASH: [f64; 2] = [4.0, 4.0];
pub const SAFE_AREA_DASH: [f64; 2] = [2.0, 2.0];
pub const CENTERLINE_DASH: [f64; 2] = [2.0, 4.0];
pub const CUT_LINE_DASH: [f64; 2] = [8.0, 4.0];

// =============================================================================
// Text
// =============================================================================

/// Distance from the top of a line box to the baseline, as a fraction of the
/// font size (Helvetica ascender)
pub const STANDARD_FONT_ASCENT_RATIO: f64 = 0.718;

/// Font weights at or above this render bold
pub const BOLD_WEIGHT_THRESHOLD: u16 = 600;

// =============================================================================
// Rasterizing
// =============================================================================

/// Flattening tolerance for curves built only to be rasterized (device pixels)
pub const PATH_TOLERANCE: f64 = 0.1;
