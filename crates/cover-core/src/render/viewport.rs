use crate::constants::{PANEL_HEIGHT, PANEL_WIDTH, POINTS_PER_INCH};
use crate::geometry::{OutlineRole, Point};
use crate::model::{Document, Side};
use crate::units::{font_size_to_pixels, inches_to_pixels, pixels_to_inches};

/// Mapping from physical inches to device units: `device = origin + inches * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Device units per inch
    pub scale: f64,
    /// Device position of the inch-space origin
    pub origin: Point,
}

impl Viewport {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            origin: Point::ZERO,
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// The document's interactive display scale
    pub fn screen(document: &Document) -> Self {
        Self::new(document.settings.screen_scale)
    }

    /// PDF user space: one device unit per point
    pub fn points() -> Self {
        Self::new(POINTS_PER_INCH)
    }

    pub fn to_device(&self, p: Point) -> Point {
        Point::new(
            self.origin.x + inches_to_pixels(p.x, self.scale),
            self.origin.y + inches_to_pixels(p.y, self.scale),
        )
    }

    pub fn to_inches(&self, p: Point) -> Point {
        Point::new(
            pixels_to_inches(p.x - self.origin.x, self.scale),
            pixels_to_inches(p.y - self.origin.y, self.scale),
        )
    }

    pub fn length(&self, inches: f64) -> f64 {
        inches_to_pixels(inches, self.scale)
    }

    /// A size given in points (fonts, stroke widths) in device units
    pub fn point_size(&self, points: f64) -> f64 {
        font_size_to_pixels(points, self.scale)
    }
}

/// What a draw list presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationMode {
    /// One panel on its own, as in the editor
    Panel(Side),
    /// Both panels and the spine as one unfolded piece
    Wrap,
}

impl PresentationMode {
    pub fn outline_role(self) -> OutlineRole {
        match self {
            PresentationMode::Panel(side) => OutlineRole::Panel(side),
            PresentationMode::Wrap => OutlineRole::Wrap,
        }
    }

    /// Width and height in inches
    pub fn size_inches(self, document: &Document) -> (f64, f64) {
        match self {
            PresentationMode::Panel(_) => (PANEL_WIDTH, PANEL_HEIGHT),
            PresentationMode::Wrap => (document.wrap_width(), PANEL_HEIGHT),
        }
    }

    /// Horizontal offset of a panel's own frame within this presentation
    pub fn panel_offset(self, document: &Document, side: Side) -> f64 {
        match (self, side) {
            (PresentationMode::Wrap, Side::Front) => PANEL_WIDTH + document.settings.spine_width,
            _ => 0.0,
        }
    }
}
