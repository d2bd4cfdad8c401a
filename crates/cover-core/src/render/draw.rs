//! Draw instructions produced by the projector
//!
//! Every coordinate is in device units. Object ops carry an `origin` (the
//! object's top-left anchor) and a clockwise `rotation` about that anchor;
//! their other geometry is local to the anchor.

use crate::geometry::{Affine, Outline, Point, placement};
use crate::model::{ShapeType, Side, TextAlign};

use super::fit::ImagePlacement;

/// An ordered, clip-aware list of draw instructions
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub width: f64,
    pub height: f64,
    /// Clip applied to every op except guides (and images that opt out)
    pub clip: Outline,
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    /// Ops that draw a given object
    pub fn ops_for(&self, id: &str) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| op.object_id() == Some(id))
    }

    pub fn guides(&self) -> impl Iterator<Item = &GuideOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Guide(guide) => Some(guide),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Background(BackgroundOp),
    WrapImage(ImageOp),
    Image(ImageOp),
    Text(TextOp),
    Shape(ShapeOp),
    Guide(GuideOp),
}

impl DrawOp {
    pub fn object_id(&self) -> Option<&str> {
        match self {
            DrawOp::Image(op) => Some(&op.object.id),
            DrawOp::Text(op) => Some(&op.object.id),
            DrawOp::Shape(op) => Some(&op.object.id),
            DrawOp::Background(_) | DrawOp::WrapImage(_) | DrawOp::Guide(_) => None,
        }
    }
}

/// A panel background fill
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundOp {
    pub side: Side,
    pub outline: Outline,
    pub color: String,
}

/// Identity and placement shared by every object op
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectFrame {
    /// Empty for the wrap image
    pub id: String,
    pub side: Option<Side>,
    pub origin: Point,
    /// Degrees clockwise about `origin`
    pub rotation: f64,
    pub opacity: f64,
}

impl ObjectFrame {
    /// Local-to-device transform
    pub fn transform(&self) -> Affine {
        placement(self.origin, self.rotation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOp {
    pub object: ObjectFrame,
    pub src: String,
    /// Declared box size
    pub width: f64,
    pub height: f64,
    /// Fit-resolved destination within the box
    pub placement: ImagePlacement,
    pub clip_to_outline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Anchor of the line relative to the object origin; `x` is the left
    /// edge, midpoint or right edge of the text box depending on alignment
    pub offset: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub object: ObjectFrame,
    pub lines: Vec<TextLine>,
    pub align: TextAlign,
    pub box_width: f64,
    pub font_family: String,
    pub font_weight: u16,
    /// Font size in device units
    pub font_size: f64,
    /// Font size in points, as stored
    pub font_size_pt: f64,
    /// Extra advance between glyphs in device units
    pub letter_spacing: f64,
    /// Multiplier of the font size
    pub line_height: f64,
    pub fill: String,
    pub stroke: Option<String>,
    /// Device units
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOp {
    pub object: ObjectFrame,
    pub shape_type: ShapeType,
    pub width: f64,
    pub height: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideKind {
    FoldLine,
    SafeArea,
    Centerline,
    CutLine,
    /// Border of a standalone panel in the editor
    PanelOutline,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuideShape {
    Line { from: Point, to: Point },
    Outline(Outline),
}

/// A stroked, unclipped guide. Width and dash lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideOp {
    pub kind: GuideKind,
    pub shape: GuideShape,
    pub color: [u8; 3],
    pub width: f64,
    /// Empty for a solid line
    pub dash: Vec<f64>,
}
