//! Document model data types
//!
//! Field names serialize in camelCase so a snapshot reads the same as the
//! JSON documents the editor has always written. Every physical quantity is
//! in inches unless the field says otherwise.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLACK_INK, CORNER_RADIUS, DEFAULT_SCREEN_SCALE, DEFAULT_SPINE_WIDTH, KRAFT_COLOR,
    PANEL_HEIGHT,
};
use crate::units::get_wrap_width;

/// One of the two editable cover faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
        }
    }
}

/// Top-left anchor in inches (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in inches
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Document-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Spine width in inches; the editor offers [0.0625, 0.5]
    pub spine_width: f64,
    pub bleed_enabled: bool,
    pub bleed_amount: f64,
    pub show_fold_lines: bool,
    pub show_safe_area: bool,
    pub show_centerline: bool,
    pub safe_area_inset: f64,
    /// Pixels per inch for interactive display
    pub screen_scale: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spine_width: DEFAULT_SPINE_WIDTH,
            bleed_enabled: false,
            bleed_amount: 0.125,
            show_fold_lines: true,
            show_safe_area: false,
            show_centerline: false,
            safe_area_inset: 0.125,
            screen_scale: DEFAULT_SCREEN_SCALE,
        }
    }
}

/// How an image resolves its draw rectangle against its declared size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Letterbox inside the box, preserving aspect ratio
    Contain,
    /// Fill the box, cropping the overflow
    #[default]
    Cover,
    /// Fill the box, ignoring aspect ratio
    Stretch,
    /// Source pixels at the reference resolution, anchored top-left
    Original,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Line,
    Ellipse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    /// May span several lines separated by `\n`
    pub content: String,
    pub font_family: String,
    /// Points
    pub font_size: f64,
    /// 400, 500, 600 or 700
    pub font_weight: u16,
    /// Em units; multiplied by the font size when rendered
    pub letter_spacing: f64,
    /// Multiplier of the font size
    pub line_height: f64,
    pub text_align: TextAlign,
    pub fill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Width of the text box the content aligns within
    pub width: f64,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: "Text".to_string(),
            font_family: "Jost, sans-serif".to_string(),
            font_size: 24.0,
            font_weight: 400,
            letter_spacing: 0.0,
            line_height: 1.2,
            text_align: TextAlign::Left,
            fill: BLACK_INK.to_string(),
            stroke: None,
            stroke_width: None,
            width: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    /// Opaque image reference (data URL or path)
    pub src: String,
    pub size: Size,
    pub fit: ImageFit,
    /// Source pixels
    pub original_width: u32,
    pub original_height: u32,
    /// Clip to the rounded panel outline when rendered
    pub crop_to_corners: bool,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            size: Size::new(1.0, 1.0),
            fit: ImageFit::Cover,
            original_width: 0,
            original_height: 0,
            crop_to_corners: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeProps {
    pub shape_type: ShapeType,
    pub size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    pub stroke_width: f64,
    /// Inches, rectangles only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
}

impl Default for ShapeProps {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Rectangle,
            size: Size::new(1.0, 1.0),
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            corner_radius: None,
        }
    }
}

/// Kind-specific payload of a canvas object, tagged by `"type"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Text(TextProps),
    Image(ImageProps),
    Shape(ShapeProps),
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Text(_) => "text",
            ObjectKind::Image(_) => "image",
            ObjectKind::Shape(_) => "shape",
        }
    }
}

/// A positioned element on one panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasObject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub position: Position,
    /// Degrees clockwise, about the object's own top-left anchor
    #[serde(default)]
    pub rotation: f64,
    /// Excluded from drag and transform
    #[serde(default)]
    pub locked: bool,
    /// Excluded from rendering and hit-testing
    #[serde(default = "default_true")]
    pub visible: bool,
    /// 0..=1
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

impl CanvasObject {
    pub fn new(id: impl Into<String>, position: Position, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            position,
            rotation: 0.0,
            locked: false,
            visible: true,
            opacity: 1.0,
            kind,
        }
    }

    pub fn as_text(&self) -> Option<&TextProps> {
        match &self.kind {
            ObjectKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageProps> {
        match &self.kind {
            ObjectKind::Image(image) => Some(image),
            _ => None,
        }
    }
}

/// One cover face: a background plus a z-ordered object stack.
/// Later objects render on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Panel {
    pub background_color: String,
    pub objects: Vec<CanvasObject>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            background_color: KRAFT_COLOR.to_string(),
            objects: Vec::new(),
        }
    }
}

impl Panel {
    pub fn find(&self, id: &str) -> Option<&CanvasObject> {
        self.objects.iter().find(|obj| obj.id == id)
    }

    pub fn object_ids(&self) -> Vec<String> {
        self.objects.iter().map(|obj| obj.id.clone()).collect()
    }
}

/// Background image laid out in wrap space, spanning both panels and the spine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WrapImage {
    pub enabled: bool,
    pub src: String,
    pub position: Position,
    pub size: Size,
    pub fit: ImageFit,
    pub original_width: u32,
    pub original_height: u32,
    pub opacity: f64,
}

impl Default for WrapImage {
    fn default() -> Self {
        Self {
            enabled: false,
            src: String::new(),
            position: Position::default(),
            size: Size::new(get_wrap_width(DEFAULT_SPINE_WIDTH), PANEL_HEIGHT),
            fit: ImageFit::Cover,
            original_width: 0,
            original_height: 0,
            opacity: 1.0,
        }
    }
}

impl WrapImage {
    /// Whether there is anything to draw
    pub fn is_drawable(&self) -> bool {
        self.enabled && !self.src.is_empty()
    }
}

/// Root aggregate: settings, exactly two panels, and the wrap background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub version: u32,
    pub settings: Settings,
    pub front: Panel,
    pub back: Panel,
    pub wrap_image: WrapImage,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: 1,
            settings: Settings::default(),
            front: Panel::default(),
            back: Panel::default(),
            wrap_image: WrapImage::default(),
        }
    }
}

impl Document {
    pub fn panel(&self, side: Side) -> &Panel {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    pub fn panel_mut(&mut self, side: Side) -> &mut Panel {
        match side {
            Side::Front => &mut self.front,
            Side::Back => &mut self.back,
        }
    }

    pub fn wrap_width(&self) -> f64 {
        get_wrap_width(self.settings.spine_width)
    }

    /// Outer corner radius of the die cut, in inches
    pub fn corner_radius(&self) -> f64 {
        CORNER_RADIUS
    }
}

/// Ephemeral editor selection; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub side: Side,
    pub object_id: String,
}
