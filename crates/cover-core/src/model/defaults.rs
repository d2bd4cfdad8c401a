//! Factories for fresh documents and objects

use crate::constants::{KRAFT_COLOR, MAX_INITIAL_IMAGE_SIDE, ORIGINAL_FIT_DPI};

use super::document::*;

/// Source of stable, unique object ids
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

impl<T: IdSource + ?Sized> IdSource for Box<T> {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Sequential ids with a fixed prefix (`obj-1`, `obj-2`, ...)
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// A text object with the editor's default styling
pub fn create_text_object(ids: &mut impl IdSource, position: Position, props: TextProps) -> CanvasObject {
    CanvasObject::new(ids.next_id(), position, ObjectKind::Text(props))
}

/// A default "Text" object near the panel's top-left
pub fn create_default_text_object(ids: &mut impl IdSource) -> CanvasObject {
    create_text_object(ids, Position::new(0.5, 0.5), TextProps::default())
}

/// An image object sized from its pixel dimensions at 150 DPI, with the
/// longest side capped at three inches
pub fn create_image_object(
    ids: &mut impl IdSource,
    src: impl Into<String>,
    pixel_width: u32,
    pixel_height: u32,
) -> CanvasObject {
    let size = initial_image_size(pixel_width, pixel_height);
    CanvasObject::new(
        ids.next_id(),
        Position::new(0.25, 1.0),
        ObjectKind::Image(ImageProps {
            src: src.into(),
            size,
            fit: ImageFit::Cover,
            original_width: pixel_width,
            original_height: pixel_height,
            crop_to_corners: true,
        }),
    )
}

fn initial_image_size(pixel_width: u32, pixel_height: u32) -> Size {
    let mut width = pixel_width as f64 / ORIGINAL_FIT_DPI;
    let mut height = pixel_height as f64 / ORIGINAL_FIT_DPI;

    if width > MAX_INITIAL_IMAGE_SIDE {
        height *= MAX_INITIAL_IMAGE_SIDE / width;
        width = MAX_INITIAL_IMAGE_SIDE;
    }
    if height > MAX_INITIAL_IMAGE_SIDE {
        width *= MAX_INITIAL_IMAGE_SIDE / height;
        height = MAX_INITIAL_IMAGE_SIDE;
    }

    Size::new(width, height)
}

fn preset_text(
    ids: &mut impl IdSource,
    content: &str,
    y: f64,
    font_size: f64,
    font_weight: u16,
    letter_spacing: f64,
) -> CanvasObject {
    create_text_object(
        ids,
        Position::new(0.375, y),
        TextProps {
            content: content.to_string(),
            font_size,
            font_weight,
            letter_spacing,
            width: 2.75,
            ..TextProps::default()
        },
    )
}

/// Classic memo book front: title, subtitle, edition line
pub fn create_default_front_panel(ids: &mut impl IdSource) -> Panel {
    Panel {
        background_color: KRAFT_COLOR.to_string(),
        objects: vec![
            preset_text(ids, "FIELD NOTES", 0.5, 32.0, 700, 0.15),
            preset_text(ids, "MEMO BOOK", 0.9, 14.0, 500, 0.2),
            preset_text(ids, "YOUR EDITION", 4.5, 12.0, 400, 0.1),
        ],
    }
}

/// Classic memo book back: heading, bullet list, footer
pub fn create_default_back_panel(ids: &mut impl IdSource) -> Panel {
    let mut list = preset_text(
        ids,
        "• Ideas & Sketches\n• Lists & Tasks\n• Notes & Reminders\n• Observations",
        0.8,
        9.0,
        400,
        0.02,
    );
    if let ObjectKind::Text(text) = &mut list.kind {
        text.line_height = 1.6;
    }

    Panel {
        background_color: KRAFT_COLOR.to_string(),
        objects: vec![
            preset_text(ids, "PRACTICAL APPLICATIONS", 0.5, 10.0, 600, 0.15),
            list,
            preset_text(ids, "fieldnotes.com", 4.8, 8.0, 400, 0.05),
        ],
    }
}

/// The classic layout with freshly generated ids
pub fn create_default_document_with(ids: &mut impl IdSource) -> Document {
    let front = create_default_front_panel(ids);
    let back = create_default_back_panel(ids);
    Document {
        version: 1,
        settings: Settings::default(),
        front,
        back,
        wrap_image: WrapImage::default(),
    }
}

/// The classic layout with UUID object ids
pub fn create_default_document() -> Document {
    create_default_document_with(&mut UuidIds)
}
