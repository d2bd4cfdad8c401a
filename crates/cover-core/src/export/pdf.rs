//! Single-page PDF assembly
//!
//! The page holds the raster composite as an image XObject (with its alpha
//! in a soft mask), vector text over it, and the guides on top.

use std::collections::HashMap;

use image::RgbaImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::constants::BOLD_WEIGHT_THRESHOLD;
use crate::render::{GuideOp, TextOp};

use super::ExportLayout;
use super::content::{guide_ops, num, text_ops};
use super::fonts::StandardFont;

/// Build the export document
pub fn build_pdf(
    layout: &ExportLayout,
    composite: &RgbaImage,
    text: &[TextOp],
    guides: &[GuideOp],
) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut xobjects = Dictionary::new();
    let image_id = add_image(&mut doc, composite);
    xobjects.set("Im0", Object::Reference(image_id));

    let mut content = String::new();

    // Raster composite, placed over the wrap area inside the bleed
    content.push_str(&format!(
        "q {} 0 0 {} {} {} cm /Im0 Do Q\n",
        num(layout.wrap_width_pt),
        num(layout.wrap_height_pt),
        num(layout.bleed_pt),
        num(layout.bleed_pt)
    ));

    // Switch to y-down for text and guides
    content.push_str(&format!("1 0 0 -1 0 {} cm\n", num(layout.page_height_pt)));

    let mut fonts = Dictionary::new();
    let mut font_names: HashMap<StandardFont, String> = HashMap::new();
    let mut gstates = Dictionary::new();
    let mut gstate_names: HashMap<u32, String> = HashMap::new();

    for op in text {
        let face =
            StandardFont::for_family(&op.font_family, op.font_weight >= BOLD_WEIGHT_THRESHOLD);
        let font = match font_names.get(&face) {
            Some(name) => name.clone(),
            None => {
                let name = format!("F{}", font_names.len() + 1);
                let font_id = add_font(&mut doc, face);
                fonts.set(name.as_bytes(), Object::Reference(font_id));
                font_names.insert(face, name.clone());
                name
            }
        };

        let gstate = if op.object.opacity < 1.0 {
            let opacity = op.object.opacity.clamp(0.0, 1.0);
            // Keyed by thousandths so equal opacities share one state
            let key = (opacity * 1000.0).round() as u32;
            let name = match gstate_names.get(&key) {
                Some(name) => name.clone(),
                None => {
                    let name = format!("GS{}", gstate_names.len() + 1);
                    let gs_id = add_opacity_state(&mut doc, opacity);
                    gstates.set(name.as_bytes(), Object::Reference(gs_id));
                    gstate_names.insert(key, name.clone());
                    name
                }
            };
            Some(name)
        } else {
            None
        };

        content.push_str(&text_ops(op, face, &font, gstate.as_deref()));
    }

    for guide in guides {
        content.push_str(&guide_ops(guide));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));
    if !fonts.is_empty() {
        resources.set("Font", Object::Dictionary(fonts));
    }
    if !gstates.is_empty() {
        resources.set("ExtGState", Object::Dictionary(gstates));
    }

    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(layout.page_width_pt as f32),
            Object::Real(layout.page_height_pt as f32),
        ]),
    );
    page_dict.set("Resources", Object::Dictionary(resources));
    page_dict.set("Contents", Object::Reference(content_id));
    let page_id = doc.add_object(page_dict);

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc.compress();
    doc
}

/// RGB image XObject with the alpha channel as a DeviceGray soft mask
fn add_image(doc: &mut Document, composite: &RgbaImage) -> ObjectId {
    let (width, height) = composite.dimensions();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    let mut alpha = Vec::with_capacity(width as usize * height as usize);
    for px in composite.pixels() {
        rgb.extend_from_slice(&px.0[..3]);
        alpha.push(px.0[3]);
    }

    let image_dict = |color_space: &[u8]| {
        Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(width as i64)),
            ("Height", Object::Integer(height as i64)),
            ("ColorSpace", Object::Name(color_space.to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
        ])
    };

    let smask_id = doc.add_object(Stream::new(image_dict(b"DeviceGray"), alpha));
    let mut dict = image_dict(b"DeviceRGB");
    dict.set("SMask", Object::Reference(smask_id));
    doc.add_object(Stream::new(dict, rgb))
}

fn add_font(doc: &mut Document, face: StandardFont) -> ObjectId {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(face.base_font().as_bytes().to_vec()));
    font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    doc.add_object(font_dict)
}

fn add_opacity_state(doc: &mut Document, opacity: f64) -> ObjectId {
    let mut gs = Dictionary::new();
    gs.set("Type", Object::Name(b"ExtGState".to_vec()));
    gs.set("ca", Object::Real(opacity as f32));
    gs.set("CA", Object::Real(opacity as f32));
    doc.add_object(gs)
}
