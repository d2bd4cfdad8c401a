//! Pure document reducer
//!
//! `reduce(document, action)` never mutates its input; it returns the next
//! document. Patches are shallow: a field left as `None` keeps its value,
//! a field that is set replaces the whole value (a new `size` must be given
//! in full even to change only its width).

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::document::*;

/// Every mutation the editor can request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Replace the whole document
    SetDocument { document: Box<Document> },
    UpdateSettings { settings: SettingsPatch },
    /// Patch a panel's non-object fields
    UpdatePanel { side: Side, updates: PanelPatch },
    /// Append to the top of a panel's z-order
    AddObject { side: Side, object: CanvasObject },
    /// No-op when the id is absent
    UpdateObject {
        side: Side,
        id: String,
        updates: ObjectPatch,
    },
    /// No-op when the id is absent
    DeleteObject { side: Side, id: String },
    /// Ids missing from `object_ids` are dropped; callers pass the full order
    ReorderObjects { side: Side, object_ids: Vec<String> },
    UpdateWrapImage { updates: WrapImagePatch },
}

fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spine_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_fold_lines: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_safe_area: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_centerline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_area_inset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_scale: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Partial update of one canvas object. Kind-specific fields only apply to
/// objects of a kind that has them and are ignored otherwise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    // text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    // text and shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub stroke: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub stroke_width: Option<Option<f64>>,

    // image and shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    // image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_to_corners: Option<bool>,

    // shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub corner_radius: Option<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WrapImagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

fn set<T>(target: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl SettingsPatch {
    pub fn apply(&self, settings: &mut Settings) {
        set(&mut settings.spine_width, &self.spine_width);
        set(&mut settings.bleed_enabled, &self.bleed_enabled);
        set(&mut settings.bleed_amount, &self.bleed_amount);
        set(&mut settings.show_fold_lines, &self.show_fold_lines);
        set(&mut settings.show_safe_area, &self.show_safe_area);
        set(&mut settings.show_centerline, &self.show_centerline);
        set(&mut settings.safe_area_inset, &self.safe_area_inset);
        set(&mut settings.screen_scale, &self.screen_scale);
    }
}

impl PanelPatch {
    pub fn apply(&self, panel: &mut Panel) {
        set(&mut panel.background_color, &self.background_color);
    }
}

impl ObjectPatch {
    pub fn apply(&self, object: &mut CanvasObject) {
        set(&mut object.position, &self.position);
        set(&mut object.rotation, &self.rotation);
        set(&mut object.locked, &self.locked);
        set(&mut object.visible, &self.visible);
        set(&mut object.opacity, &self.opacity);

        match &mut object.kind {
            ObjectKind::Text(text) => {
                set(&mut text.content, &self.content);
                set(&mut text.font_family, &self.font_family);
                set(&mut text.font_size, &self.font_size);
                set(&mut text.font_weight, &self.font_weight);
                set(&mut text.letter_spacing, &self.letter_spacing);
                set(&mut text.line_height, &self.line_height);
                set(&mut text.text_align, &self.text_align);
                set(&mut text.width, &self.width);
                set(&mut text.fill, &self.fill);
                set(&mut text.stroke, &self.stroke);
                set(&mut text.stroke_width, &self.stroke_width);
            }
            ObjectKind::Image(image) => {
                set(&mut image.size, &self.size);
                set(&mut image.src, &self.src);
                set(&mut image.fit, &self.fit);
                set(&mut image.original_width, &self.original_width);
                set(&mut image.original_height, &self.original_height);
                set(&mut image.crop_to_corners, &self.crop_to_corners);
            }
            ObjectKind::Shape(shape) => {
                set(&mut shape.size, &self.size);
                set(&mut shape.shape_type, &self.shape_type);
                if let Some(fill) = &self.fill {
                    shape.fill = Some(fill.clone());
                }
                set(&mut shape.stroke, &self.stroke);
                if let Some(Some(width)) = self.stroke_width {
                    shape.stroke_width = width;
                }
                set(&mut shape.corner_radius, &self.corner_radius);
            }
        }
    }
}

impl WrapImagePatch {
    pub fn apply(&self, wrap: &mut WrapImage) {
        set(&mut wrap.enabled, &self.enabled);
        set(&mut wrap.src, &self.src);
        set(&mut wrap.position, &self.position);
        set(&mut wrap.size, &self.size);
        set(&mut wrap.fit, &self.fit);
        set(&mut wrap.original_width, &self.original_width);
        set(&mut wrap.original_height, &self.original_height);
        set(&mut wrap.opacity, &self.opacity);
    }
}

/// Compute the document that results from applying `action` to `document`
pub fn reduce(document: &Document, action: Action) -> Document {
    let mut next = document.clone();

    match action {
        Action::SetDocument { document } => return *document,
        Action::UpdateSettings { settings } => settings.apply(&mut next.settings),
        Action::UpdatePanel { side, updates } => updates.apply(next.panel_mut(side)),
        Action::AddObject { side, object } => next.panel_mut(side).objects.push(object),
        Action::UpdateObject { side, id, updates } => {
            if let Some(object) = next
                .panel_mut(side)
                .objects
                .iter_mut()
                .find(|obj| obj.id == id)
            {
                updates.apply(object);
            }
        }
        Action::DeleteObject { side, id } => {
            next.panel_mut(side).objects.retain(|obj| obj.id != id);
        }
        Action::ReorderObjects { side, object_ids } => {
            let panel = next.panel_mut(side);
            let mut by_id: HashMap<String, CanvasObject> = panel
                .objects
                .drain(..)
                .map(|obj| (obj.id.clone(), obj))
                .collect();
            // Each id is taken at most once, so a repeated id cannot duplicate an object
            panel.objects = object_ids
                .iter()
                .filter_map(|id| by_id.remove(id))
                .collect();
        }
        Action::UpdateWrapImage { updates } => updates.apply(&mut next.wrap_image),
    }

    next
}
