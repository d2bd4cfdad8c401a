//! Render projector
//!
//! Turns a document into device-space draw lists for the editor, the wrap
//! preview and the export compositor, so every surface places objects
//! identically.

mod draw;
mod fit;
mod hit;
mod images;
mod projector;
mod viewport;

pub use draw::*;
pub use fit::{ImagePlacement, resolve_fit};
pub use hit::{TransformGesture, drag_end, hit_test, object_bounds, transform_end};
pub use images::{ImageRegistry, ImageStatus, referenced_sources};
pub use projector::{
    GuideSet, project, project_guides, project_object, project_wrap_image, wrap_backgrounds,
};
pub use viewport::{PresentationMode, Viewport};
