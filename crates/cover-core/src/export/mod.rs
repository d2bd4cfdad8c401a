//! Export compositor
//!
//! Three phases run strictly in order:
//!
//! 1. **Layout**: page size (wrap plus optional bleed) and offsets.
//! 2. **Composite**: every image source is decoded, then backgrounds, the
//!    wrap image, images and shapes are rasterized. Text and guides are not
//!    part of the raster.
//! 3. **Guides**: the page is assembled with vector text over the raster,
//!    the enabled guides, and the cut line last.
//!
//! A source that fails to decode is skipped; the export still completes.

mod color;
mod content;
mod decode;
mod fonts;
mod pdf;
mod raster;

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXPORT_DPI, PANEL_HEIGHT};
use crate::geometry::Point;
use crate::model::{Document, Settings};
use crate::render::{
    DrawOp, GuideSet, PresentationMode, Viewport, project, project_guides, referenced_sources,
};
use crate::types::{CoverError, Result};
use crate::units::inches_to_points;

pub use color::parse_color;
pub use content::encode_win_ansi;
pub use decode::{DecodedImage, ImageDecoder, SourceDecoder, decode_bytes};
pub use fonts::StandardFont;
pub use raster::{clip_mask, composite};

/// Export phase, for logging and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Layout,
    Composite,
    Guides,
}

/// What the export includes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Grow the page by the document's bleed, if the document enables bleed
    pub include_bleed: bool,
    pub include_fold_lines: bool,
    pub include_safe_area: bool,
    pub include_centerline: bool,
    /// Resolution of the raster composite
    pub raster_dpi: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_bleed: false,
            include_fold_lines: true,
            include_safe_area: false,
            include_centerline: false,
            raster_dpi: DEFAULT_EXPORT_DPI,
        }
    }
}

impl ExportOptions {
    /// Options seeded from the document's guide toggles
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            include_bleed: settings.bleed_enabled,
            include_fold_lines: settings.show_fold_lines,
            include_safe_area: settings.show_safe_area,
            include_centerline: settings.show_centerline,
            raster_dpi: DEFAULT_EXPORT_DPI,
        }
    }

    pub fn guide_set(&self) -> GuideSet {
        GuideSet {
            fold_lines: self.include_fold_lines,
            safe_area: self.include_safe_area,
            centerline: self.include_centerline,
        }
    }

    /// Load options from JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| CoverError::Snapshot(format!("Failed to parse export options: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            CoverError::Snapshot(format!("Failed to serialize export options: {}", e))
        })?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Physical layout of the export page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportLayout {
    pub page_width_pt: f64,
    pub page_height_pt: f64,
    /// Offset of the wrap from the page's left and bottom edges
    pub bleed_pt: f64,
    pub wrap_width_pt: f64,
    pub wrap_height_pt: f64,
    pub raster_dpi: f64,
    pub raster_width_px: u32,
    pub raster_height_px: u32,
}

impl ExportLayout {
    pub fn compute(document: &Document, options: &ExportOptions) -> Result<Self> {
        if !options.raster_dpi.is_finite() || options.raster_dpi <= 0.0 {
            return Err(CoverError::Export {
                phase: ExportPhase::Layout,
                message: format!("invalid raster resolution {}", options.raster_dpi),
            });
        }

        let settings = &document.settings;
        let bleed = if options.include_bleed && settings.bleed_enabled {
            settings.bleed_amount
        } else {
            0.0
        };
        let wrap_width = document.wrap_width();

        Ok(Self {
            page_width_pt: inches_to_points(wrap_width + bleed * 2.0),
            page_height_pt: inches_to_points(PANEL_HEIGHT + bleed * 2.0),
            bleed_pt: inches_to_points(bleed),
            wrap_width_pt: inches_to_points(wrap_width),
            wrap_height_pt: inches_to_points(PANEL_HEIGHT),
            raster_dpi: options.raster_dpi,
            raster_width_px: (wrap_width * options.raster_dpi).round().max(1.0) as u32,
            raster_height_px: (PANEL_HEIGHT * options.raster_dpi).round().max(1.0) as u32,
        })
    }
}

/// A finished export
#[derive(Debug)]
pub struct ExportArtifact {
    pub document: lopdf::Document,
    pub layout: ExportLayout,
    /// Image sources that failed to decode and were left out
    pub skipped_images: Vec<String>,
}

impl ExportArtifact {
    /// Serialize the PDF
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut writer = Vec::new();
        self.document.save_to(&mut writer)?;
        Ok(writer)
    }
}

/// Run all three export phases for `document`
pub async fn export_pdf<D: ImageDecoder + Sync>(
    document: &Document,
    options: &ExportOptions,
    decoder: &D,
) -> Result<ExportArtifact> {
    // Phase 1: layout
    let layout = ExportLayout::compute(document, options)?;
    info!(
        "Export layout: {}x{} pt page, {} pt bleed, {}x{} px raster at {} DPI",
        layout.page_width_pt,
        layout.page_height_pt,
        layout.bleed_pt,
        layout.raster_width_px,
        layout.raster_height_px,
        layout.raster_dpi
    );

    // Phase 2: decode every source before compositing anything
    info!("Export phase: {:?}", ExportPhase::Composite);
    let mut images = HashMap::new();
    let mut skipped_images = Vec::new();
    for src in referenced_sources(document) {
        match decoder.decode(&src).await {
            Ok(decoded) => {
                debug!(
                    "Decoded image {}x{} ({} bytes of source)",
                    decoded.width,
                    decoded.height,
                    src.len()
                );
                images.insert(src, decoded);
            }
            Err(e) => {
                warn!("Skipping image that failed to decode: {}", e);
                skipped_images.push(src);
            }
        }
    }

    let mut raster_list = project(
        document,
        &Viewport::new(layout.raster_dpi),
        PresentationMode::Wrap,
    );
    raster_list.ops.retain(|op| {
        matches!(
            op,
            DrawOp::Background(_) | DrawOp::WrapImage(_) | DrawOp::Image(_) | DrawOp::Shape(_)
        )
    });
    let pixels = tokio::task::spawn_blocking(move || composite(&raster_list, &images))
        .await
        .map_err(|e| phase_failed(ExportPhase::Composite, e))??;

    // Phase 3: vector text and guides in page points
    info!("Export phase: {:?}", ExportPhase::Guides);
    let page_view = Viewport::points().with_origin(Point::new(layout.bleed_pt, layout.bleed_pt));
    let text: Vec<_> = project(document, &page_view, PresentationMode::Wrap)
        .ops
        .into_iter()
        .filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            _ => None,
        })
        .collect();
    let guides = project_guides(document, &page_view, options.guide_set());
    debug!("{} text objects, {} guides", text.len(), guides.len());

    let pdf = tokio::task::spawn_blocking(move || pdf::build_pdf(&layout, &pixels, &text, &guides))
        .await
        .map_err(|e| phase_failed(ExportPhase::Guides, e))?;

    if !skipped_images.is_empty() {
        warn!("Export completed without {} image(s)", skipped_images.len());
    }
    info!("Export complete");

    Ok(ExportArtifact {
        document: pdf,
        layout,
        skipped_images,
    })
}

fn phase_failed(phase: ExportPhase, error: tokio::task::JoinError) -> CoverError {
    CoverError::Export {
        phase,
        message: error.to_string(),
    }
}

/// Save an exported PDF
pub async fn save_pdf(mut doc: lopdf::Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, CoverError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
