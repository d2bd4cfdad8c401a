pub mod constants;
pub mod export;
pub mod geometry;
pub mod model;
pub mod render;
mod stats;
mod types;
pub mod units;

pub use export::{
    ExportArtifact, ExportLayout, ExportOptions, ExportPhase, ImageDecoder, SourceDecoder,
    export_pdf, save_pdf,
};
pub use model::*;
pub use stats::{CoverStatistics, ImageDpi, calculate_statistics};
pub use types::*;
