use thiserror::Error;

use crate::export::ExportPhase;

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid document snapshot: {0}")]
    Snapshot(String),
    #[error("Could not decode image source: {0}")]
    Decode(String),
    #[error("Export failed during {phase:?} phase: {message}")]
    Export { phase: ExportPhase, message: String },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CoverError>;
