//! Editor runtime for cover documents
//!
//! An embedding UI owns an [`EditorSession`] through a worker task: it sends
//! [`CoverCommand`]s and renders from the [`CoverUpdate`]s that come back.

use std::path::PathBuf;

mod error;
mod logger;
mod persist;
mod session;
mod worker;

pub use error::{Result, RuntimeError};
pub use logger::{LogEntry, SessionLogger};
pub use persist::{JsonFileSink, MemorySink, PersistSink};
pub use session::EditorSession;
pub use worker::{WorkerState, worker_task};

// Re-export types from the core crate
pub use cover_core::{
    Action, CoverStatistics, Document, ExportOptions, Selection, Side,
};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum CoverCommand {
    /// Run an action through the reducer
    Dispatch { action: Action },
    /// Change or clear the selection
    Select { selection: Option<Selection> },
    /// Add a default text object and select it
    AddText { side: Side },
    /// Decode an image source, then add it as an image object and select it
    AddImage { side: Side, src: String },
    DeleteSelected,
    ImportJson { json: String },
    ExportJson,
    ResetToDefault,
    /// Replace the document with whatever the persistence sink holds
    Restore,
    /// Start decoding every image source the document references
    LoadImages,
    CalculateStats,
    Export {
        options: ExportOptions,
        output_path: PathBuf,
    },
    LoadExportOptions { path: PathBuf },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum CoverUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    DocumentChanged {
        document: Box<Document>,
        dirty: bool,
    },
    SelectionChanged {
        selection: Option<Selection>,
    },
    JsonExported {
        json: String,
    },
    ImageReady {
        src: String,
        width: u32,
        height: u32,
    },
    ImageFailed {
        src: String,
    },
    StatsCalculated {
        stats: CoverStatistics,
    },
    ExportComplete {
        path: PathBuf,
        skipped_images: Vec<String>,
    },
    ExportOptionsLoaded {
        options: ExportOptions,
    },
    Error {
        message: String,
    },
}
