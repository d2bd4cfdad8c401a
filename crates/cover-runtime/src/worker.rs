use std::collections::VecDeque;
use std::path::PathBuf;

use cover_core::render::ImageRegistry;
use cover_core::{ExportOptions, ImageDecoder, Side, export_pdf, save_pdf};
use tokio::sync::mpsc;

use crate::persist::PersistSink;
use crate::session::EditorSession;
use crate::{CoverCommand, CoverUpdate};

/// Everything the worker owns while it runs
pub struct WorkerState<S, D> {
    pub session: EditorSession,
    pub sink: S,
    pub decoder: D,
    pub images: ImageRegistry,
}

impl<S: PersistSink, D: ImageDecoder> WorkerState<S, D> {
    pub fn new(session: EditorSession, sink: S, decoder: D) -> Self {
        Self {
            session,
            sink,
            decoder,
            images: ImageRegistry::new(),
        }
    }
}

/// Async worker task that processes cover commands and sends updates.
///
/// Runs until every command sender is dropped, then hands its state back.
pub async fn worker_task<S, D>(
    mut state: WorkerState<S, D>,
    mut command_rx: mpsc::UnboundedReceiver<CoverCommand>,
    update_tx: mpsc::UnboundedSender<CoverUpdate>,
) -> WorkerState<S, D>
where
    S: PersistSink + Send,
    D: ImageDecoder + Sync,
{
    let mut backlog = VecDeque::new();

    loop {
        let cmd = match backlog.pop_front() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let selection_before = state.session.selection().cloned();
        process_command(cmd, &mut state, &mut command_rx, &mut backlog, &update_tx).await;

        let selection = state.session.selection().cloned();
        if selection != selection_before {
            let _ = update_tx.send(CoverUpdate::SelectionChanged { selection });
        }
    }

    state
}

async fn process_command<S, D>(
    cmd: CoverCommand,
    state: &mut WorkerState<S, D>,
    command_rx: &mut mpsc::UnboundedReceiver<CoverCommand>,
    backlog: &mut VecDeque<CoverCommand>,
    update_tx: &mpsc::UnboundedSender<CoverUpdate>,
) where
    S: PersistSink + Send,
    D: ImageDecoder + Sync,
{
    match cmd {
        CoverCommand::Dispatch { action } => {
            if state.session.dispatch(action) {
                document_changed(state, update_tx).await;
            }
        }
        CoverCommand::Select { selection } => {
            state.session.select(selection);
        }
        CoverCommand::AddText { side } => {
            state.session.add_text(side);
            document_changed(state, update_tx).await;
        }
        CoverCommand::AddImage { side, src } => {
            handle_add_image(side, src, state, update_tx).await;
        }
        CoverCommand::DeleteSelected => {
            if state.session.delete_selected() {
                document_changed(state, update_tx).await;
            }
        }
        CoverCommand::ImportJson { json } => match state.session.import_json(&json) {
            Ok(()) => document_changed(state, update_tx).await,
            Err(e) => {
                let _ = update_tx.send(CoverUpdate::Error {
                    message: format!("Failed to import document: {}", e),
                });
            }
        },
        CoverCommand::ExportJson => match state.session.export_json() {
            Ok(json) => {
                let _ = update_tx.send(CoverUpdate::JsonExported { json });
            }
            Err(e) => {
                let _ = update_tx.send(CoverUpdate::Error {
                    message: format!("Failed to export document: {}", e),
                });
            }
        },
        CoverCommand::ResetToDefault => {
            state.session.reset_to_default();
            document_changed(state, update_tx).await;
        }
        CoverCommand::Restore => {
            handle_restore(state, update_tx).await;
        }
        CoverCommand::LoadImages => {
            // Collapse queued load requests into this one
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let CoverCommand::LoadImages = next_cmd {
                    log::debug!("Discarding queued image load, one is already running");
                } else {
                    backlog.push_back(next_cmd);
                }
            }
            handle_load_images(state, update_tx).await;
        }
        CoverCommand::CalculateStats => {
            let _ = update_tx.send(CoverUpdate::StatsCalculated {
                stats: state.session.statistics(),
            });
        }
        CoverCommand::Export {
            options,
            output_path,
        } => {
            handle_export(options, output_path, state, update_tx).await;
        }
        CoverCommand::LoadExportOptions { path } => match ExportOptions::load(&path).await {
            Ok(options) => {
                let _ = update_tx.send(CoverUpdate::ExportOptionsLoaded { options });
            }
            Err(e) => {
                let _ = update_tx.send(CoverUpdate::Error {
                    message: format!("Failed to load export options: {}", e),
                });
            }
        },
    }
}

/// Persist the new document, drop images it no longer draws, then report it
async fn document_changed<S, D>(
    state: &mut WorkerState<S, D>,
    update_tx: &mpsc::UnboundedSender<CoverUpdate>,
) where
    S: PersistSink + Send,
{
    let persisted = match state.session.export_json() {
        Ok(json) => state.sink.persist(json).await,
        Err(e) => Err(e),
    };
    match persisted {
        Ok(()) => state.session.mark_clean(),
        Err(e) => {
            log::warn!("Document not persisted: {}", e);
            let _ = update_tx.send(CoverUpdate::Error {
                message: format!("Failed to save document: {}", e),
            });
        }
    }

    state.images.retain_referenced(state.session.document());
    let _ = update_tx.send(CoverUpdate::DocumentChanged {
        document: Box::new(state.session.document().clone()),
        dirty: state.session.is_dirty(),
    });
}

async fn handle_add_image<S, D>(
    side: Side,
    src: String,
    state: &mut WorkerState<S, D>,
    update_tx: &mpsc::UnboundedSender<CoverUpdate>,
) where
    S: PersistSink + Send,
    D: ImageDecoder + Sync,
{
    let decoded = match state.decoder.decode(&src).await {
        Ok(decoded) => decoded,
        Err(e) => {
            let _ = update_tx.send(CoverUpdate::Error {
                message: format!("Failed to load image: {}", e),
            });
            return;
        }
    };

    state.images.request(&src);
    state.images.resolve(&src, decoded.width, decoded.height);
    let _ = update_tx.send(CoverUpdate::ImageReady {
        src: src.clone(),
        width: decoded.width,
        height: decoded.height,
    });

    state
        .session
        .add_image(side, src, decoded.width, decoded.height);
    document_changed(state, update_tx).await;
}

async fn handle_restore<S, D>(
    state: &mut WorkerState<S, D>,
    update_tx: &mpsc::UnboundedSender<CoverUpdate>,
) where
    S: PersistSink + Send,
{
    match state.sink.restore().await {
        Ok(Some(json)) => {
            if let Err(e) = state.session.import_json(&json) {
                log::warn!("Stored document could not be read, keeping the current one");
                let _ = update_tx.send(CoverUpdate::Error {
                    message: format!("Failed to restore document: {}", e),
                });
                return;
            }
            state.session.mark_clean();
        }
        Ok(None) => log::debug!("No stored document to restore"),
        Err(e) => {
            let _ = update_tx.send(CoverUpdate::Error {
                message: format!("Failed to restore document: {}", e),
            });
            return;
        }
    }

    state.images.retain_referenced(state.session.document());
    let _ = update_tx.send(CoverUpdate::DocumentChanged {
        document: Box::new(state.session.document().clone()),
        dirty: state.session.is_dirty(),
    });
}

async fn handle_load_images<S, D>(
    state: &mut WorkerState<S, D>,
    update_tx: &mpsc::UnboundedSender<CoverUpdate>,
) where
    D: ImageDecoder + Sync,
{
    let pending = state.images.request_all(state.session.document());
    let total = pending.len();

    for (current, src) in pending.into_iter().enumerate() {
        let _ = update_tx.send(CoverUpdate::Progress {
            operation: "Loading images".to_string(),
            current,
            total,
        });

        match state.decoder.decode(&src).await {
            Ok(decoded) => {
                state.images.resolve(&src, decoded.width, decoded.height);
                let _ = update_tx.send(CoverUpdate::ImageReady {
                    src,
                    width: decoded.width,
                    height: decoded.height,
                });
            }
            Err(e) => {
                // The object simply stays undrawn
                log::warn!("Image failed to load: {}", e);
                state.images.fail(&src);
                let _ = update_tx.send(CoverUpdate::ImageFailed { src });
            }
        }
    }
}

async fn handle_export<S, D>(
    options: ExportOptions,
    output_path: PathBuf,
    state: &mut WorkerState<S, D>,
    update_tx: &mpsc::UnboundedSender<CoverUpdate>,
) where
    D: ImageDecoder + Sync,
{
    let _ = update_tx.send(CoverUpdate::Progress {
        operation: "Compositing cover".to_string(),
        current: 0,
        total: 2,
    });

    let artifact = match export_pdf(state.session.document(), &options, &state.decoder).await {
        Ok(artifact) => artifact,
        Err(e) => {
            let _ = update_tx.send(CoverUpdate::Error {
                message: format!("Failed to export PDF: {}", e),
            });
            return;
        }
    };

    let _ = update_tx.send(CoverUpdate::Progress {
        operation: "Saving PDF".to_string(),
        current: 1,
        total: 2,
    });

    let skipped_images = artifact.skipped_images;
    if let Err(e) = save_pdf(artifact.document, &output_path).await {
        let _ = update_tx.send(CoverUpdate::Error {
            message: format!("Failed to save PDF: {}", e),
        });
        return;
    }

    let _ = update_tx.send(CoverUpdate::ExportComplete {
        path: output_path,
        skipped_images,
    });
}
