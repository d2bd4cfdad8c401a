//! The editor's in-memory state: one document, one selection, a dirty flag

use cover_core::{
    Action, CanvasObject, CoverStatistics, Document, IdSource, Selection, Side, UuidIds,
    calculate_statistics, create_default_document_with, create_default_text_object,
    create_image_object, from_json, reduce, to_json,
};
use log::{debug, info};

use crate::error::Result;

/// Owns the document; every change goes through the reducer
pub struct EditorSession {
    document: Document,
    selection: Option<Selection>,
    dirty: bool,
    ids: Box<dyn IdSource + Send>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::with_ids(Box::new(UuidIds))
    }
}

impl EditorSession {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
            dirty: false,
            ids: Box::new(UuidIds),
        }
    }

    /// A session on the default document, drawing object ids from `ids`
    pub fn with_ids(mut ids: Box<dyn IdSource + Send>) -> Self {
        let document = create_default_document_with(&mut ids);
        Self {
            document,
            selection: None,
            dirty: false,
            ids,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Whether the document changed since it was last persisted
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Apply `action`; returns whether the document changed
    pub fn dispatch(&mut self, action: Action) -> bool {
        let replaces = matches!(action, Action::SetDocument { .. });
        let next = reduce(&self.document, action);
        if replaces {
            self.selection = None;
        }
        if next == self.document {
            return false;
        }

        self.document = next;
        self.dirty = true;
        if self.selected_object().is_none() {
            self.selection = None;
        }
        true
    }

    /// Select an object; a selection naming a missing object clears it.
    /// Returns whether the selection changed.
    pub fn select(&mut self, selection: Option<Selection>) -> bool {
        let selection = selection.filter(|sel| {
            self.document.panel(sel.side).find(&sel.object_id).is_some()
        });
        if selection == self.selection {
            return false;
        }
        self.selection = selection;
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected_object(&self) -> Option<&CanvasObject> {
        let selection = self.selection.as_ref()?;
        self.document
            .panel(selection.side)
            .find(&selection.object_id)
    }

    /// Append `object` to `side` and select it
    pub fn add_object(&mut self, side: Side, object: CanvasObject) {
        let object_id = object.id.clone();
        self.dispatch(Action::AddObject { side, object });
        self.selection = Some(Selection { side, object_id });
    }

    pub fn add_text(&mut self, side: Side) {
        let object = create_default_text_object(&mut self.ids);
        self.add_object(side, object);
    }

    /// Add an image object sized from its pixel dimensions
    pub fn add_image(&mut self, side: Side, src: impl Into<String>, width: u32, height: u32) {
        let object = create_image_object(&mut self.ids, src, width, height);
        self.add_object(side, object);
    }

    /// Delete the selected object; returns whether anything was deleted
    pub fn delete_selected(&mut self) -> bool {
        let Some(selection) = self.selection.take() else {
            return false;
        };
        self.dispatch(Action::DeleteObject {
            side: selection.side,
            id: selection.object_id,
        })
    }

    /// Replace the document from a JSON snapshot. On error the current
    /// document and selection are kept.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let document = from_json(json)?;
        info!("Imported document snapshot ({} bytes)", json.len());
        self.dispatch(Action::SetDocument {
            document: Box::new(document),
        });
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(to_json(&self.document)?)
    }

    /// Start over from the default layout
    pub fn reset_to_default(&mut self) {
        debug!("Resetting to the default document");
        let document = create_default_document_with(&mut self.ids);
        self.dispatch(Action::SetDocument {
            document: Box::new(document),
        });
    }

    pub fn statistics(&self) -> CoverStatistics {
        calculate_statistics(&self.document)
    }
}
