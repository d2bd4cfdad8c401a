//! JSON snapshots of a document
//!
//! A snapshot is the camelCase JSON form of [`Document`]. Missing fields fall
//! back to their defaults and unknown fields are ignored, so older or newer
//! snapshots still load.

use std::path::Path;

use crate::types::{CoverError, Result};

use super::document::Document;

/// Serialize a document as pretty-printed JSON
pub fn to_json(document: &Document) -> Result<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| CoverError::Snapshot(format!("Failed to serialize document: {}", e)))
}

/// Parse a document from JSON
pub fn from_json(json: &str) -> Result<Document> {
    serde_json::from_str(json)
        .map_err(|e| CoverError::Snapshot(format!("Failed to parse document: {}", e)))
}

/// Load a document snapshot from a JSON file
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let bytes = tokio::fs::read(path).await?;
    let document = serde_json::from_slice(&bytes)
        .map_err(|e| CoverError::Snapshot(format!("Failed to parse document: {}", e)))?;
    Ok(document)
}

/// Save a document snapshot to a JSON file
pub async fn save_document(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(document)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
