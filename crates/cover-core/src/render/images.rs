//! Image readiness tracking for the interactive surface
//!
//! Image sources decode asynchronously. Until a source is ready, ops that
//! draw it are dropped from the draw list; a failed source simply never
//! draws.

use std::collections::HashMap;

use crate::model::{Document, ObjectKind};

use super::draw::{DrawList, DrawOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Pending,
    Ready { width: u32, height: u32 },
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    statuses: HashMap<String, ImageStatus>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `src` pending; returns `true` if a decode should be started.
    /// That is the case for an untracked source and for one that failed
    /// before.
    pub fn request(&mut self, src: &str) -> bool {
        match self.statuses.get(src) {
            Some(ImageStatus::Pending | ImageStatus::Ready { .. }) => false,
            Some(ImageStatus::Failed) | None => {
                self.statuses.insert(src.to_string(), ImageStatus::Pending);
                true
            }
        }
    }

    pub fn resolve(&mut self, src: &str, width: u32, height: u32) {
        self.statuses
            .insert(src.to_string(), ImageStatus::Ready { width, height });
    }

    pub fn fail(&mut self, src: &str) {
        self.statuses.insert(src.to_string(), ImageStatus::Failed);
    }

    pub fn status(&self, src: &str) -> Option<ImageStatus> {
        self.statuses.get(src).copied()
    }

    pub fn is_ready(&self, src: &str) -> bool {
        matches!(self.status(src), Some(ImageStatus::Ready { .. }))
    }

    /// Forget every source `document` no longer draws
    pub fn retain_referenced(&mut self, document: &Document) {
        let referenced = referenced_sources(document);
        self.statuses
            .retain(|src, _| referenced.iter().any(|r| r == src));
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Sources that need a decode, in first-use order
    pub fn request_all(&mut self, document: &Document) -> Vec<String> {
        referenced_sources(document)
            .into_iter()
            .filter(|src| self.request(src))
            .collect()
    }
}

impl DrawList {
    /// Drop image ops whose source is not ready
    pub fn retain_ready(&mut self, registry: &ImageRegistry) {
        self.ops.retain(|op| match op {
            DrawOp::Image(image) | DrawOp::WrapImage(image) => registry.is_ready(&image.src),
            _ => true,
        });
    }
}

/// Every distinct image source a document draws: the wrap image first, then
/// visible image objects of the back and front panels
pub fn referenced_sources(document: &Document) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    let mut push = |src: &str| {
        if !src.is_empty() && !sources.iter().any(|s| s == src) {
            sources.push(src.to_string());
        }
    };

    if document.wrap_image.is_drawable() {
        push(&document.wrap_image.src);
    }
    for panel in [&document.back, &document.front] {
        for obj in panel.objects.iter().filter(|obj| obj.visible) {
            if let ObjectKind::Image(image) = &obj.kind {
                push(&image.src);
            }
        }
    }

    sources
}
