//! Where the session's document snapshot is kept between runs

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::{Result, RuntimeError};

/// Stores and restores the raw document JSON
pub trait PersistSink {
    fn persist(&mut self, json: String) -> impl Future<Output = Result<()>> + Send;

    /// `None` when nothing has been stored yet
    fn restore(&mut self) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Keeps the snapshot in one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistSink for JsonFileSink {
    fn persist(&mut self, json: String) -> impl Future<Output = Result<()>> + Send {
        let path = self.path.clone();
        async move {
            tokio::fs::write(&path, json).await?;
            Ok(())
        }
    }

    fn restore(&mut self) -> impl Future<Output = Result<Option<String>>> + Send {
        let path = self.path.clone();
        async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(json) => Ok(Some(json)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// In-memory sink, for tests and for hosts without storage
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    stored: Option<String>,
    writes: usize,
    fail: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that already holds `json`
    pub fn with_snapshot(json: impl Into<String>) -> Self {
        Self {
            stored: Some(json.into()),
            ..Self::default()
        }
    }

    /// A sink whose writes always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<&str> {
        self.stored.as_deref()
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PersistSink for MemorySink {
    fn persist(&mut self, json: String) -> impl Future<Output = Result<()>> + Send {
        let result = if self.fail {
            Err(RuntimeError::Persist("storage unavailable".to_string()))
        } else {
            self.stored = Some(json);
            self.writes += 1;
            Ok(())
        };
        async move { result }
    }

    fn restore(&mut self) -> impl Future<Output = Result<Option<String>>> + Send {
        let stored = self.stored.clone();
        async move { Ok(stored) }
    }
}
