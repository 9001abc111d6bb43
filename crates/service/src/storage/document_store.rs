use std::{path::PathBuf, sync::Arc};
use tokio::fs;
use tracing::warn;

use crate::errors::ServiceError;
use models::Document;

/// File-backed store for the whole document.
///
/// There is no in-memory copy: `read` reloads the file every time and
/// `write` rewrites it in full. Writes go straight to the target path with
/// no temp-file-then-rename and no fsync, so a crash mid-write can truncate
/// the document. Concurrent read-modify-write callers can lose updates; the
/// file itself is the only coordination point.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    /// Build a handle for the given path. No filesystem access happens here.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { path: path.into() })
    }

    /// Create the document with empty maps if the file cannot be read.
    /// A readable file is left untouched, whatever it contains.
    pub async fn ensure(&self) -> Result<(), ServiceError> {
        if fs::read(&self.path).await.is_err() {
            warn!(path = %self.path.display(), "document missing or unreadable, creating empty");
            self.write(&Document::default()).await?;
        }
        Ok(())
    }

    /// Load and deserialize the full document.
    pub async fn read(&self) -> Result<Document, ServiceError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| ServiceError::Io(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Serialize and persist the full document.
    pub async fn write(&self, doc: &Document) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(doc).map_err(|e| ServiceError::Serialize(e.to_string()))?;
        fs::write(&self.path, data)
            .await
            .map_err(|e| ServiceError::Io(e.to_string()))
    }
}
