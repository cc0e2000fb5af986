//! Storage trait abstraction.

use async_trait::async_trait;
use noveltrack_core::{Snapshot, TrackerError};
use std::path::{Path, PathBuf};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the tracker model
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Persistence boundary for snapshot documents.
///
/// The store itself stays synchronous; only moving bytes in and out of the
/// process goes through here.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Read the saved state, or `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Persist the current state.
    async fn save(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Write an export file and return where it landed.
    async fn export_to(&self, path: &Path, snapshot: &Snapshot) -> Result<PathBuf>;

    /// Read raw bytes of an import file.
    async fn read_import(&self, path: &Path) -> Result<Vec<u8>>;
}
