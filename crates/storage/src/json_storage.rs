//! JSON file storage implementation.
//!
//! Keeps the tracker state as one pretty-printed snapshot in `data.json`
//! under a root directory.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use noveltrack_core::Snapshot;
use tokio::fs;
use tracing::{debug, info};
use super::{SnapshotStorage, Result};

/// Default file name for exports.
pub const DEFAULT_EXPORT_FILE: &str = "novel-tracker-export.json";

const DATA_FILE: &str = "data.json";

/// File-based JSON storage backend.
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn data_path(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }
}

#[async_trait]
impl SnapshotStorage for JsonFileStorage {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(self.data_path()).await {
            Ok(bytes) => {
                debug!(path = %self.data_path().display(), len = bytes.len(), "state loaded");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        write_atomic(&self.data_path(), &json).await?;
        debug!(novels = snapshot.novels.len(), notifications = snapshot.notifications.len(), "state saved");
        Ok(())
    }

    async fn export_to(&self, path: &Path, snapshot: &Snapshot) -> Result<PathBuf> {
        let target = if fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false) {
            path.join(DEFAULT_EXPORT_FILE)
        } else {
            path.to_path_buf()
        };
        write_atomic(&target, &snapshot.to_json_bytes()?).await?;
        info!(path = %target.display(), "snapshot exported");
        Ok(target)
    }

    async fn read_import(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path).await?)
    }
}

/// Write through a sibling temp file, then rename over the target.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
