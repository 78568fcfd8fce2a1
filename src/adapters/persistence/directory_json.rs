//! Implements DirectoryStore using a JSON file.
//!
//! The file holds the full JID directory under a `data` key plus the capture
//! timestamp. A missing or unreadable file is not an error: load reports
//! nothing cached and the caller rebuilds from the service.

use crate::domain::{Directory, DomainError};
use crate::ports::DirectoryStore;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// JSON file-based directory storage.
pub struct DirectoryJson {
    path: std::path::PathBuf,
}

impl DirectoryJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl DirectoryStore for DirectoryJson {
    /// Read the cached directory. Absent file, unreadable file, and JSON that
    /// no longer parses all come back as `None`; the prior file is left as-is.
    async fn load(&self) -> Option<Directory> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(_) => return None,
        };
        match serde_json::from_str(&text) {
            Ok(directory) => Some(directory),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "cached directory unreadable");
                None
            }
        }
    }

    /// Atomic save using the write-replace pattern:
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    /// A crash mid-write leaves the previous file intact.
    async fn save(&self, directory: &Directory) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Store(format!("create cache dir: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(directory)
            .map_err(|e| DomainError::Store(e.to_string()))?;

        // Write to temp file first
        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Store(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Store(format!("write temp file: {}", e)))?;
        // Ensure data is flushed to disk before rename
        f.sync_all()
            .await
            .map_err(|e| DomainError::Store(format!("sync temp file: {}", e)))?;
        drop(f); // Close file handle before rename

        // Atomic rename: replaces target file in one operation
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Store(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}
