//! JSON file history store: `<dir>/<user id>_data.json` holding a JSON array of turn lines.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use relay_core::UserId;
use tracing::{debug, instrument};

use crate::error::HistoryError;
use crate::store::HistoryStore;

/// File-per-user store. Writes go to a temp file in the same directory and are renamed over the
/// target, so readers see either the previous or the new array, never a partial one.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    dir: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the history file for `user`.
    pub fn path_for(&self, user: &UserId) -> PathBuf {
        self.dir.join(format!("{}_data.json", user))
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    #[instrument(skip(self))]
    async fn load(&self, user: &UserId) -> Result<Vec<String>, HistoryError> {
        let path = self.path_for(user);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(user_id = %user, "No history file yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(HistoryError::Io { path, source }),
        };
        let history: Vec<String> = serde_json::from_slice(&bytes)
            .map_err(|source| HistoryError::Malformed { path, source })?;
        debug!(user_id = %user, turns = history.len(), "History loaded");
        Ok(history)
    }

    #[instrument(skip(self, history), fields(turns = history.len()))]
    async fn persist(&self, user: &UserId, history: &[String]) -> Result<(), HistoryError> {
        let bytes = serde_json::to_vec(history)?;
        let dir = self.dir.clone();
        let path = self.path_for(user);
        let task_path = path.clone();
        tokio::task::spawn_blocking(move || write_replace(&dir, &task_path, &bytes))
            .await
            .map_err(|e| HistoryError::Io {
                path: path.clone(),
                source: std::io::Error::other(e),
            })?
            .map_err(|source| HistoryError::Io { path, source })
    }
}

fn write_replace(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
