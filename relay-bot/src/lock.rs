//! Advisory process lock: at most one relay runs against a history directory.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

const RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Exclusive lock on a file, held until dropped. The file is left in place and holds the pid of
/// the last holder.
#[derive(Debug)]
pub struct ProcessLock {
    file: File,
    path: PathBuf,
}

impl ProcessLock {
    /// Tries to take the lock until `timeout` elapses. `Ok(None)` means another holder kept it.
    pub async fn acquire(path: impl AsRef<Path>, timeout: Duration) -> io::Result<Option<Self>> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)?;

        let deadline = Instant::now() + timeout;
        loop {
            match file.try_lock() {
                Ok(()) => break,
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        debug!(path = %path.display(), "Lock still held after timeout");
                        return Ok(None);
                    }
                    tokio::time::sleep(RETRY_INTERVAL).await;
                }
                Err(TryLockError::Error(e)) => return Err(e),
            }
        }

        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        write!(file, "{}", std::process::id())?;
        file.flush()?;
        info!(path = %path.display(), pid = std::process::id(), "Process lock acquired");
        Ok(Some(Self { file, path }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProcessLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        debug!(path = %self.path.display(), "Process lock released");
    }
}
