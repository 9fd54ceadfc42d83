//! JSON-file store: one document per user under a data directory.
//!
//! `save` holds `{user}.json.lock` (created with `create_new`) across the
//! version read, the compare and the rename, so every `FileStore` on the
//! same directory, in this process or another, sees one writer at a time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::db::{conflict, RewardsStore};
use crate::error::{AppError, Result};
use crate::models::{UserId, UserState};

/// Delay between attempts to take a held lock file.
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(2);
/// Give up waiting for a lock after this long.
const LOCK_TIMEOUT: Duration = Duration::from_secs(10);

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Stores `{data_dir}/{urlencoded user}.json`.
#[derive(Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::Database(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        tracing::info!(path = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    fn path_for(&self, user: &UserId) -> PathBuf {
        let safe_name = urlencoding::encode(user.as_str());
        self.dir.join(format!("{}.json", safe_name))
    }

    /// Fresh temp path per write, so writers never share a partial file.
    fn tmp_path_for(path: &Path) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        path.with_extension(format!("json.{}.{}.tmp", std::process::id(), seq))
    }

    async fn read(&self, path: &Path) -> Result<Option<UserState>> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => serde_json::from_str(&text).map(Some).map_err(|e| {
                AppError::Database(format!("Corrupt state file {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Database(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_locked(&self, user: &UserId, path: &Path, state: &UserState) -> Result<u64> {
        let stored_version = self.read(path).await?.map_or(0, |s| s.version);
        if stored_version != state.version {
            return Err(conflict(user));
        }

        let mut next = state.clone();
        next.version = stored_version + 1;
        let json = serde_json::to_vec_pretty(&next)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode state: {}", e)))?;

        // Write then rename so readers never observe a partial document.
        let tmp = Self::tmp_path_for(path);
        if let Err(e) = tokio::fs::write(&tmp, json).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(AppError::Database(format!(
                "Failed to write {}: {}",
                tmp.display(),
                e
            )));
        }
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(AppError::Database(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            )));
        }

        Ok(next.version)
    }
}

impl RewardsStore for FileStore {
    async fn load(&self, user: &UserId) -> Result<UserState> {
        Ok(self
            .read(&self.path_for(user))
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, user: &UserId, state: &UserState) -> Result<u64> {
        let path = self.path_for(user);
        let _lock = LockFile::acquire(path.with_extension("json.lock")).await?;
        self.write_locked(user, &path, state).await
    }
}

/// Exclusive lock held by the existence of a file; removed on drop.
struct LockFile {
    path: PathBuf,
}

impl LockFile {
    async fn acquire(path: PathBuf) -> Result<Self> {
        let started = tokio::time::Instant::now();
        loop {
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if started.elapsed() >= LOCK_TIMEOUT {
                        return Err(AppError::Database(format!(
                            "Timed out waiting for {} (remove it if no writer is running)",
                            path.display()
                        )));
                    }
                    tokio::time::sleep(LOCK_RETRY_DELAY).await;
                }
                Err(e) => {
                    return Err(AppError::Database(format!(
                        "Failed to lock {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to release lock file");
        }
    }
}
