//! Storage layer.
//!
//! State is stored per user as one document with an optimistic `version`.
//! `RewardsStore::save` is a check-and-set: it only succeeds when the stored
//! version still equals the version the caller loaded.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{UserId, UserState};

/// Attempts before a conflicting update is reported to the caller.
const MAX_UPDATE_ATTEMPTS: usize = 5;

/// Injected persistence for per-user state.
pub trait RewardsStore: Clone + Send + Sync + 'static {
    /// Load a user's state; unknown users get `UserState::default()`.
    fn load(&self, user: &UserId) -> impl Future<Output = Result<UserState>> + Send;

    /// Persist `state` if the stored version still equals `state.version`.
    ///
    /// Returns the new version, or `AppError::VersionConflict`.
    fn save(&self, user: &UserId, state: &UserState) -> impl Future<Output = Result<u64>> + Send;
}

/// Per-user lock map, shared by every service built on one repository.
///
/// An entry lives only while some update for that user holds or awaits it.
pub type UserLocks = Arc<DashMap<UserId, Arc<Mutex<()>>>>;

/// Read-modify-write access to user state.
///
/// Writers for one user are serialized within this repository. Writers in
/// other repositories or processes are caught by the store's version check,
/// which each store must make atomic across all of its handles.
#[derive(Clone)]
pub struct StateRepository<S> {
    store: S,
    locks: UserLocks,
}

impl<S: RewardsStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn load(&self, user: &UserId) -> Result<UserState> {
        self.store.load(user).await
    }

    /// Apply `apply` to freshly loaded state and save it.
    ///
    /// On a version conflict the state is reloaded and `apply` runs again, so
    /// it must derive everything from the state it is given. If `apply`
    /// returns an error nothing is saved.
    pub async fn update<T, F>(&self, user: &UserId, mut apply: F) -> Result<T>
    where
        F: FnMut(&mut UserState) -> Result<T> + Send,
        T: Send,
    {
        let lock = self
            .locks
            .entry(user.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let result = {
            let _guard = lock.lock().await;
            self.update_locked(user, &mut apply).await
        };

        // Evict once no other update holds a handle to this user's lock.
        drop(lock);
        self.locks
            .remove_if(user, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    async fn update_locked<T, F>(&self, user: &UserId, apply: &mut F) -> Result<T>
    where
        F: FnMut(&mut UserState) -> Result<T> + Send,
        T: Send,
    {
        let mut attempt = 1;
        loop {
            let mut state = self.store.load(user).await?;
            let output = apply(&mut state)?;

            match self.store.save(user, &state).await {
                Ok(version) => {
                    tracing::debug!(user = %user, version, "User state saved");
                    return Ok(output);
                }
                Err(err) if err.is_conflict() && attempt < MAX_UPDATE_ATTEMPTS => {
                    tracing::warn!(user = %user, attempt, "State changed underneath us, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Like `update`, but skips the write when `apply` reports no change.
    pub async fn update_if<T, F>(&self, user: &UserId, mut apply: F) -> Result<T>
    where
        F: FnMut(&mut UserState) -> Result<(T, bool)> + Send,
        T: Send,
    {
        let state = self.store.load(user).await?;
        let (output, changed) = apply(&mut state.clone())?;
        if !changed {
            return Ok(output);
        }
        self.update(user, |state| apply(state).map(|(output, _)| output))
            .await
    }
}

pub(crate) fn conflict(user: &UserId) -> AppError {
    AppError::VersionConflict(user.to_string())
}
