//! In-memory store, used by tests and single-process deployments.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::db::{conflict, RewardsStore};
use crate::error::Result;
use crate::models::{UserId, UserState};

/// Process-local state keyed by user.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<UserId, UserState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with stored state.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl RewardsStore for MemoryStore {
    async fn load(&self, user: &UserId) -> Result<UserState> {
        Ok(self
            .users
            .get(user)
            .map(|state| state.clone())
            .unwrap_or_default())
    }

    async fn save(&self, user: &UserId, state: &UserState) -> Result<u64> {
        // The entry holds the shard lock, making compare and write atomic.
        match self.users.entry(user.clone()) {
            Entry::Occupied(mut stored) => {
                if stored.get().version != state.version {
                    return Err(conflict(user));
                }
                let mut next = state.clone();
                next.version += 1;
                let version = next.version;
                stored.insert(next);
                Ok(version)
            }
            Entry::Vacant(slot) => {
                if state.version != 0 {
                    return Err(conflict(user));
                }
                let mut next = state.clone();
                next.version = 1;
                slot.insert(next);
                Ok(1)
            }
        }
    }
}
