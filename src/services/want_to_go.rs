//! "Want to go" destination list.

use chrono::{DateTime, Utc};

use crate::db::{RewardsStore, StateRepository};
use crate::error::{AppError, Result};
use crate::models::{AddOutcome, UserId, WantToGo};

/// Per-user destination wish list, de-duplicated by destination.
#[derive(Clone)]
pub struct WantToGoService<S> {
    repo: StateRepository<S>,
}

impl<S: RewardsStore> WantToGoService<S> {
    pub fn new(repo: StateRepository<S>) -> Self {
        Self { repo }
    }

    pub async fn add(
        &self,
        user: &UserId,
        destination: &str,
        now: DateTime<Utc>,
    ) -> Result<AddOutcome> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(AppError::BadRequest("Missing destination".to_string()));
        }

        let outcome = self
            .repo
            .update_if(user, |state| {
                if state.want_to_go.iter().any(|w| w.destination == destination) {
                    return Ok((AddOutcome::AlreadyPresent, false));
                }
                state.want_to_go.push(WantToGo {
                    destination: destination.to_string(),
                    created_at: now,
                });
                Ok((AddOutcome::Added, true))
            })
            .await?;

        tracing::debug!(user = %user, destination, outcome = ?outcome, "Want-to-go add");
        Ok(outcome)
    }

    /// Entries newest first.
    pub async fn list(&self, user: &UserId) -> Result<Vec<WantToGo>> {
        let mut items = self.repo.load(user).await?.want_to_go;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}
