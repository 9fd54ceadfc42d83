// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary lifecycle service.
//!
//! Handles the core workflow:
//! 1. Load the user's state
//! 2. Apply the edit (create, add stop, mark done, annotate, remove)
//! 3. If every stop is now done, run the one-time completion transition
//! 4. Re-derive badges
//! 5. Save with a version check, retrying on conflict

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::db::{RewardsStore, StateRepository};
use crate::error::{AppError, Result};
use crate::models::{
    Badge, CompletionRecord, Itinerary, ItineraryId, RewardProfile, RewardsSummary, Stop, UserId,
    UserState,
};
use crate::services::route::route_length_meters;
use crate::services::scoring::{award_badges, level_from_points, ScoringEngine};
use crate::time_utils::format_utc_rfc3339;

const UNTITLED: &str = "Untitled itinerary";

/// Input for creating an itinerary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItinerary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "locations")]
    pub stops: Vec<Stop>,
}

/// Result of an edit that may complete the itinerary.
#[derive(Debug, Clone)]
pub struct StopUpdate {
    pub itinerary: Itinerary,
    /// History entry, present only when this edit completed the itinerary
    pub completion: Option<CompletionRecord>,
    pub new_badges: Vec<Badge>,
}

/// Display data for one itinerary.
#[derive(Debug, Clone)]
pub struct ItineraryOverview {
    pub itinerary: Itinerary,
    /// Current worth of the done stops plus diversity bonus
    pub points: u32,
    pub unique_regions: u32,
    pub route_length_meters: f64,
}

/// Itinerary edits and rewards bookkeeping over a `RewardsStore`.
#[derive(Clone)]
pub struct ItineraryService<S> {
    repo: StateRepository<S>,
    engine: ScoringEngine,
}

impl<S: RewardsStore> ItineraryService<S> {
    pub fn new(repo: StateRepository<S>, engine: ScoringEngine) -> Self {
        Self { repo, engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub async fn create_itinerary(
        &self,
        user: &UserId,
        input: NewItinerary,
        now: DateTime<Utc>,
    ) -> Result<StopUpdate> {
        let engine = self.engine;
        let update = self
            .repo
            .update(user, |state| {
                let id = state.allocate_itinerary_id();
                let title = input.title.trim();
                let mut itinerary =
                    Itinerary::new(id, if title.is_empty() { UNTITLED } else { title });
                itinerary.notes = input.notes.clone();
                itinerary.date = input.date;
                itinerary.stops = input.stops.clone();
                state.itineraries.push(itinerary);

                settle(&engine, user, state, id, now)
            })
            .await?;

        tracing::info!(
            user = %user,
            itinerary_id = update.itinerary.id,
            stops = update.itinerary.stops.len(),
            "Itinerary created"
        );
        Ok(update)
    }

    pub async fn add_stop(
        &self,
        user: &UserId,
        id: ItineraryId,
        stop: Stop,
        now: DateTime<Utc>,
    ) -> Result<StopUpdate> {
        let engine = self.engine;
        self.repo
            .update(user, |state| {
                let itinerary = find_mut(state, id)?;
                if itinerary.completed {
                    return Err(AppError::AlreadyCompleted(id));
                }
                itinerary.stops.push(stop.clone());
                settle(&engine, user, state, id, now)
            })
            .await
    }

    /// Set a stop's `done` flag.
    ///
    /// Completes the itinerary the first time all of its stops are done.
    /// Unchecking a stop of a completed itinerary is allowed but never takes
    /// the completion or its points back.
    pub async fn set_stop_done(
        &self,
        user: &UserId,
        id: ItineraryId,
        index: usize,
        done: bool,
        now: DateTime<Utc>,
    ) -> Result<StopUpdate> {
        let engine = self.engine;
        self.repo
            .update(user, |state| {
                stop_mut(find_mut(state, id)?, index)?.done = done;
                settle(&engine, user, state, id, now)
            })
            .await
    }

    /// Flip a stop's `done` flag.
    pub async fn toggle_stop(
        &self,
        user: &UserId,
        id: ItineraryId,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<StopUpdate> {
        let engine = self.engine;
        self.repo
            .update(user, |state| {
                let stop = stop_mut(find_mut(state, id)?, index)?;
                stop.done = !stop.done;
                settle(&engine, user, state, id, now)
            })
            .await
    }

    pub async fn set_stop_note(
        &self,
        user: &UserId,
        id: ItineraryId,
        index: usize,
        note: &str,
    ) -> Result<Itinerary> {
        self.repo
            .update(user, |state| {
                let itinerary = find_mut(state, id)?;
                stop_mut(itinerary, index)?.note = note.to_string();
                Ok(itinerary.clone())
            })
            .await
    }

    /// Delete an itinerary. Completion history and points are kept.
    pub async fn remove_itinerary(&self, user: &UserId, id: ItineraryId) -> Result<()> {
        self.repo
            .update(user, |state| {
                let before = state.itineraries.len();
                state.itineraries.retain(|it| it.id != id);
                if state.itineraries.len() == before {
                    return Err(not_found(id));
                }
                Ok(())
            })
            .await?;

        tracing::info!(user = %user, itinerary_id = id, "Itinerary removed");
        Ok(())
    }

    pub async fn get_itinerary(&self, user: &UserId, id: ItineraryId) -> Result<Itinerary> {
        self.repo
            .load(user)
            .await?
            .itinerary(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn list_itineraries(&self, user: &UserId) -> Result<Vec<Itinerary>> {
        Ok(self.repo.load(user).await?.itineraries)
    }

    pub async fn overview(&self, user: &UserId, id: ItineraryId) -> Result<ItineraryOverview> {
        let itinerary = self.get_itinerary(user, id).await?;
        Ok(ItineraryOverview {
            points: self.engine.points_for_itinerary(&itinerary),
            unique_regions: self.engine.diversity_score(&itinerary.stops).unique_count,
            route_length_meters: route_length_meters(&itinerary.stops),
            itinerary,
        })
    }

    /// Rewards panel data. Persists any badge the profile newly qualifies for.
    pub async fn rewards_summary(&self, user: &UserId) -> Result<RewardsSummary> {
        self.repo
            .update_if(user, |state| {
                let granted = award_badges(&mut state.profile);
                Ok((summarize(&state.profile), !granted.is_empty()))
            })
            .await
    }
}

fn summarize(profile: &RewardProfile) -> RewardsSummary {
    RewardsSummary {
        points: profile.points,
        level: level_from_points(profile.points),
        streak: profile.streak,
        badges: profile.badges.clone(),
        completions: u32::try_from(profile.history.len()).unwrap_or(u32::MAX),
    }
}

/// Complete the itinerary if it just became eligible, then re-derive badges.
fn settle(
    engine: &ScoringEngine,
    user: &UserId,
    state: &mut UserState,
    id: ItineraryId,
    now: DateTime<Utc>,
) -> Result<StopUpdate> {
    let UserState {
        itineraries,
        profile,
        ..
    } = state;
    let itinerary = itineraries
        .iter_mut()
        .find(|it| it.id == id)
        .ok_or_else(|| not_found(id))?;

    let completion = if itinerary.ready_to_complete() {
        let record = engine.complete_itinerary(itinerary, profile, now)?;
        tracing::info!(
            user = %user,
            itinerary_id = id,
            points = record.points,
            unique_regions = record.unique_count,
            completed_at = %format_utc_rfc3339(now),
            "Itinerary completed"
        );
        Some(record)
    } else {
        None
    };

    let new_badges = award_badges(profile);
    if !new_badges.is_empty() {
        tracing::info!(user = %user, badges = ?new_badges, "Badges granted");
    }

    Ok(StopUpdate {
        itinerary: itinerary.clone(),
        completion,
        new_badges,
    })
}

fn find_mut(state: &mut UserState, id: ItineraryId) -> Result<&mut Itinerary> {
    state.itinerary_mut(id).ok_or_else(|| not_found(id))
}

fn stop_mut(itinerary: &mut Itinerary, index: usize) -> Result<&mut Stop> {
    let id = itinerary.id;
    itinerary
        .stop_mut(index)
        .ok_or_else(|| AppError::BadRequest(format!("Itinerary {} has no stop {}", id, index)))
}

fn not_found(id: ItineraryId) -> AppError {
    AppError::NotFound(format!("itinerary {}", id))
}
