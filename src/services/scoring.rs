// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary scoring: points, diversity bonus, streaks and badges.
//!
//! Everything here is pure and synchronous. Callers own persistence and
//! must inject `now`; nothing reads the clock.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

use crate::models::{Badge, CompletionRecord, Itinerary, ItineraryId, RewardProfile, Stop};
use crate::time_utils::{calendar_day, is_previous_day};

/// Points per stop marked done.
pub const POINTS_PER_LOCATION: u32 = 10;
/// Bonus per distinct region visited in one itinerary.
pub const DIVERSITY_BONUS_PER_UNIQUE: u32 = 5;

const DIVERSITY_EXPLORER_MIN_REGIONS: u32 = 2;
const STREAK_BADGE_DAYS: u32 = 7;
const POINTS_PER_LEVEL: u64 = 100;

/// Distinct-region count and the bonus it earns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiversityScore {
    pub unique_count: u32,
    pub bonus: u32,
}

/// Scoring with configurable point constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringEngine {
    points_per_location: u32,
    diversity_bonus_per_unique: u32,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(POINTS_PER_LOCATION, DIVERSITY_BONUS_PER_UNIQUE)
    }
}

impl ScoringEngine {
    pub fn new(points_per_location: u32, diversity_bonus_per_unique: u32) -> Self {
        Self {
            points_per_location,
            diversity_bonus_per_unique,
        }
    }

    pub fn diversity_score(&self, stops: &[Stop]) -> DiversityScore {
        let regions: HashSet<&str> = stops
            .iter()
            .map(|s| region_tag_of(&s.name))
            .filter(|tag| !tag.is_empty())
            .collect();

        let unique_count = u32::try_from(regions.len()).unwrap_or(u32::MAX);
        DiversityScore {
            unique_count,
            bonus: unique_count.saturating_mul(self.diversity_bonus_per_unique),
        }
    }

    /// Points the itinerary is currently worth. Read-only, safe for display.
    pub fn points_for_itinerary(&self, itinerary: &Itinerary) -> u32 {
        let done = u32::try_from(itinerary.done_count()).unwrap_or(u32::MAX);
        done.saturating_mul(self.points_per_location)
            .saturating_add(self.diversity_score(&itinerary.stops).bonus)
    }

    /// Perform the one-time completion transition.
    ///
    /// Marks the itinerary completed, appends a history entry and credits the
    /// profile. Refuses an already-completed itinerary instead of paying out
    /// twice.
    pub fn complete_itinerary(
        &self,
        itinerary: &mut Itinerary,
        profile: &mut RewardProfile,
        now: DateTime<Utc>,
    ) -> Result<CompletionRecord, ScoringError> {
        if itinerary.completed {
            return Err(ScoringError::AlreadyCompleted { id: itinerary.id });
        }
        if !itinerary.all_stops_done() {
            return Err(ScoringError::NotAllStopsDone {
                id: itinerary.id,
                remaining: itinerary.stops.len() - itinerary.done_count(),
            });
        }

        let points = self.points_for_itinerary(itinerary);
        let unique_count = self.diversity_score(&itinerary.stops).unique_count;

        itinerary.completed = true;
        itinerary.completed_at = Some(now);

        let record = CompletionRecord {
            title: itinerary.title.clone(),
            points,
            completed_at: now,
            unique_count,
        };
        profile.history.push(record.clone());
        profile.points = profile.points.saturating_add(u64::from(points));

        Ok(record)
    }
}

/// Heuristic region of a place name: its last non-empty comma segment.
///
/// `"Eiffel Tower, Paris, France"` yields `"France"`. Names without a usable
/// segment yield `""`.
pub fn region_tag_of(name: &str) -> &str {
    name.split(',')
        .map(str::trim)
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

/// Consecutive calendar days with a completion, counted back from the most
/// recent one.
///
/// Several completions on one day count as a single day.
pub fn compute_streak(history: &[CompletionRecord]) -> u32 {
    let mut days: Vec<NaiveDate> = history
        .iter()
        .map(|entry| calendar_day(entry.completed_at))
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some((&latest, older)) = days.split_first() else {
        return 0;
    };

    let mut streak = 1;
    let mut cursor = latest;
    for &day in older {
        if !is_previous_day(day, cursor) {
            break;
        }
        streak += 1;
        cursor = day;
    }
    streak
}

/// Recompute the streak and grant every badge the profile now qualifies for.
///
/// Existing badges are kept even if their condition no longer holds. Returns
/// only the badges granted by this call.
pub fn award_badges(profile: &mut RewardProfile) -> Vec<Badge> {
    profile.streak = compute_streak(&profile.history);

    let earned: Vec<Badge> = Badge::ALL
        .into_iter()
        .filter(|badge| qualifies(profile, *badge))
        .collect();

    earned
        .into_iter()
        .filter(|badge| profile.grant(*badge))
        .collect()
}

fn qualifies(profile: &RewardProfile, badge: Badge) -> bool {
    match badge {
        Badge::FirstCompletion => !profile.history.is_empty(),
        Badge::DiversityExplorer => profile
            .history
            .iter()
            .any(|entry| entry.unique_count >= DIVERSITY_EXPLORER_MIN_REGIONS),
        Badge::Points100 => profile.points >= 100,
        Badge::Points500 => profile.points >= 500,
        Badge::Streak7 => profile.streak >= STREAK_BADGE_DAYS,
    }
}

/// Rewards level shown next to the point total; starts at 1.
pub fn level_from_points(points: u64) -> u64 {
    points / POINTS_PER_LEVEL + 1
}

/// Errors from the completion transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("Itinerary {id} is already completed")]
    AlreadyCompleted { id: ItineraryId },

    #[error("Itinerary {id} still has {remaining} stop(s) left")]
    NotAllStopsDone { id: ItineraryId, remaining: usize },
}
