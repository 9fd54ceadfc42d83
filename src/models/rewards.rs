// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reward profile, completion history and badge models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Immutable record appended when an itinerary is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Itinerary title at completion time (a snapshot, not a live reference)
    pub title: String,
    pub points: u32,
    pub completed_at: DateTime<Utc>,
    /// Distinct region tags across the itinerary's stops
    pub unique_count: u32,
}

/// Aggregate gamification state for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardProfile {
    // ─── Authoritative ───────────────────────────────────────────
    /// Total points; only ever increased by completions
    #[serde(default)]
    pub points: u64,
    /// Append-only completion log, in insertion order
    #[serde(default)]
    pub history: Vec<CompletionRecord>,
    /// Badge identifiers in the order they were granted; never revoked
    #[serde(default)]
    pub badges: Vec<String>,

    // ─── Derived ─────────────────────────────────────────────────
    /// Last computed streak (recomputed from history, cached for display)
    #[serde(default)]
    pub streak: u32,
}

impl RewardProfile {
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.iter().any(|b| b == badge.id())
    }

    /// Add a badge if missing. Returns `true` if it was newly granted.
    pub fn grant(&mut self, badge: Badge) -> bool {
        if self.has_badge(badge) {
            return false;
        }
        self.badges.push(badge.id().to_string());
        true
    }
}

/// Achievement flags derived from profile state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    FirstCompletion,
    DiversityExplorer,
    Points100,
    Points500,
    Streak7,
}

impl Badge {
    pub const ALL: [Badge; 5] = [
        Badge::FirstCompletion,
        Badge::DiversityExplorer,
        Badge::Points100,
        Badge::Points500,
        Badge::Streak7,
    ];

    /// Stored identifier, shared with the front end.
    pub fn id(&self) -> &'static str {
        match self {
            Badge::FirstCompletion => "first-completion",
            Badge::DiversityExplorer => "diversity-explorer",
            Badge::Points100 => "100-points",
            Badge::Points500 => "500-points",
            Badge::Streak7 => "streak-7",
        }
    }
}

/// Rewards panel data for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RewardsSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub points: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub level: u64,
    pub streak: u32,
    pub badges: Vec<String>,
    pub completions: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_is_idempotent() {
        let mut profile = RewardProfile::default();
        assert!(profile.grant(Badge::Points100));
        assert!(!profile.grant(Badge::Points100));
        assert_eq!(profile.badges, vec!["100-points".to_string()]);
    }

    #[test]
    fn test_unknown_stored_badges_survive_round_trip() {
        let json = r#"{"points":40,"badges":["beta-tester"]}"#;
        let mut profile: RewardProfile = serde_json::from_str(json).expect("profile parses");
        profile.grant(Badge::FirstCompletion);
        assert_eq!(profile.badges, vec!["beta-tester", "first-completion"]);
        assert!(profile.history.is_empty());
        assert_eq!(profile.streak, 0);
    }
}
