// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scoring engine behavior on realistic itineraries.

use adventra::models::{Badge, Itinerary, RewardProfile};
use adventra::services::scoring::{
    award_badges, compute_streak, region_tag_of, ScoringEngine, ScoringError,
};

mod common;
use common::{completion, day, done_stop, stop};

fn paris_london() -> Itinerary {
    let mut it = Itinerary::new(1, "Paris & London");
    it.stops = vec![
        stop("Eiffel Tower, Paris, France"),
        stop("Louvre, Paris, France"),
        stop("Big Ben, London, UK"),
    ];
    it
}

#[test]
fn test_diversity_bonus_example() {
    let it = paris_london();
    let tags: Vec<&str> = it.stops.iter().map(|s| region_tag_of(&s.name)).collect();
    assert_eq!(tags, vec!["France", "France", "UK"]);

    let score = ScoringEngine::default().diversity_score(&it.stops);
    assert_eq!(score.unique_count, 2);
    assert_eq!(score.bonus, 10);
}

#[test]
fn test_display_points_are_idempotent() {
    let engine = ScoringEngine::default();
    let mut it = paris_london();
    it.stops[0].done = true;
    let before = it.clone();

    let first = engine.points_for_itinerary(&it);
    let second = engine.points_for_itinerary(&it);

    assert_eq!(first, second);
    assert_eq!(first, 10 + 10);
    assert_eq!(it, before, "display computation must not mutate");
}

#[test]
fn test_points_monotonic_across_completions() {
    let engine = ScoringEngine::default();
    let mut profile = RewardProfile::default();
    let mut awarded = Vec::new();
    let mut last_total = 0;

    for (i, names) in [
        vec!["Shibuya, Tokyo, Japan"],
        vec!["Oia, Santorini, Greece", "Fira, Santorini, Greece"],
        vec!["Central Park, NYC, USA", "Louvre, Paris, France"],
    ]
    .into_iter()
    .enumerate()
    {
        let mut it = Itinerary::new(i as u64 + 1, format!("Trip {}", i));
        it.stops = names.into_iter().map(done_stop).collect();

        let record = engine
            .complete_itinerary(&mut it, &mut profile, day(2024, 2, i as u32 + 1))
            .expect("fresh itinerary completes");
        awarded.push(record.points);

        assert!(profile.points >= last_total);
        last_total = profile.points;
    }

    assert_eq!(awarded, vec![15, 25, 30]);
    assert_eq!(profile.points, awarded.iter().map(|p| u64::from(*p)).sum::<u64>());
    assert_eq!(profile.history.len(), 3);
}

#[test]
fn test_streak_example_any_order() {
    let history = vec![
        completion(day(2024, 1, 2), 10),
        completion(day(2024, 1, 3), 10),
        completion(day(2024, 1, 1), 10),
    ];
    assert_eq!(compute_streak(&history), 3);
}

#[test]
fn test_streak_restarts_after_gap() {
    let history = vec![
        completion(day(2024, 1, 1), 10),
        completion(day(2024, 1, 2), 10),
        completion(day(2024, 1, 3), 10),
        completion(day(2024, 1, 5), 10),
    ];
    assert_eq!(compute_streak(&history), 1);
}

#[test]
fn test_badges_are_never_revoked() {
    let mut profile = RewardProfile {
        points: 150,
        history: vec![completion(day(2024, 1, 1), 150)],
        ..Default::default()
    };
    award_badges(&mut profile);
    assert!(profile.has_badge(Badge::Points100));

    // Points wrongly reduced by some external writer
    profile.points = 20;
    let granted = award_badges(&mut profile);

    assert!(granted.is_empty());
    assert!(profile.has_badge(Badge::Points100));
    assert!(profile.has_badge(Badge::FirstCompletion));
}

#[test]
fn test_point_badges_at_exact_thresholds() {
    let profile_with = |points: u64| RewardProfile {
        points,
        history: vec![completion(day(2024, 1, 1), 10)],
        ..Default::default()
    };

    let mut below = profile_with(99);
    assert!(!award_badges(&mut below).contains(&Badge::Points100));
    assert!(!below.has_badge(Badge::Points100));

    let mut at = profile_with(100);
    assert!(award_badges(&mut at).contains(&Badge::Points100));
    assert!(!at.has_badge(Badge::Points500));

    let mut just_short = profile_with(499);
    award_badges(&mut just_short);
    assert!(just_short.has_badge(Badge::Points100));
    assert!(!just_short.has_badge(Badge::Points500));
}

#[test]
fn test_five_hundred_points_badge() {
    let mut profile = RewardProfile {
        points: 500,
        history: vec![completion(day(2024, 1, 1), 500)],
        ..Default::default()
    };
    let granted = award_badges(&mut profile);
    assert!(granted.contains(&Badge::Points100));
    assert!(granted.contains(&Badge::Points500));
    assert!(!granted.contains(&Badge::DiversityExplorer));
}

#[test]
fn test_completion_transition() {
    let engine = ScoringEngine::default();
    let mut profile = RewardProfile::default();
    let mut it = Itinerary::new(1, "Santorini");
    it.stops = vec![done_stop("Oia, Santorini, Greece"), stop("Red Beach, Santorini, Greece")];

    // Second stop not yet done: no transition
    assert!(!it.ready_to_complete());
    assert!(matches!(
        engine.complete_itinerary(&mut it, &mut profile, day(2024, 6, 1)),
        Err(ScoringError::NotAllStopsDone { .. })
    ));

    it.stops[1].done = true;
    let expected = engine.points_for_itinerary(&it);
    let record = engine
        .complete_itinerary(&mut it, &mut profile, day(2024, 6, 1))
        .expect("completes");

    assert!(it.completed);
    assert_eq!(it.completed_at, Some(day(2024, 6, 1)));
    assert_eq!(profile.history.len(), 1);
    assert_eq!(record.points, expected);
    assert_eq!(record.title, "Santorini");
    assert_eq!(record.unique_count, 1);
}
