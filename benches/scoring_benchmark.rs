use adventra::models::{CompletionRecord, Itinerary, RewardProfile, Stop};
use adventra::services::scoring::{award_badges, compute_streak, ScoringEngine};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const REGIONS: [&str; 6] = ["France", "UK", "Japan", "Greece", "USA", "Italy"];

fn benchmark_scoring(c: &mut Criterion) {
    // A heavy user: three years of near-daily completions, a few per day
    let start = Utc.with_ymd_and_hms(2022, 1, 1, 9, 0, 0).unwrap();
    let history: Vec<CompletionRecord> = (0..3 * 365 * 3)
        .map(|i| CompletionRecord {
            title: format!("Trip {}", i),
            points: 25,
            completed_at: start + Duration::hours(8 * i64::from(i)),
            unique_count: 2,
        })
        .collect();

    let mut itinerary = Itinerary::new(1, "Grand tour");
    itinerary.stops = (0..200)
        .map(|i| Stop {
            done: i % 3 != 0,
            ..Stop::new(format!("Stop {}, City {}, {}", i, i % 17, REGIONS[i % REGIONS.len()]), "")
        })
        .collect();

    let engine = ScoringEngine::default();
    let mut group = c.benchmark_group("scoring");

    group.bench_function("compute_streak_long_history", |b| {
        b.iter(|| compute_streak(black_box(&history)))
    });

    group.bench_function("award_badges_long_history", |b| {
        b.iter(|| {
            let mut profile = RewardProfile {
                points: 25 * history.len() as u64,
                history: history.clone(),
                ..Default::default()
            };
            award_badges(black_box(&mut profile))
        })
    });

    group.bench_function("points_for_large_itinerary", |b| {
        b.iter(|| engine.points_for_itinerary(black_box(&itinerary)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_scoring);
criterion_main!(benches);
