// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use adventra::config::Config;
use adventra::db::MemoryStore;
use adventra::models::{CompletionRecord, Stop, UserId};
use adventra::AppState;
use chrono::{DateTime, TimeZone, Utc};

/// Create a test app backed by the in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> AppState<MemoryStore> {
    AppState::new(Config::test_default(), MemoryStore::new())
}

#[allow(dead_code)]
pub fn user(email: &str) -> UserId {
    UserId::parse(email).expect("valid user id")
}

/// Noon UTC on the given day.
#[allow(dead_code)]
pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn stop(name: &str) -> Stop {
    Stop::new(name, "")
}

#[allow(dead_code)]
pub fn done_stop(name: &str) -> Stop {
    Stop {
        done: true,
        ..Stop::new(name, "")
    }
}

#[allow(dead_code)]
pub fn completion(when: DateTime<Utc>, points: u32) -> CompletionRecord {
    CompletionRecord {
        title: format!("Trip on {}", when.date_naive()),
        points,
        completed_at: when,
        unique_count: 1,
    }
}
