// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod itinerary;
pub mod rewards;
pub mod user;
pub mod want_to_go;

pub use itinerary::{Itinerary, ItineraryId, Stop};
pub use rewards::{Badge, CompletionRecord, RewardProfile, RewardsSummary};
pub use user::{UserId, UserState};
pub use want_to_go::{AddOutcome, WantToGo};
