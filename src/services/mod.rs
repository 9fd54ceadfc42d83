// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod itinerary;
pub mod route;
pub mod scoring;
pub mod share;
pub mod want_to_go;

pub use itinerary::{ItineraryOverview, ItineraryService, NewItinerary, StopUpdate};
pub use scoring::{ScoringEngine, ScoringError};
pub use share::{SharePayload, ShareSigner};
pub use want_to_go::WantToGoService;
