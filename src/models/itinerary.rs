// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Itinerary and stop models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Stable itinerary identifier, unique per user and never reused.
pub type ItineraryId = u64;

/// One planned location within an itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Display name, e.g. "Eiffel Tower, Paris, France"
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub desc: String,
    /// Latitude; numeric strings are accepted, anything else is treated as absent
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: Option<f64>,
    /// Longitude; same coercion rules as `lat`
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub note: String,
}

impl Stop {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            ..Default::default()
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Valid `(lat, lng)` pair, or `None` if either half is missing or out of range.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.filter(|v| (-90.0..=90.0).contains(v))?;
        let lng = self.lng.filter(|v| (-180.0..=180.0).contains(v))?;
        Some((lat, lng))
    }
}

/// An ordered sequence of stops owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: ItineraryId,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    /// The front end historically called these `locations`.
    #[serde(default, alias = "locations")]
    pub stops: Vec<Stop>,
    /// Planned travel date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    /// Set once, on the transition to completed
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Itinerary {
    pub fn new(id: ItineraryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            notes: String::new(),
            stops: Vec::new(),
            date: None,
            completed: false,
            completed_at: None,
        }
    }

    pub fn done_count(&self) -> usize {
        self.stops.iter().filter(|s| s.done).count()
    }

    /// True when there is at least one stop and every stop is done.
    pub fn all_stops_done(&self) -> bool {
        !self.stops.is_empty() && self.stops.iter().all(|s| s.done)
    }

    /// Eligible for the one-time completion transition.
    pub fn ready_to_complete(&self) -> bool {
        !self.completed && self.all_stops_done()
    }

    pub fn stop_mut(&mut self, index: usize) -> Option<&mut Stop> {
        self.stops.get_mut(index)
    }
}

/// Accept a JSON number or numeric string; everything else becomes `None`.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()))
}
