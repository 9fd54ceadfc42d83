//! Per-user identity and persisted state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;
use crate::models::{Itinerary, ItineraryId, RewardProfile, WantToGo};

/// User key supplied by the auth collaborator (an email address in practice).
///
/// Normalized by trimming and lowercasing so `Ana@Example.com ` and
/// `ana@example.com` share one state document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AppError::BadRequest("Missing user id".to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything stored for one user, read and written as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserState {
    /// Optimistic concurrency counter, bumped by the store on every save
    #[serde(default)]
    pub version: u64,
    /// Next id handed out by `allocate_itinerary_id`
    #[serde(default = "first_itinerary_id")]
    pub next_itinerary_id: ItineraryId,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub profile: RewardProfile,
    #[serde(default)]
    pub want_to_go: Vec<WantToGo>,
}

fn first_itinerary_id() -> ItineraryId {
    1
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            version: 0,
            next_itinerary_id: first_itinerary_id(),
            itineraries: Vec::new(),
            profile: RewardProfile::default(),
            want_to_go: Vec::new(),
        }
    }
}

impl UserState {
    pub fn allocate_itinerary_id(&mut self) -> ItineraryId {
        let id = self.next_itinerary_id;
        self.next_itinerary_id += 1;
        id
    }

    pub fn itinerary(&self, id: ItineraryId) -> Option<&Itinerary> {
        self.itineraries.iter().find(|it| it.id == id)
    }

    pub fn itinerary_mut(&mut self, id: ItineraryId) -> Option<&mut Itinerary> {
        self.itineraries.iter_mut().find(|it| it.id == id)
    }
}
