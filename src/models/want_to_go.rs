//! "Want to go" wish list entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A destination the user wants to visit some day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantToGo {
    /// Destination name (trimmed)
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of adding a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}
