// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with stable error codes for the host application.

use crate::models::ItineraryId;
use crate::services::scoring::ScoringError;

/// Application error type returned by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Itinerary {0} is already completed")]
    AlreadyCompleted(ItineraryId),

    #[error("Concurrent update for user {0}, state changed since it was loaded")]
    VersionConflict(String),

    #[error("Storage error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable code, mirrored by the front end's error handling.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::AlreadyCompleted(_) => "already_completed",
            AppError::VersionConflict(_) => "version_conflict",
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Storage error");
                "database_error"
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                "internal_error"
            }
        }
    }

    /// Whether a retry with freshly loaded state may succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::VersionConflict(_))
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::AlreadyCompleted { id } => AppError::AlreadyCompleted(id),
            other @ ScoringError::NotAllStopsDone { .. } => AppError::BadRequest(other.to_string()),
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, AppError>;
