// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Adventra: rewards for finishing travel itineraries
//!
//! This crate provides the itinerary scoring engine (points, diversity
//! bonus, streaks and badges) and the services that apply it to stored
//! per-user state.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod time_utils;

use chrono::{DateTime, Utc};

use config::Config;
use db::{RewardsStore, StateRepository};
use error::{AppError, Result};
use models::{Itinerary, ItineraryId, UserId};
use services::{ItineraryService, ShareSigner, WantToGoService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState<S> {
    pub config: Config,
    pub itineraries: ItineraryService<S>,
    pub want_to_go: WantToGoService<S>,
    pub share: ShareSigner,
}

impl<S: RewardsStore> AppState<S> {
    pub fn new(config: Config, store: S) -> Self {
        let repo = StateRepository::new(store);
        Self {
            itineraries: ItineraryService::new(repo.clone(), config.scoring_engine()),
            want_to_go: WantToGoService::new(repo),
            share: ShareSigner::new(config.share_key.clone()),
            config,
        }
    }

    /// Build a view-only share link for one of the user's itineraries.
    pub async fn share_itinerary(
        &self,
        user: &UserId,
        id: ItineraryId,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let itinerary = self.itineraries.get_itinerary(user, id).await?;
        let link = self
            .share
            .create_link(&self.config.public_url, &itinerary, now)
            .map_err(|e| AppError::Internal(e.into()))?;

        tracing::info!(user = %user, itinerary_id = id, "Share link created");
        Ok(link)
    }

    /// Decode a shared itinerary from a link's `payload` parameter.
    pub fn open_shared(&self, payload: &str) -> Option<Itinerary> {
        self.share.decode(payload).map(|shared| shared.data)
    }
}
