// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View-only itinerary share links.
//!
//! The `payload` query parameter is URL-safe base64 (no padding) of
//! `"{json}|{signature_hex}"`, where the signature is HMAC-SHA256 over the
//! JSON. Links carry the whole itinerary, so no lookup is needed to view one.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::models::Itinerary;

type HmacSha256 = Hmac<Sha256>;

/// Route the front end serves shared itineraries from.
pub const SHARED_ITINERARY_PATH: &str = "/shared-itinerary";

const SHARE_ID_BYTES: usize = 8;

/// Decoded contents of a share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePayload {
    /// Random share id
    pub id: String,
    /// Snapshot of the shared itinerary
    pub data: Itinerary,
    /// Creation time in epoch milliseconds
    pub ts: i64,
}

/// Creates and verifies signed share payloads.
#[derive(Clone)]
pub struct ShareSigner {
    key: Vec<u8>,
    rng: SystemRandom,
}

impl ShareSigner {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            rng: SystemRandom::new(),
        }
    }

    /// Encode a signed payload for `itinerary`.
    pub fn encode(&self, itinerary: &Itinerary, now: DateTime<Utc>) -> Result<String, ShareError> {
        let mut id_bytes = [0u8; SHARE_ID_BYTES];
        self.rng
            .fill(&mut id_bytes)
            .map_err(|_| ShareError::Random)?;

        let payload = SharePayload {
            id: hex::encode(id_bytes),
            data: itinerary.clone(),
            ts: now.timestamp_millis(),
        };
        let json = serde_json::to_string(&payload)?;
        let signature = hex::encode(self.mac(json.as_bytes())?.finalize().into_bytes());

        Ok(URL_SAFE_NO_PAD.encode(format!("{}|{}", json, signature)))
    }

    /// Full link under `base_url`, e.g. `https://app.example/shared-itinerary?payload=...`.
    pub fn create_link(
        &self,
        base_url: &str,
        itinerary: &Itinerary,
        now: DateTime<Utc>,
    ) -> Result<String, ShareError> {
        let payload = self.encode(itinerary, now)?;
        Ok(format!(
            "{}{}?payload={}",
            base_url.trim_end_matches('/'),
            SHARED_ITINERARY_PATH,
            payload
        ))
    }

    /// Verify and decode a payload. Any tampering or malformed input yields `None`.
    pub fn decode(&self, payload: &str) -> Option<SharePayload> {
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim()).ok()?;
        let text = String::from_utf8(bytes).ok()?;

        // The JSON may itself contain '|', the signature never does.
        let (json, signature_hex) = text.rsplit_once('|')?;
        let signature = hex::decode(signature_hex).ok()?;

        if self.mac(json.as_bytes()).ok()?.verify_slice(&signature).is_err() {
            tracing::warn!("Share payload signature mismatch, rejecting");
            return None;
        }

        serde_json::from_str(json).ok()
    }

    fn mac(&self, message: &[u8]) -> Result<HmacSha256, ShareError> {
        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|_| ShareError::InvalidKey)?;
        mac.update(message);
        Ok(mac)
    }
}

/// Errors from creating share links.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Failed to generate share id")]
    Random,

    #[error("Share signing key is unusable")]
    InvalidKey,

    #[error("Failed to serialize itinerary: {0}")]
    Serialize(#[from] serde_json::Error),
}
