//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup. Invalid scoring constants fail here rather than
//! surfacing later as odd point totals.

use ring::rand::{SecureRandom, SystemRandom};
use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::services::scoring::{ScoringEngine, DIVERSITY_BONUS_PER_UNIQUE, POINTS_PER_LOCATION};

const SHARE_KEY_BYTES: usize = 32;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    // --- Scoring ---
    /// Points per completed stop
    pub points_per_location: u32,
    /// Bonus per distinct region in an itinerary
    pub diversity_bonus_per_unique: u32,

    // --- Sharing ---
    /// Front end origin that share links point at
    pub public_url: String,
    /// HMAC key for share links (raw bytes)
    pub share_key: Vec<u8>,

    // --- Storage & logging ---
    /// Directory for the JSON file store; `None` keeps state in memory
    pub data_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("points_per_location", &self.points_per_location)
            .field("diversity_bonus_per_unique", &self.diversity_bonus_per_unique)
            .field("public_url", &self.public_url)
            .field("share_key", &"<redacted>")
            .field("data_dir", &self.data_dir)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            points_per_location: POINTS_PER_LOCATION,
            diversity_bonus_per_unique: DIVERSITY_BONUS_PER_UNIQUE,
            public_url: "http://localhost:5173".to_string(),
            share_key: b"test_share_key_32_bytes_minimum!".to_vec(),
            data_dir: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Alias for `Default`, reads better in test setup.
    pub fn test_default() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let share_key = match env::var("ADVENTRA_SHARE_KEY") {
            Ok(key) if !key.trim().is_empty() => key.trim().as_bytes().to_vec(),
            _ => {
                tracing::warn!(
                    "ADVENTRA_SHARE_KEY not set, generated an ephemeral key; \
                     share links will not survive a restart"
                );
                random_key()?
            }
        };

        Ok(Self {
            points_per_location: non_negative("ADVENTRA_POINTS_PER_LOCATION", POINTS_PER_LOCATION)?,
            diversity_bonus_per_unique: non_negative(
                "ADVENTRA_DIVERSITY_BONUS",
                DIVERSITY_BONUS_PER_UNIQUE,
            )?,
            public_url: env::var("ADVENTRA_PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            share_key,
            data_dir: env::var("ADVENTRA_DATA_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            log_format: match env::var("ADVENTRA_LOG_FORMAT") {
                Err(_) => LogFormat::Json,
                Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
                    "json" | "" => LogFormat::Json,
                    "pretty" | "text" => LogFormat::Pretty,
                    _ => return Err(ConfigError::Invalid("ADVENTRA_LOG_FORMAT", v)),
                },
            },
        })
    }

    pub fn scoring_engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.points_per_location, self.diversity_bonus_per_unique)
    }
}

/// Read an optional non-negative integer, falling back to `default`.
fn non_negative(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(name, raw.clone()))?;
    if value < 0 {
        return Err(ConfigError::Negative(name, value));
    }
    u32::try_from(value).map_err(|_| ConfigError::Invalid(name, raw))
}

fn random_key() -> Result<Vec<u8>, ConfigError> {
    let mut key = vec![0u8; SHARE_KEY_BYTES];
    SystemRandom::new()
        .fill(&mut key)
        .map_err(|_| ConfigError::Random)?;
    Ok(key)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),

    #[error("{0} must not be negative, got {1}")]
    Negative(&'static str, i64),

    #[error("Failed to generate a random share key")]
    Random,
}
