//! The single persisted record of the mini app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// All mutable application data.
///
/// Serialized as a flat JSON document. Field names follow the stored
/// record (`gmStreak`, `lastGMDate`, ...) so an existing record from the
/// browser widget loads unchanged. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Consecutive daily check-ins.
    #[serde(rename = "gmStreak")]
    pub gm_streak: u32,

    /// Instant of the most recent check-in.
    #[serde(rename = "lastGMDate")]
    pub last_gm_date: Option<DateTime<Utc>>,

    #[serde(rename = "pollYes")]
    pub poll_yes: u32,

    #[serde(rename = "pollNo")]
    pub poll_no: u32,

    /// Last acquired wallet identifier. Opaque, never validated.
    #[serde(rename = "walletAddress")]
    pub wallet_address: Option<String>,
}

impl AppState {
    /// State of a profile that has never been used.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_checked_in(&self) -> bool {
        self.last_gm_date.is_some()
    }
}
