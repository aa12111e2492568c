//! Load/save of the [`AppState`] record.
//!
//! Loading never fails. A missing record yields a fresh state, and a record
//! that cannot be read or parsed is replaced by defaults. Which path was
//! taken is reported through [`LoadOutcome`].

use crate::error::Result;
use crate::state::AppState;
use crate::storage::KeyValueStore;

/// Versioned key of the state record.
pub const DEFAULT_STATE_KEY: &str = "mammouth-app-state-v1";

/// How a state was obtained by [`StateStore::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored record was parsed.
    Loaded(AppState),
    /// No record exists yet (or the record is JSON `null`).
    Fresh(AppState),
    /// The record was unreadable or not valid JSON for the state shape.
    DefaultedDueToCorruption { state: AppState, reason: String },
}

impl LoadOutcome {
    pub fn state(&self) -> &AppState {
        match self {
            LoadOutcome::Loaded(state)
            | LoadOutcome::Fresh(state)
            | LoadOutcome::DefaultedDueToCorruption { state, .. } => state,
        }
    }

    pub fn into_state(self) -> AppState {
        match self {
            LoadOutcome::Loaded(state)
            | LoadOutcome::Fresh(state)
            | LoadOutcome::DefaultedDueToCorruption { state, .. } => state,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, LoadOutcome::DefaultedDueToCorruption { .. })
    }
}

/// A key-value store bound to the state key.
#[derive(Debug)]
pub struct StateStore<S> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, DEFAULT_STATE_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn load(&self) -> LoadOutcome {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored state, starting fresh");
                return LoadOutcome::Fresh(AppState::default());
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "state unreadable, using defaults");
                return LoadOutcome::DefaultedDueToCorruption {
                    state: AppState::default(),
                    reason: e.to_string(),
                };
            }
        };

        match serde_json::from_str::<Option<AppState>>(&raw) {
            Ok(Some(state)) => LoadOutcome::Loaded(state),
            Ok(None) => LoadOutcome::Fresh(AppState::default()),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "state corrupt, using defaults");
                LoadOutcome::DefaultedDueToCorruption {
                    state: AppState::default(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Serializes and writes the full record, replacing any previous one.
    pub fn save(&mut self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.kv.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, "state saved");
        Ok(())
    }
}
