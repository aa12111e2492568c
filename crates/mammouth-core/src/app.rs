//! The mini app controller.
//!
//! Owns the one live [`AppState`] and applies every operation as
//! mutate, persist, then let the caller re-render from the views.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use crate::error::Result;
use crate::identity::{
    AttemptRecord, BrowserWallet, PlatformSdk, UserConnector, UserOutcome, UserProfile,
    WalletConnector, WalletOutcome,
};
use crate::log::EventLog;
use crate::poll::{self, VoteChoice, VoteOutcome};
use crate::state::AppState;
use crate::storage::{Config, IdentityConfig, KeyValueStore, LoadOutcome, StateStore};
use crate::streak::{CheckInOutcome, StreakEngine};
use crate::view::{self, EnvHint, PollView, StreakView, UserView, WalletView};

pub struct MiniApp<S> {
    store: StateStore<S>,
    state: AppState,
    initial_load: LoadOutcome,
    engine: StreakEngine,
    log: EventLog,
    identity: IdentityConfig,
    sdk: Option<Arc<dyn PlatformSdk>>,
    browser_wallet: Option<Arc<dyn BrowserWallet>>,
    user: Option<UserProfile>,
}

impl<S: KeyValueStore> MiniApp<S> {
    /// Load the state and start the event log.
    pub fn open(kv: S, config: &Config) -> Self {
        let store = StateStore::with_key(kv, config.storage.state_key.clone());
        let initial_load = store.load();
        let state = initial_load.state().clone();

        let mut log = EventLog::new(config.log.max_lines);
        log.push("Mini app initialized");
        if let LoadOutcome::DefaultedDueToCorruption { reason, .. } = &initial_load {
            tracing::warn!(%reason, "stored state replaced by defaults");
        }

        Self {
            store,
            state,
            initial_load,
            engine: StreakEngine::new(),
            log,
            identity: config.identity.clone(),
            sdk: None,
            browser_wallet: None,
            user: None,
        }
    }

    pub fn with_platform_sdk(mut self, sdk: Arc<dyn PlatformSdk>) -> Self {
        self.sdk = Some(sdk);
        self
    }

    pub fn with_browser_wallet(mut self, wallet: Arc<dyn BrowserWallet>) -> Self {
        self.browser_wallet = Some(wallet);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn initial_load(&self) -> &LoadOutcome {
        &self.initial_load
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// The user adopted by the last successful [`Self::connect_user`].
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.state)
    }

    pub fn check_in<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<CheckInOutcome> {
        let outcome = self.engine.check_in(&mut self.state, now);
        self.log.push(outcome.message());
        if outcome.is_mutation() {
            tracing::info!(streak = self.state.gm_streak, ?outcome, "check-in recorded");
        }
        self.persist()?;
        Ok(outcome)
    }

    /// Vote from an untrusted choice string. Unknown choices change nothing.
    pub fn vote(&mut self, raw: &str) -> Result<VoteOutcome> {
        let outcome = poll::vote_raw(&mut self.state, raw);
        if let VoteOutcome::Recorded(choice) = outcome {
            self.after_vote(choice)?;
        }
        Ok(outcome)
    }

    pub fn vote_choice(&mut self, choice: VoteChoice) -> Result<()> {
        poll::vote(&mut self.state, choice);
        self.after_vote(choice)
    }

    fn after_vote(&mut self, choice: VoteChoice) -> Result<()> {
        self.log
            .push(format!("Vote {} recorded", choice.as_str().to_uppercase()));
        self.persist()
    }

    pub fn reset_poll(&mut self) -> Result<()> {
        poll::reset(&mut self.state);
        self.persist()?;
        self.log.push("Votes reset");
        Ok(())
    }

    /// Run the wallet chain and adopt the address on success.
    ///
    /// Provider problems are reported in the outcome; only a failed save
    /// after adopting an address is an `Err`.
    pub async fn connect_wallet(&mut self) -> Result<WalletOutcome> {
        let connector = WalletConnector::new(
            self.sdk.clone(),
            self.browser_wallet.clone(),
            self.identity.browser_wallet_enabled,
        );
        let connection = connector.connect().await;
        self.record_attempts(&connection.attempts);

        if let WalletOutcome::Connected { address, source } = &connection.outcome {
            self.state.wallet_address = Some(address.clone());
            self.persist()?;
            self.log.push(format!("Wallet connected via {source}: {address}"));
        }
        Ok(connection.outcome)
    }

    /// Copy provider notes and failures into the event log.
    fn record_attempts(&mut self, attempts: &[AttemptRecord]) {
        for attempt in attempts {
            for note in &attempt.notes {
                self.log.push(note.clone());
            }
            if attempt.error.is_some() {
                self.log.push(attempt.to_string());
            }
        }
    }

    /// Run the user chain and adopt the identity on success.
    ///
    /// The identity is kept for display only and is not persisted.
    pub async fn connect_user(&mut self) -> UserOutcome {
        let connector = UserConnector::new(self.sdk.clone(), self.identity.sign_in_enabled);
        let connection = connector.connect().await;
        self.record_attempts(&connection.attempts);

        match &connection.outcome {
            UserOutcome::Connected { profile, .. } => {
                self.log.push(format!(
                    "Host user detected: {}",
                    profile.username.as_deref().unwrap_or("unknown")
                ));
                self.user = Some(profile.clone());
            }
            UserOutcome::GuestMode => self.log.push("SDK not available, guest mode"),
            UserOutcome::NotFound | UserOutcome::Failed { .. } => {}
        }
        connection.outcome
    }

    pub async fn env_hint(&self) -> EnvHint {
        view::env_hint(self.sdk.as_deref()).await
    }

    pub fn streak_view<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> StreakView {
        view::streak_view(&self.engine, &self.state, now)
    }

    pub fn poll_view(&self) -> PollView {
        view::poll_view(&self.state)
    }

    pub fn wallet_view(&self) -> WalletView {
        view::wallet_view(&self.state)
    }

    pub fn user_view(&self) -> Option<UserView> {
        self.user.as_ref().map(view::user_view)
    }
}
