//! # Mammouth Core Library
//!
//! Core logic for the Mammouth mini app widget: a daily GM check-in streak,
//! a two-option poll and a wallet/user identity bridge, all kept in a single
//! persisted record. The CLI is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **State Store**: one JSON record in a local key-value store, loaded at
//!   start and saved after every mutation; corrupt data degrades to defaults
//! - **Streak Engine**: calendar-day comparison deciding whether a check-in
//!   continues, resets or is ignored
//! - **Poll Tally**: yes/no counters and per-side rounded percentages
//! - **Identity Bridge**: ordered provider strategies for wallet and user
//!   acquisition, first success wins
//!
//! ## Key Components
//!
//! - [`MiniApp`]: controller owning the live state
//! - [`StateStore`]: load/save with an explicit [`LoadOutcome`]
//! - [`StreakEngine`]: check-in rules
//! - [`ProviderChain`]: strategy chain behind both identity flows
//! - [`Config`]: application configuration management

pub mod app;
pub mod error;
pub mod identity;
pub mod log;
pub mod poll;
pub mod state;
pub mod storage;
pub mod streak;
pub mod view;

pub use app::MiniApp;
pub use error::{ConfigError, CoreError, IdentityError, StorageError};
pub use identity::{
    BrowserWallet, HostContext, PlatformSdk, ProviderChain, StaticPlatformSdk, StaticWallet,
    UserOutcome, UserProfile, WalletOutcome,
};
pub use log::{EventLog, LogLine};
pub use poll::{PollSummary, VoteChoice, VoteOutcome};
pub use state::AppState;
pub use storage::{Config, FileStore, KeyValueStore, LoadOutcome, MemoryStore, StateStore};
pub use streak::{CheckInOutcome, StreakEngine};
pub use view::{EnvHint, PollView, StreakView, UserView, WalletView};
