//! Values the presentation layer renders.
//!
//! Everything here is derived from the state (or the host context) on
//! demand; nothing is stored.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::identity::{PlatformSdk, UserProfile};
use crate::poll;
use crate::state::AppState;
use crate::streak::StreakEngine;

const DEFAULT_CLIENT_NAME: &str = "Farcaster";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakView {
    pub count: u32,
    pub checked_in_today: bool,
    /// "✅" once checked in today, "0" otherwise.
    pub status_flag: String,
    pub note: String,
}

pub fn streak_view<Tz: TimeZone>(engine: &StreakEngine, state: &AppState, now: &DateTime<Tz>) -> StreakView {
    let checked_in_today = engine.checked_in_today(state, now);
    let (status_flag, note) = if checked_in_today {
        ("✅", "GM already sent today.")
    } else {
        ("0", "You have not sent your GM today yet.")
    };

    StreakView {
        count: state.gm_streak,
        checked_in_today,
        status_flag: status_flag.to_string(),
        note: note.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollView {
    pub pct_yes: u32,
    pub pct_no: u32,
    pub total: u64,
    /// CSS width, e.g. "33%".
    pub bar_yes: String,
    pub bar_no: String,
    pub meta: String,
}

pub fn poll_view(state: &AppState) -> PollView {
    let summary = poll::percentages(state);
    let plural = if summary.total > 1 { "s" } else { "" };

    PollView {
        pct_yes: summary.pct_yes,
        pct_no: summary.pct_no,
        total: summary.total,
        bar_yes: format!("{}%", summary.pct_yes),
        bar_no: format!("{}%", summary.pct_no),
        meta: format!("{} vote{plural} total", summary.total),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletView {
    pub connected: bool,
    pub text: String,
}

pub fn wallet_view(state: &AppState) -> WalletView {
    match state.wallet_address.as_deref() {
        Some(address) if !address.is_empty() => WalletView {
            connected: true,
            text: format!("Connected: {}", shorten_address(address)),
        },
        _ => WalletView {
            connected: false,
            text: "No wallet connected".to_string(),
        },
    }
}

/// First six and last four characters around an ellipsis.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}...{tail}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub name: String,
    pub id_text: String,
}

pub fn user_view(profile: &UserProfile) -> UserView {
    let id_text = match profile.fid {
        Some(fid) => format!("fid: {fid}"),
        None => "fid: unknown".to_string(),
    };
    UserView {
        name: profile.label().to_string(),
        id_text,
    }
}

/// Where the widget is running, as far as the host context tells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnvHint {
    /// No host SDK: plain browser or local development.
    Standalone,
    Client {
        name: String,
        safe_area_insets: serde_json::Value,
    },
    /// SDK present, context without client information.
    PartialContext,
    ContextFailed,
}

impl fmt::Display for EnvHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvHint::Standalone => f.write_str("Outside the host app (local dev / browser)."),
            EnvHint::Client {
                name,
                safe_area_insets,
            } => write!(f, "Client: {name} • safeAreaInsets: {safe_area_insets}"),
            EnvHint::PartialContext => f.write_str("SDK detected but context is partial."),
            EnvHint::ContextFailed => f.write_str("SDK present but reading the context failed."),
        }
    }
}

/// JavaScript truthiness: `null`, `false`, `0` and `""` count as absent.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

pub async fn env_hint(sdk: Option<&dyn PlatformSdk>) -> EnvHint {
    let Some(sdk) = sdk else {
        return EnvHint::Standalone;
    };

    match sdk.context().await {
        Ok(context) => match context.client {
            Some(client) => EnvHint::Client {
                name: client
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
                safe_area_insets: client
                    .safe_area_insets
                    .filter(is_truthy)
                    .unwrap_or_else(|| serde_json::json!({})),
            },
            None => EnvHint::PartialContext,
        },
        Err(e) => {
            tracing::warn!(error = %e, "host context unreadable");
            EnvHint::ContextFailed
        }
    }
}
