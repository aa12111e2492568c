//! Best-effort wallet and user identity acquisition.
//!
//! Two providers may be present: the host app's platform SDK and a browser
//! wallet. Each acquisition flow is an ordered [`ProviderChain`] of named
//! strategies where the first success wins.

pub mod chain;
pub mod provider;
pub mod user;
pub mod wallet;

pub use chain::{Attempt, AttemptKind, AttemptRecord, ChainReport, ProviderChain, Strategy};
pub use provider::{BoxFuture, BrowserWallet, PlatformSdk, SignInScript, StaticPlatformSdk, StaticWallet};
pub use user::{generate_nonce, UserConnection, UserConnector, UserOutcome};
pub use wallet::{WalletConnection, WalletConnector, WalletOutcome};

use serde::{Deserialize, Serialize};

/// What the host exposes through its asynchronous context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostContext {
    #[serde(default)]
    pub wallet: Option<WalletInfo>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub client: Option<ClientInfo>,
}

impl HostContext {
    /// Wallet address, treating an empty string as absent.
    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet
            .as_ref()
            .and_then(|w| w.address.as_deref())
            .filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    #[serde(default)]
    pub address: Option<String>,
}

/// Platform user identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub fid: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Display name, then username, then "User".
    pub fn label(&self) -> &str {
        [&self.display_name, &self.username]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("User")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub safe_area_insets: Option<serde_json::Value>,
}
