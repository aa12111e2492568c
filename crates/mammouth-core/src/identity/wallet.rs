//! Wallet acquisition: host context first, browser wallet second.

use std::sync::Arc;

use serde::Serialize;

use super::chain::{Attempt, AttemptKind, AttemptRecord, ChainReport, ProviderChain, Strategy};
use super::provider::{BoxFuture, BrowserWallet, PlatformSdk};
use crate::error::IdentityError;

pub const HOST_CONTEXT_WALLET: &str = "host-context-wallet";
pub const BROWSER_WALLET: &str = "browser-wallet";

/// Wallet exposed by the host context.
pub struct HostContextWallet {
    sdk: Option<Arc<dyn PlatformSdk>>,
}

impl HostContextWallet {
    pub fn new(sdk: Option<Arc<dyn PlatformSdk>>) -> Self {
        Self { sdk }
    }
}

impl Strategy<String> for HostContextWallet {
    fn name(&self) -> &str {
        HOST_CONTEXT_WALLET
    }

    fn attempt<'a>(&'a self, notes: &'a mut Vec<String>) -> BoxFuture<'a, Attempt<String>> {
        Box::pin(async move {
            let Some(sdk) = &self.sdk else {
                return Attempt::Unavailable;
            };
            notes.push("Fetching host context...".to_string());
            match sdk.context().await {
                Ok(context) => match context.wallet_address() {
                    Some(address) => Attempt::Acquired(address.to_string()),
                    None => {
                        notes.push("No wallet in the host context.".to_string());
                        Attempt::Empty
                    }
                },
                Err(e) => Attempt::Failed(e),
            }
        })
    }
}

/// First account granted by the browser wallet.
pub struct BrowserWalletAccounts {
    wallet: Option<Arc<dyn BrowserWallet>>,
}

impl BrowserWalletAccounts {
    pub fn new(wallet: Option<Arc<dyn BrowserWallet>>) -> Self {
        Self { wallet }
    }
}

impl Strategy<String> for BrowserWalletAccounts {
    fn name(&self) -> &str {
        BROWSER_WALLET
    }

    fn attempt<'a>(&'a self, notes: &'a mut Vec<String>) -> BoxFuture<'a, Attempt<String>> {
        Box::pin(async move {
            let Some(wallet) = &self.wallet else {
                notes.push("Browser wallet not detected.".to_string());
                return Attempt::Unavailable;
            };
            notes.push("Requesting browser wallet accounts...".to_string());
            match wallet.request_accounts().await {
                Ok(accounts) => match accounts.into_iter().next() {
                    Some(first) => Attempt::Acquired(first),
                    None => {
                        notes.push("No account returned by the browser wallet.".to_string());
                        Attempt::Empty
                    }
                },
                Err(e) => Attempt::Failed(e),
            }
        })
    }
}

/// How a wallet connection ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WalletOutcome {
    Connected { address: String, source: String },
    /// No provider could even be asked.
    NoWalletAvailable,
    /// The last provider answered without an account.
    NoAccounts,
    /// The last provider call failed or was rejected.
    Failed { message: String },
}

impl WalletOutcome {
    /// Blocking message for the user, when the outcome warrants one.
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            WalletOutcome::NoWalletAvailable => Some("No wallet detected. Install a browser wallet."),
            WalletOutcome::Failed { .. } => Some("Could not connect to the wallet."),
            WalletOutcome::Connected { .. } | WalletOutcome::NoAccounts => None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            WalletOutcome::Connected { address, .. } => Some(address),
            _ => None,
        }
    }

    /// Classify from the final attempt of the chain.
    fn from_report(report: ChainReport<String>) -> Self {
        if let Some((source, address)) = report.acquired {
            return WalletOutcome::Connected { address, source };
        }
        match report.attempts.last() {
            None
            | Some(AttemptRecord {
                kind: AttemptKind::Unavailable,
                ..
            }) => WalletOutcome::NoWalletAvailable,
            Some(AttemptRecord {
                kind: AttemptKind::Failed,
                error,
                ..
            }) => WalletOutcome::Failed {
                message: error
                    .as_ref()
                    .map(IdentityError::to_string)
                    .unwrap_or_else(|| "unknown error".to_string()),
            },
            Some(_) => WalletOutcome::NoAccounts,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletConnection {
    pub outcome: WalletOutcome,
    pub attempts: Vec<AttemptRecord>,
}

/// The wallet chain. Failures move on to the next provider.
pub struct WalletConnector {
    chain: ProviderChain<String>,
}

impl WalletConnector {
    pub fn new(
        sdk: Option<Arc<dyn PlatformSdk>>,
        browser: Option<Arc<dyn BrowserWallet>>,
        include_browser: bool,
    ) -> Self {
        let mut chain = ProviderChain::new().with(HostContextWallet::new(sdk));
        if include_browser {
            chain = chain.with(BrowserWalletAccounts::new(browser));
        }
        Self::from_chain(chain)
    }

    pub fn from_chain(chain: ProviderChain<String>) -> Self {
        Self { chain }
    }

    pub async fn connect(&self) -> WalletConnection {
        let report = self.chain.run().await;
        let attempts = report.attempts.clone();
        let outcome = WalletOutcome::from_report(report);
        tracing::info!(?outcome, "wallet connection finished");
        WalletConnection { outcome, attempts }
    }
}
