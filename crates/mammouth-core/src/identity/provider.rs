//! External identity providers.
//!
//! The host SDK and the browser wallet are collaborators outside this crate.
//! They are reached through object-safe traits returning boxed futures so a
//! chain can hold heterogeneous providers.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{HostContext, UserProfile};
use crate::error::{CoreError, IdentityError};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The host app SDK.
pub trait PlatformSdk: Send + Sync {
    /// Read the host context. Every call is a fresh read.
    fn context(&self) -> BoxFuture<'_, Result<HostContext, IdentityError>>;

    /// Whether `sign_in` is exposed by this host.
    fn supports_sign_in(&self) -> bool {
        false
    }

    /// Ask the host to authenticate the user. The nonce only tags the
    /// attempt; the returned value is opaque.
    fn sign_in<'a>(
        &'a self,
        _nonce: &'a str,
    ) -> BoxFuture<'a, Result<serde_json::Value, IdentityError>> {
        Box::pin(async {
            Err::<serde_json::Value, _>(IdentityError::SignInFailed("sign-in not supported".into()))
        })
    }
}

/// An EVM browser wallet (the `eth_requestAccounts` request).
pub trait BrowserWallet: Send + Sync {
    /// Ordered account identifiers. May be rejected by the user.
    fn request_accounts(&self) -> BoxFuture<'_, Result<Vec<String>, IdentityError>>;
}

/// Scripted sign-in behavior of a [`StaticPlatformSdk`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInScript {
    /// User visible in the context once sign-in succeeded.
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// When set, sign-in fails with this message.
    #[serde(default)]
    pub error: Option<String>,
    /// Raw value returned by sign-in.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// Data-driven host SDK, loaded from JSON by the CLI and used in tests.
///
/// ```json
/// { "context": { "user": null }, "signIn": { "user": { "fid": 3 } } }
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPlatformSdk {
    #[serde(default)]
    pub context: HostContext,
    /// When set, every context read fails with this message.
    #[serde(default)]
    pub context_error: Option<String>,
    /// Absent means the host has no sign-in action.
    #[serde(default)]
    pub sign_in: Option<SignInScript>,
    #[serde(skip)]
    nonces: Mutex<Vec<String>>,
    #[serde(skip)]
    context_reads: AtomicUsize,
}

impl StaticPlatformSdk {
    pub fn with_context(context: HostContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            context_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_sign_in(mut self, script: SignInScript) -> Self {
        self.sign_in = Some(script);
        self
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Nonces received by successful sign-ins, oldest first.
    pub fn nonces(&self) -> Vec<String> {
        self.nonces
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn context_reads(&self) -> usize {
        self.context_reads.load(Ordering::SeqCst)
    }

    fn signed_in(&self) -> bool {
        !self
            .nonces
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_empty()
    }

    fn current_context(&self) -> Result<HostContext, IdentityError> {
        self.context_reads.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.context_error {
            return Err(IdentityError::ContextFailed(message.clone()));
        }

        let mut context = self.context.clone();
        if context.user.is_none() && self.signed_in() {
            context.user = self.sign_in.as_ref().and_then(|s| s.user.clone());
        }
        Ok(context)
    }
}

impl PlatformSdk for StaticPlatformSdk {
    fn context(&self) -> BoxFuture<'_, Result<HostContext, IdentityError>> {
        Box::pin(async move { self.current_context() })
    }

    fn supports_sign_in(&self) -> bool {
        self.sign_in.is_some()
    }

    fn sign_in<'a>(
        &'a self,
        nonce: &'a str,
    ) -> BoxFuture<'a, Result<serde_json::Value, IdentityError>> {
        Box::pin(async move {
            let Some(script) = &self.sign_in else {
                return Err(IdentityError::SignInFailed("sign-in not supported".into()));
            };
            if let Some(message) = &script.error {
                return Err(IdentityError::SignInFailed(message.clone()));
            }

            self.nonces
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(nonce.to_string());
            Ok(script
                .result
                .clone()
                .unwrap_or_else(|| serde_json::json!({ "nonce": nonce })))
        })
    }
}

/// Data-driven browser wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticWallet {
    #[serde(default)]
    pub accounts: Vec<String>,
    /// When set, the account request is rejected with this message.
    #[serde(default)]
    pub error: Option<String>,
}

impl StaticWallet {
    pub fn with_accounts<I, A>(accounts: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            accounts: accounts.into_iter().map(Into::into).collect(),
            error: None,
        }
    }

    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            accounts: Vec::new(),
            error: Some(message.into()),
        }
    }
}

impl BrowserWallet for StaticWallet {
    fn request_accounts(&self) -> BoxFuture<'_, Result<Vec<String>, IdentityError>> {
        Box::pin(async move {
            match &self.error {
                Some(message) => Err(IdentityError::RequestRejected(message.clone())),
                None => Ok(self.accounts.clone()),
            }
        })
    }
}
