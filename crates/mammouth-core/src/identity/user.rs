//! User identity acquisition through the host SDK.
//!
//! There is no fallback outside the host: without an SDK the flow ends in
//! guest mode. Inside the host, the context is read first and sign-in is
//! attempted only when it carries no user.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use super::chain::{Attempt, AttemptKind, AttemptRecord, ProviderChain, Strategy};
use super::provider::{BoxFuture, PlatformSdk};
use super::UserProfile;

pub const HOST_CONTEXT_USER: &str = "host-context-user";
pub const HOST_SIGN_IN: &str = "host-sign-in";

const NONCE_LEN: usize = 16;

/// Fresh single-use nonce for a sign-in attempt.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// User already present in the host context.
pub struct HostContextUser {
    sdk: Option<Arc<dyn PlatformSdk>>,
}

impl HostContextUser {
    pub fn new(sdk: Option<Arc<dyn PlatformSdk>>) -> Self {
        Self { sdk }
    }
}

impl Strategy<UserProfile> for HostContextUser {
    fn name(&self) -> &str {
        HOST_CONTEXT_USER
    }

    fn attempt<'a>(&'a self, notes: &'a mut Vec<String>) -> BoxFuture<'a, Attempt<UserProfile>> {
        Box::pin(async move {
            let Some(sdk) = &self.sdk else {
                return Attempt::Unavailable;
            };
            notes.push("Requesting user info from the host...".to_string());
            match sdk.context().await {
                Ok(context) => match context.user {
                    Some(user) => Attempt::Acquired(user),
                    None => {
                        notes.push("No user in the host context. Sign-in may be required.".to_string());
                        Attempt::Empty
                    }
                },
                Err(e) => Attempt::Failed(e),
            }
        })
    }
}

/// Sign in with a fresh nonce, then read the context once more.
pub struct HostSignIn {
    sdk: Option<Arc<dyn PlatformSdk>>,
}

impl HostSignIn {
    pub fn new(sdk: Option<Arc<dyn PlatformSdk>>) -> Self {
        Self { sdk }
    }
}

impl Strategy<UserProfile> for HostSignIn {
    fn name(&self) -> &str {
        HOST_SIGN_IN
    }

    fn attempt<'a>(&'a self, notes: &'a mut Vec<String>) -> BoxFuture<'a, Attempt<UserProfile>> {
        Box::pin(async move {
            let sdk = match &self.sdk {
                Some(sdk) if sdk.supports_sign_in() => sdk,
                _ => return Attempt::Unavailable,
            };

            let nonce = generate_nonce();
            let raw = match sdk.sign_in(&nonce).await {
                Ok(raw) => raw,
                Err(e) => return Attempt::Failed(e),
            };
            notes.push(format!("Sign-in raw result: {raw}"));

            match sdk.context().await {
                Ok(context) => context.user.map_or(Attempt::Empty, Attempt::Acquired),
                Err(e) => Attempt::Failed(e),
            }
        })
    }
}

/// How a user connection ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UserOutcome {
    Connected { profile: UserProfile, source: String },
    /// No host SDK.
    GuestMode,
    /// Host present but no identity, even after sign-in.
    NotFound,
    Failed { message: String },
}

impl UserOutcome {
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            UserOutcome::GuestMode => Some("User sign-in is only available inside the host app."),
            UserOutcome::Failed { .. } => Some("Could not fetch the user."),
            UserOutcome::Connected { .. } | UserOutcome::NotFound => None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            UserOutcome::Connected { profile, .. } => Some(profile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserConnection {
    pub outcome: UserOutcome,
    pub attempts: Vec<AttemptRecord>,
}

/// The user chain. A failure ends the flow.
pub struct UserConnector {
    chain: ProviderChain<UserProfile>,
}

impl UserConnector {
    pub fn new(sdk: Option<Arc<dyn PlatformSdk>>, sign_in_enabled: bool) -> Self {
        let mut chain = ProviderChain::new()
            .with(HostContextUser::new(sdk.clone()))
            .stop_on_failure(true);
        if sign_in_enabled {
            chain = chain.with(HostSignIn::new(sdk));
        }
        Self { chain }
    }

    pub async fn connect(&self) -> UserConnection {
        let report = self.chain.run().await;

        let outcome = if let Some((source, profile)) = report.acquired {
            UserOutcome::Connected { profile, source }
        } else if let Some(error) = report.first_error() {
            UserOutcome::Failed {
                message: error.to_string(),
            }
        } else if report
            .attempts
            .iter()
            .all(|a| a.kind == AttemptKind::Unavailable)
        {
            UserOutcome::GuestMode
        } else {
            UserOutcome::NotFound
        };

        tracing::info!(?outcome, "user connection finished");
        UserConnection {
            outcome,
            attempts: report.attempts,
        }
    }
}
