//! Ordered provider strategies, first success wins.
//!
//! Adding a provider is a matter of pushing another [`Strategy`] onto a
//! chain; the flows only interpret the resulting [`ChainReport`].

use std::fmt;

use serde::Serialize;

use super::provider::BoxFuture;
use crate::error::IdentityError;

/// Result of asking one provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<T> {
    /// The provider produced a value.
    Acquired(T),
    /// The provider is not present in this environment.
    Unavailable,
    /// The provider answered but had nothing to offer.
    Empty,
    /// The provider call failed or was rejected.
    Failed(IdentityError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptKind {
    Acquired,
    Unavailable,
    Empty,
    Failed,
}

/// A named way of acquiring a `T`.
pub trait Strategy<T>: Send + Sync {
    fn name(&self) -> &str;

    /// Try once. Informational lines for the event log go to `notes`.
    fn attempt<'a>(&'a self, notes: &'a mut Vec<String>) -> BoxFuture<'a, Attempt<T>>;
}

/// Trace entry for one strategy that was tried.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    pub strategy: String,
    pub kind: AttemptKind,
    pub error: Option<IdentityError>,
    pub notes: Vec<String>,
}

impl fmt::Display for AttemptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.error) {
            (AttemptKind::Acquired, _) => write!(f, "{}: succeeded", self.strategy),
            (AttemptKind::Unavailable, _) => write!(f, "{}: not available", self.strategy),
            (AttemptKind::Empty, _) => write!(f, "{}: returned nothing", self.strategy),
            (AttemptKind::Failed, Some(e)) => write!(f, "{}: failed: {e}", self.strategy),
            (AttemptKind::Failed, None) => write!(f, "{}: failed", self.strategy),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainReport<T> {
    /// Winning strategy name and its value.
    pub acquired: Option<(String, T)>,
    pub attempts: Vec<AttemptRecord>,
}

impl<T> ChainReport<T> {
    pub fn last_kind(&self) -> Option<AttemptKind> {
        self.attempts.last().map(|a| a.kind)
    }

    pub fn first_error(&self) -> Option<&IdentityError> {
        self.attempts.iter().find_map(|a| a.error.as_ref())
    }
}

pub struct ProviderChain<T> {
    strategies: Vec<Box<dyn Strategy<T>>>,
    stop_on_failure: bool,
}

impl<T> ProviderChain<T> {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            stop_on_failure: false,
        }
    }

    pub fn with(mut self, strategy: impl Strategy<T> + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// End the chain at the first failed attempt instead of moving on.
    pub fn stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Try every strategy in order until one acquires a value.
    pub async fn run(&self) -> ChainReport<T> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let mut notes = Vec::new();
            let attempt = strategy.attempt(&mut notes).await;
            let name = strategy.name().to_string();

            let (kind, error, acquired) = match attempt {
                Attempt::Acquired(value) => (AttemptKind::Acquired, None, Some(value)),
                Attempt::Unavailable => (AttemptKind::Unavailable, None, None),
                Attempt::Empty => (AttemptKind::Empty, None, None),
                Attempt::Failed(e) => (AttemptKind::Failed, Some(e), None),
            };
            tracing::debug!(strategy = %name, ?kind, "provider attempt");

            attempts.push(AttemptRecord {
                strategy: name.clone(),
                kind,
                error,
                notes,
            });

            if let Some(value) = acquired {
                return ChainReport {
                    acquired: Some((name, value)),
                    attempts,
                };
            }
            if kind == AttemptKind::Failed && self.stop_on_failure {
                break;
            }
        }

        ChainReport {
            acquired: None,
            attempts,
        }
    }
}

impl<T> Default for ProviderChain<T> {
    fn default() -> Self {
        Self::new()
    }
}
