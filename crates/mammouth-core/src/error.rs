//! Core error types for mammouth-core.
//!
//! Only durable writes and configuration handling surface as errors.
//! Corrupt state and provider problems are modelled as outcome enums
//! elsewhere and never reach this hierarchy as failures of the process.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mammouth-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`crate::storage::KeyValueStore`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading a record failed
    #[error("Failed to read '{key}': {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a record failed
    #[error("Failed to write '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the backing medium
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Failures reported by the host SDK or the browser wallet.
///
/// The message carries the provider's own wording so it can be logged as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Reading the SDK context failed
    #[error("context read failed: {0}")]
    ContextFailed(String),

    /// The user or the wallet refused the account request
    #[error("account request rejected: {0}")]
    RequestRejected(String),

    /// The SDK sign-in action failed
    #[error("sign-in failed: {0}")]
    SignInFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
