//! Custom error types for the admin console
//!
//! Provides structured error handling with context for different failure scenarios.

use std::fmt;

/// Main error type for the admin console
#[derive(Debug)]
pub enum AdminError {
    /// Configuration-related errors
    Config(ConfigError),

    /// Document store operation errors
    Store(StoreError),

    /// Snapshot encode/decode errors
    Snapshot(SnapshotError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

/// Document store error variants
#[derive(Debug)]
pub enum StoreError {
    /// Store connection unusable; aborts the operation that hit it
    Unavailable { reason: String },

    /// Reading a collection failed; fatal to the whole export
    Read { collection: String, reason: String },

    /// Delete-all or an unrecoverable write-path failure; fatal to the
    /// remaining import, report-so-far preserved
    Write { collection: String, reason: String },
}

/// Snapshot codec error variants
#[derive(Debug)]
pub enum SnapshotError {
    /// Input is not syntactically valid
    Malformed { reason: String },

    /// A required top-level field is absent
    Unsupported { field: String },
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminError::Config(e) => write!(f, "Configuration error: {}", e),
            AdminError::Store(e) => write!(f, "Store error: {}", e),
            AdminError::Snapshot(e) => write!(f, "Snapshot error: {}", e),
            AdminError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable { reason } => {
                write!(f, "Database unavailable: {}", reason)
            }
            StoreError::Read { collection, reason } => {
                write!(f, "Failed to read collection '{}': {}", collection, reason)
            }
            StoreError::Write { collection, reason } => {
                write!(f, "Write failed on collection '{}': {}", collection, reason)
            }
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Malformed { reason } => {
                write!(f, "Malformed snapshot: {}", reason)
            }
            SnapshotError::Unsupported { field } => {
                write!(f, "Unsupported snapshot: missing required field '{}'", field)
            }
        }
    }
}

impl std::error::Error for AdminError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StoreError {}
impl std::error::Error for SnapshotError {}

// Conversion helpers for sub-errors
impl From<ConfigError> for AdminError {
    fn from(err: ConfigError) -> Self {
        AdminError::Config(err)
    }
}

impl From<StoreError> for AdminError {
    fn from(err: StoreError) -> Self {
        AdminError::Store(err)
    }
}

impl From<SnapshotError> for AdminError {
    fn from(err: SnapshotError) -> Self {
        AdminError::Snapshot(err)
    }
}

impl From<anyhow::Error> for AdminError {
    fn from(err: anyhow::Error) -> Self {
        AdminError::Other(err.to_string())
    }
}
