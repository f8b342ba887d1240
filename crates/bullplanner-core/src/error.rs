//! Core error types for bullplanner-core.
//!
//! The hierarchy mirrors the three failure classes of the planner: user
//! input errors (reported inline), gateway failures (degraded to an empty
//! suggestion list, see [`crate::gateway`]) and configuration problems.

use std::path::PathBuf;
use thiserror::Error;

use crate::clock::WallTime;
use crate::gateway::GatewayError;

/// Core error type for bullplanner-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// AI gateway errors
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Could not resolve the configuration directory
    #[error("Cannot resolve configuration directory: {0}")]
    NoDataDir(String),
}

/// Input validation errors.
///
/// These are produced before any state mutation; a failed validation never
/// leaves a partially-applied change behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace only
    #[error("Title must not be empty")]
    EmptyTitle,

    /// Form submitted without selecting any day
    #[error("Select at least one day")]
    NoDaySelected,

    /// Time text or parts do not describe a valid time of day
    #[error("Invalid time '{input}': {reason}")]
    InvalidTime { input: String, reason: String },

    /// End time is not after start time
    #[error("Invalid time range: end time ({end}) must be after start time ({start})")]
    InvalidTimeRange { start: WallTime, end: WallTime },

    /// Unknown weekday name
    #[error("Unknown day of week: {0}")]
    UnknownDay(String),

    /// Unknown enum label (activity type, priority, meridiem)
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: String },

    /// Two imported items share an id
    #[error("Duplicate schedule item id: {0}")]
    DuplicateId(String),
}

impl ValidationError {
    pub(crate) fn invalid_time(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTime {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
