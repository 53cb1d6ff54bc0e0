//! Errors for configuration loading.

/// Error type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading dashboard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Weight table that cannot be used
    #[error("Invalid score profile '{profile}': {reason}")]
    InvalidProfile {
        /// Profile name
        profile: String,
        /// What is wrong with it
        reason: String,
    },

    /// Probation thresholds that cannot be used
    #[error("Invalid probation thresholds: {0}")]
    InvalidThresholds(String),

    /// Action point table with unusable values
    #[error("Invalid action points: {0}")]
    InvalidActionPoints(String),

    /// Profile name not present in the configuration
    #[error("Unknown score profile: {0}")]
    UnknownProfile(String),
}
