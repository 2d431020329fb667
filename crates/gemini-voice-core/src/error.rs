//! Unified error type for runner setup (config, credential files, HTTP client).
//!
//! Per-item pipeline failures use [`gemini_voice_types::ItemError`] instead.

use thiserror::Error;

use gemini_voice_types::ConfigError;

/// Error type for everything outside the per-item pipeline.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Configuration or credential file loading/validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type alias for runner setup operations.
pub type AppResult<T> = Result<T, AppError>;
