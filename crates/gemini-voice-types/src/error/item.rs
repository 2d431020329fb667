//! Per-item processing errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ProviderError;

/// Errors that can occur while processing a single batch item.
///
/// Every variant except [`ItemError::UnsupportedPayloadEncoding`] fails the item.
/// An unsupported payload only downgrades the item to a text-only result.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ItemError {
    /// Credential is absent or carries an empty API key
    #[error("Gemini API key is missing from credentials '{name}'.")]
    MissingCredential {
        /// Name of the credential that was looked up
        name: String,
    },

    /// A resolved parameter does not conform to its declared type
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        /// Parameter name
        field: String,
        /// What is wrong with the value
        message: String,
    },

    /// Response matches none of the known shapes
    #[error("Invalid API response structure: {message}")]
    UnexpectedResponseShape {
        /// Description of what was expected
        message: String,
    },

    /// Binary payload was located but its carrier could not be turned into bytes
    #[error("Audio data received in an unexpected format ({carrier}).")]
    UnsupportedPayloadEncoding {
        /// Description of the carrier that was found
        carrier: String,
    },

    /// Neither text nor audio was located in the response
    #[error("No AI-generated text or audio data found in API response parts.")]
    NoContentFound,

    /// Audio-only profile: the first response part carries no audio payload
    #[error("No audio data found in API response.")]
    NoAudioFound,

    /// The generation service call itself failed
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ItemError {
    pub fn missing_credential(name: impl Into<String>) -> Self {
        Self::MissingCredential { name: name.into() }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput { field: field.into(), message: message.into() }
    }

    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape { message: message.into() }
    }

    pub fn unsupported_payload(carrier: impl Into<String>) -> Self {
        Self::UnsupportedPayloadEncoding { carrier: carrier.into() }
    }

    /// Stable kind tag, used in diagnostics and logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "MissingCredential",
            Self::InvalidInput { .. } => "InvalidInput",
            Self::UnexpectedResponseShape { .. } => "UnexpectedResponseShape",
            Self::UnsupportedPayloadEncoding { .. } => "UnsupportedPayloadEncoding",
            Self::NoContentFound => "NoContentFound",
            Self::NoAudioFound => "NoAudioFound",
            Self::Provider(_) => "ProviderError",
        }
    }

    /// Whether this error fails the item (as opposed to degrading it).
    pub const fn is_item_fatal(&self) -> bool {
        !matches!(self, Self::UnsupportedPayloadEncoding { .. })
    }

    /// Optional diagnostic detail for error records.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Provider(err) => Some(match err.diagnostic() {
                Some(diagnostic) => format!("{}: {}", self.kind(), diagnostic),
                None => self.kind().to_string(),
            }),
            _ => Some(self.kind().to_string()),
        }
    }
}
