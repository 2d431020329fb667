//! Normalized generation result.

use serde::{Deserialize, Serialize};

/// MIME type assumed for audio when the response carries no hint.
pub const DEFAULT_AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// Text and audio extracted from one generation response.
///
/// A successfully normalized result always carries text, audio, or both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    /// Text fragments joined by newline
    pub text: Option<String>,
    /// Decoded audio payload
    pub audio_bytes: Option<Vec<u8>>,
    /// Audio MIME type (hint from the response or the default)
    pub mime_type: String,
    /// Non-fatal issues raised during normalization, in order
    pub warnings: Vec<String>,
}

impl NormalizedResult {
    pub fn empty() -> Self {
        Self {
            text: None,
            audio_bytes: None,
            mime_type: DEFAULT_AUDIO_MIME_TYPE.to_string(),
            warnings: Vec::new(),
        }
    }

    pub fn has_content(&self) -> bool {
        self.text.is_some() || self.audio_bytes.is_some()
    }
}

impl Default for NormalizedResult {
    fn default() -> Self {
        Self::empty()
    }
}
