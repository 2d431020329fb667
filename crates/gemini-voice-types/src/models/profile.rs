//! Output profiles: which record layout a batch produces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed model of the audio-only profile.
pub const TTS_MODEL: &str = "models/gemini-1.5-flash-preview-native-audio-dialog";

/// Binary property and file name of audio-only records.
pub const TTS_AUDIO_BINARY_PROPERTY: &str = "audio";
pub const TTS_AUDIO_FILE_NAME: &str = "audio.mp3";

/// Record layout and response handling of a batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputProfile {
    /// Text plus optional audio; a missing payload degrades to a warning
    #[default]
    Chatbot,
    /// Audio only from the first response part; a missing payload fails the item
    Tts,
}

impl OutputProfile {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chatbot => "chatbot",
            Self::Tts => "tts",
        }
    }
}

impl fmt::Display for OutputProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chatbot" => Ok(Self::Chatbot),
            "tts" => Ok(Self::Tts),
            other => Err(format!("unknown output profile '{}' (expected chatbot or tts)", other)),
        }
    }
}
