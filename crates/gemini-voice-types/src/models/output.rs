//! Output records delivered downstream.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::profile::TTS_AUDIO_BINARY_PROPERTY;
use crate::error::ItemError;

/// Name of the binary attachment holding the AI audio response.
pub const AUDIO_BINARY_PROPERTY: &str = "aiAudioResponse";

/// File name given to the AI audio response.
pub const DEFAULT_AUDIO_FILE_NAME: &str = "ai_response.mp3";

pub const NO_AUDIO_WARNING: &str =
    "AI text response generated, but no audio data was found in the response.";

/// Packaged binary attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BinaryDescriptor {
    /// Base64 encoded content
    pub data: String,
    pub mime_type: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    /// Size of the decoded content in bytes
    pub file_size: u64,
}

impl BinaryDescriptor {
    /// Decode the attachment back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// Link from an output record to the input item that produced it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PairedItem {
    pub item: usize,
}

/// One output record per processed input item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub json: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BTreeMap<String, BinaryDescriptor>>,
    pub paired_item: PairedItem,
}

impl OutputRecord {
    /// Index of the originating input item.
    pub const fn item_index(&self) -> usize {
        self.paired_item.item
    }

    /// Whether this record carries an error payload instead of a result.
    pub fn is_error(&self) -> bool {
        self.json.contains_key("error")
    }

    pub fn warning(&self) -> Option<&str> {
        self.json.get("warning").and_then(Value::as_str)
    }

    /// Audio attachment under either profile's binary property.
    pub fn audio(&self) -> Option<&BinaryDescriptor> {
        let binary = self.binary.as_ref()?;
        binary.get(AUDIO_BINARY_PROPERTY).or_else(|| binary.get(TTS_AUDIO_BINARY_PROPERTY))
    }
}

/// Json payload of a failed item under failure isolation.
///
/// Serialized with the same prompt key as success records (`textPrompt`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    #[serde(rename = "error")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub item_index: usize,
    #[serde(rename = "textPrompt")]
    pub original_prompt: String,
}

impl ErrorRecord {
    pub fn from_item_error(error: &ItemError, item_index: usize, original_prompt: String) -> Self {
        Self { message: error.to_string(), details: error.details(), item_index, original_prompt }
    }

    /// Wrap into an output record paired with the failing item.
    pub fn into_output(self) -> OutputRecord {
        let mut json = Map::new();
        json.insert("error".to_string(), Value::String(self.message));
        if let Some(details) = self.details {
            json.insert("details".to_string(), Value::String(details));
        }
        json.insert("itemIndex".to_string(), Value::from(self.item_index));
        json.insert("textPrompt".to_string(), Value::String(self.original_prompt));

        OutputRecord { json, binary: None, paired_item: PairedItem { item: self.item_index } }
    }

    /// Audio-only layout: just `error` and `details`.
    pub fn into_tts_output(self) -> OutputRecord {
        let mut json = Map::new();
        json.insert("error".to_string(), Value::String(self.message));
        if let Some(details) = self.details {
            json.insert("details".to_string(), Value::String(details));
        }

        OutputRecord { json, binary: None, paired_item: PairedItem { item: self.item_index } }
    }
}
