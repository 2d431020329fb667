//! Batch input items and their resolved configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PARAM_PROMPT: &str = "prompt";
pub const PARAM_MODEL_NAME: &str = "modelName";
pub const PARAM_VOICE_NAME: &str = "voiceName";
pub const PARAM_ENABLE_GROUNDING: &str = "enableGrounding";

/// Native audio dialog model used when no model is configured.
pub const DEFAULT_MODEL: &str = "models/gemini-1.5-flash-preview-native-audio-dialog";

pub const KNOWN_MODELS: &[&str] = &[
    DEFAULT_MODEL,
    "models/gemini-1.5-flash-exp-native-audio-thinking-dialog",
];

pub const DEFAULT_VOICE: &str = "Zephyr";

pub const KNOWN_VOICES: &[&str] = &[DEFAULT_VOICE, "Charon"];

/// One record of the input batch.
///
/// Opaque to the pipeline: configuration is read from it only through a
/// parameter source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputItem {
    #[serde(default)]
    pub json: Map<String, Value>,
}

impl InputItem {
    pub fn new(json: Map<String, Value>) -> Self {
        Self { json }
    }

    /// Wrap an arbitrary JSON value. Non-object values land under `data`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(json) => Self { json },
            other => {
                let mut json = Map::new();
                json.insert("data".to_string(), other);
                Self { json }
            },
        }
    }
}

/// Fully resolved, type-checked configuration for one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemConfig {
    pub prompt: String,
    pub model_name: String,
    pub voice_name: String,
    pub enable_grounding: bool,
}

impl ItemConfig {
    pub fn is_known_model(&self) -> bool {
        KNOWN_MODELS.contains(&self.model_name.as_str())
    }

    pub fn is_known_voice(&self) -> bool {
        KNOWN_VOICES.contains(&self.voice_name.as_str())
    }
}
