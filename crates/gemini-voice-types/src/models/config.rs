//! Batch runner configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::item::{DEFAULT_MODEL, DEFAULT_VOICE};
use super::profile::OutputProfile;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Generation service endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ApiConfig {
    /// Service root, without API version
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Per-request HTTP timeout in seconds
    #[validate(range(min = 5_u64, max = 3600_u64))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Node-level parameter defaults, overridable per item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ItemDefaults {
    #[serde(default)]
    pub prompt: Option<String>,
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_voice_name")]
    pub voice_name: String,
    #[serde(default)]
    pub enable_grounding: bool,
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            prompt: None,
            model_name: default_model_name(),
            voice_name: default_voice_name(),
            enable_grounding: false,
        }
    }
}

/// Full runner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct BatchConfig {
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiConfig,
    #[serde(default)]
    #[validate(nested)]
    pub defaults: ItemDefaults,
    /// Record layout and response handling
    #[serde(default)]
    pub profile: OutputProfile,
    /// Record per-item failures as data instead of aborting the batch
    #[serde(default)]
    pub continue_on_fail: bool,
    /// Put the voice into `generationConfig.speechConfig`; otherwise it is only logged
    #[serde(default)]
    pub send_speech_config: bool,
    /// JSON file with named credentials (`{"geminiApi": {"apiKey": "..."}}`)
    #[serde(default)]
    pub credentials_file: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_model_name() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_voice_name() -> String {
    DEFAULT_VOICE.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config: BatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BatchConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.defaults.voice_name, DEFAULT_VOICE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: BatchConfig =
            serde_json::from_str(r#"{"api": {"timeout_secs": 30}, "continue_on_fail": true}"#)
                .unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.api_version, DEFAULT_API_VERSION);
        assert!(config.continue_on_fail);
    }

    #[test]
    fn test_profile_and_speech_config_default_off() {
        let config: BatchConfig =
            serde_json::from_str(r#"{"profile": "tts", "send_speech_config": true}"#)
                .unwrap();
        assert_eq!(config.profile, OutputProfile::Tts);
        assert!(config.send_speech_config);

        let config = BatchConfig::default();
        assert_eq!(config.profile, OutputProfile::Chatbot);
        assert!(!config.send_speech_config);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = BatchConfig::default();
        config.api.timeout_secs = 1;
        assert!(config.validate().is_err());

        let mut config = BatchConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = BatchConfig::default();
        config.defaults.model_name = String::new();
        assert!(config.validate().is_err());
    }
}
