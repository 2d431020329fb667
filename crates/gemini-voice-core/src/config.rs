//! Runner configuration loading.
//!
//! Order: JSON file, then environment overrides, then validation.

use std::fs;
use std::path::{Path, PathBuf};

use validator::Validate;

use gemini_voice_types::{BatchConfig, ConfigError};

use crate::error::AppResult;

const CONFIG_DIR: &str = ".gemini-voice";
const CONFIG_FILE: &str = "config.json";

pub const ENV_BASE_URL: &str = "GEMINI_VOICE_BASE_URL";
pub const ENV_CONTINUE_ON_FAIL: &str = "GEMINI_VOICE_CONTINUE_ON_FAIL";
pub const ENV_PROFILE: &str = "GEMINI_VOICE_PROFILE";

/// `~/.gemini-voice/config.json`, when the home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the runner configuration.
///
/// An explicit `path` must exist. Without one, the default file is used when
/// present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> AppResult<BatchConfig> {
    let config = match path {
        Some(path) => load_config_from_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(default_path) => load_config_from_file(&default_path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                BatchConfig::default()
            },
        },
    };

    let config = apply_overrides(config, |name| std::env::var(name).ok());
    validate(&config)?;
    Ok(config)
}

pub fn load_config_from_file(path: &Path) -> AppResult<BatchConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() }.into());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(path, &e))?;
    let config: BatchConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Apply environment overrides through `lookup`. Unparseable booleans are ignored.
pub fn apply_overrides<F>(mut config: BatchConfig, lookup: F) -> BatchConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BASE_URL) {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            tracing::warn!("{} is empty, keeping configured base URL", ENV_BASE_URL);
        } else if url::Url::parse(url).is_err() {
            tracing::warn!("{} is not a valid URL, keeping configured base URL", ENV_BASE_URL);
        } else {
            config.api.base_url = url.to_string();
        }
    }

    if let Some(raw) = lookup(ENV_CONTINUE_ON_FAIL) {
        match parse_bool(&raw) {
            Some(flag) => config.continue_on_fail = flag,
            None => tracing::warn!("{} has invalid value '{}', ignoring", ENV_CONTINUE_ON_FAIL, raw),
        }
    }

    if let Some(raw) = lookup(ENV_PROFILE) {
        match raw.parse() {
            Ok(profile) => config.profile = profile,
            Err(e) => tracing::warn!("{}: {}, ignoring", ENV_PROFILE, e),
        }
    }

    config
}

pub fn validate(config: &BatchConfig) -> Result<(), ConfigError> {
    config.validate().map_err(|e| ConfigError::from_validation_errors(&e))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_overrides_apply() {
        let config = apply_overrides(
            BatchConfig::default(),
            env(&[(ENV_BASE_URL, "http://localhost:9000/"), (ENV_CONTINUE_ON_FAIL, "yes")]),
        );
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert!(config.continue_on_fail);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let config = apply_overrides(
            BatchConfig::default(),
            env(&[(ENV_BASE_URL, "  "), (ENV_CONTINUE_ON_FAIL, "maybe")]),
        );
        assert_eq!(config, BatchConfig::default());

        let config =
            apply_overrides(BatchConfig::default(), env(&[(ENV_BASE_URL, "not a url")]));
        assert_eq!(config.api.base_url, BatchConfig::default().api.base_url);
    }

    #[test]
    fn test_profile_override() {
        let config = apply_overrides(BatchConfig::default(), env(&[(ENV_PROFILE, "tts")]));
        assert_eq!(config.profile, gemini_voice_types::OutputProfile::Tts);

        let config = apply_overrides(BatchConfig::default(), env(&[(ENV_PROFILE, "radio")]));
        assert_eq!(config, BatchConfig::default());
    }

    #[test]
    fn test_validate_reports_nested_field() {
        let mut config = BatchConfig::default();
        config.api.base_url = "nope".to_string();

        match validate(&config).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "api.base_url"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_default_config_path_layout() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(".gemini-voice/config.json"));
        }
    }
}
