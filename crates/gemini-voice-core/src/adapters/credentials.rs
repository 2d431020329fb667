// Credential sources: in-memory, environment, JSON file, and a first-match chain

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use gemini_voice_types::models::CREDENTIAL_NAME;
use gemini_voice_types::{ApiCredentials, ConfigError};

use crate::error::AppResult;
use crate::ports::CredentialSource;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Fixed set of named credentials.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    entries: HashMap<String, ApiCredentials>,
}

impl StaticCredentials {
    /// Single Gemini API credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with(CREDENTIAL_NAME, ApiCredentials::new(api_key))
    }

    pub fn with(mut self, name: impl Into<String>, credentials: ApiCredentials) -> Self {
        self.entries.insert(name.into(), credentials);
        self
    }
}

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn get(&self, name: &str) -> Option<ApiCredentials> {
        self.entries.get(name).cloned()
    }
}

/// Gemini API key from the process environment.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    vars: Vec<String>,
}

impl EnvCredentials {
    pub fn with_vars<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { vars: vars.into_iter().map(Into::into).collect() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::with_vars(API_KEY_ENV_VARS)
    }
}

#[async_trait]
impl CredentialSource for EnvCredentials {
    async fn get(&self, name: &str) -> Option<ApiCredentials> {
        if name != CREDENTIAL_NAME {
            return None;
        }
        self.vars.iter().find_map(|var| {
            let value = std::env::var(var).ok()?;
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            tracing::debug!("Using API key from {}", var);
            Some(ApiCredentials::new(value))
        })
    }
}

/// Named credentials loaded from a JSON file: `{"geminiApi": {"apiKey": "..."}}`.
#[derive(Debug, Clone, Default)]
pub struct FileCredentials {
    entries: HashMap<String, ApiCredentials>,
}

impl FileCredentials {
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.display().to_string() }.into());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(path, &e))?;
        let entries: HashMap<String, ApiCredentials> =
            serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;

        tracing::info!("Loaded {} credential(s) from {}", entries.len(), path.display());
        Ok(Self { entries })
    }
}

#[async_trait]
impl CredentialSource for FileCredentials {
    async fn get(&self, name: &str) -> Option<ApiCredentials> {
        self.entries.get(name).cloned()
    }
}

/// Tries each source in order; the first usable credential wins.
#[derive(Clone, Default)]
pub struct CredentialChain {
    sources: Vec<Arc<dyn CredentialSource>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, source: Arc<dyn CredentialSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait]
impl CredentialSource for CredentialChain {
    async fn get(&self, name: &str) -> Option<ApiCredentials> {
        for source in &self.sources {
            if let Some(credentials) = source.get(name).await {
                if credentials.is_usable() {
                    return Some(credentials);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_static_credentials_by_name() {
        let source = StaticCredentials::new("AIza-test");

        assert_eq!(source.get(CREDENTIAL_NAME).await.unwrap().api_key, "AIza-test");
        assert!(source.get("other").await.is_none());
    }

    #[tokio::test]
    async fn test_env_credentials_fallback_order() {
        std::env::set_var("GV_TEST_PRIMARY_KEY", "");
        std::env::set_var("GV_TEST_SECONDARY_KEY", "from-secondary");
        let source = EnvCredentials::with_vars(["GV_TEST_PRIMARY_KEY", "GV_TEST_SECONDARY_KEY"]);

        assert_eq!(source.get(CREDENTIAL_NAME).await.unwrap().api_key, "from-secondary");
        assert!(source.get("other").await.is_none());
    }

    #[tokio::test]
    async fn test_env_credentials_unset() {
        let source = EnvCredentials::with_vars(["GV_TEST_NEVER_SET_KEY"]);
        assert!(source.get(CREDENTIAL_NAME).await.is_none());
    }

    #[tokio::test]
    async fn test_file_credentials() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"geminiApi": {{"apiKey": "from-file"}}}}"#).unwrap();

        let source = FileCredentials::load(file.path()).unwrap();
        assert_eq!(source.get(CREDENTIAL_NAME).await.unwrap().api_key, "from-file");
    }

    #[test]
    fn test_file_credentials_missing_file() {
        let err = FileCredentials::load(Path::new("/nonexistent/credentials.json")).unwrap_err();
        assert!(err.to_string().contains("Config not found"));
    }

    #[tokio::test]
    async fn test_chain_skips_blank_credentials() {
        let chain = CredentialChain::new()
            .push(Arc::new(StaticCredentials::new("   ")))
            .push(Arc::new(StaticCredentials::new("second")));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.get(CREDENTIAL_NAME).await.unwrap().api_key, "second");
        assert!(CredentialChain::new().get(CREDENTIAL_NAME).await.is_none());
    }
}
