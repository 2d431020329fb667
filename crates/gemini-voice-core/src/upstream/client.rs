use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;

use gemini_voice_types::protocol::GenerateContentRequest;
use gemini_voice_types::{ApiConfig, ProviderError};

use crate::error::AppResult;
use crate::ports::GenerationClient;

const API_KEY_HEADER: &str = "x-goog-api-key";
const USER_AGENT: &str = concat!("gemini-voice/", env!("CARGO_PKG_VERSION"));

/// `generateContent` over the public Gemini REST API.
pub struct GeminiRestClient {
    http_client: Client,
    base_url: String,
    api_version: String,
}

impl GeminiRestClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(http_client, config))
    }

    /// Use a pre-built `reqwest::Client`.
    pub fn with_client(http_client: Client, config: &ApiConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.trim_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, model: &str) -> String {
        build_url(&self.base_url, &self.api_version, model)
    }
}

pub fn build_url(base_url: &str, api_version: &str, model: &str) -> String {
    format!("{}/{}/{}:generateContent", base_url, api_version, normalize_model_path(model))
}

/// Bare model ids get the `models/` prefix; resource paths are kept.
pub fn normalize_model_path(model: &str) -> String {
    let model = model.trim().trim_matches('/');
    if model.contains('/') {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Strip the `{"response": ...}` envelope some endpoints wrap results in.
pub fn unwrap_response(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.len() == 1 && map.get("response").is_some_and(Value::is_object) => {
            map.remove("response").unwrap_or_default()
        },
        other => other,
    }
}

#[async_trait]
impl GenerationClient for GeminiRestClient {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, ProviderError> {
        let url = self.endpoint(model);
        tracing::debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::new(format!("Request timed out: {}", e))
                } else {
                    ProviderError::new(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            let error_text = response.text().await.unwrap_or_else(|_| format!("HTTP {}", code));
            tracing::warn!("Gemini API returned {} for {}", code, model);
            return Err(ProviderError::from_status(code, &error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::new(format!("Invalid JSON response: {}", e)))?;
        Ok(unwrap_response(body))
    }
}
