//! Collaborator interfaces consumed by the batch driver.
//!
//! The driver owns no I/O. Credentials, parameters, the generation service,
//! binary packaging and logging all come in through these traits.

use async_trait::async_trait;
use serde_json::Value;

use gemini_voice_types::protocol::GenerateContentRequest;
use gemini_voice_types::{ApiCredentials, BinaryDescriptor, ItemConfig, ItemError, ProviderError};

/// Named credential lookup.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// `None` when no credential is stored under `name`.
    async fn get(&self, name: &str) -> Option<ApiCredentials>;
}

/// Per-item parameter resolution.
pub trait ParameterSource: Send + Sync {
    /// Number of items in the batch; the driver processes indices `0..item_count()`.
    fn item_count(&self) -> usize;

    /// Raw parameter value for the item at `item_index`, `None` when unset.
    fn get(&self, name: &str, item_index: usize) -> Option<Value>;
}

/// The external generation service.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send one request and return the raw response body.
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, ProviderError>;
}

/// Packs raw bytes into a binary attachment descriptor.
pub trait BinaryPackager: Send + Sync {
    fn package(&self, bytes: &[u8], file_name: &str, mime_type: &str) -> BinaryDescriptor;
}

/// Structured observation points of a batch run.
///
/// Purely observational: implementations must not influence control flow.
pub trait BatchObserver: Send + Sync {
    fn request_sent(&self, _item_index: usize, _config: &ItemConfig) {}

    /// Voice selection is a hint the service may ignore. `forwarded` tells
    /// whether it went out as a speech config or was only recorded.
    fn voice_hint(&self, _item_index: usize, _voice_name: &str, _forwarded: bool) {}

    fn response_received(&self, _item_index: usize, _response: &Value) {}

    fn warning_raised(&self, _item_index: usize, _warning: &str) {}

    fn item_failed(&self, _item_index: usize, _error: &ItemError, _continued: bool) {}
}
