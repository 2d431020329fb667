// Batch observation via tracing events

use serde_json::Value;
use tracing::{debug, info, warn};

use gemini_voice_types::protocol::GeminiUsageMetadata;
use gemini_voice_types::{ItemConfig, ItemError};

use crate::ports::BatchObserver;

const PROMPT_SNIPPET_CHARS: usize = 50;
const RESPONSE_SNIPPET_CHARS: usize = 500;

/// Logs every observation point through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn request_sent(&self, item_index: usize, config: &ItemConfig) {
        info!(
            "[item {}] Gemini Request | Model: {} | Voice: {} | Grounding: {} | Prompt: {}",
            item_index,
            config.model_name,
            config.voice_name,
            config.enable_grounding,
            snippet(&config.prompt, PROMPT_SNIPPET_CHARS)
        );
        if !config.is_known_model() {
            debug!("[item {}] Model {} is not in the known model list", item_index, config.model_name);
        }
        if !config.voice_name.is_empty() && !config.is_known_voice() {
            debug!("[item {}] Voice {} is not in the known voice list", item_index, config.voice_name);
        }
    }

    fn voice_hint(&self, item_index: usize, voice_name: &str, forwarded: bool) {
        if forwarded {
            info!(
                "[item {}] Voice '{}' is sent as a speech config hint; the model may ignore it",
                item_index, voice_name
            );
        } else {
            info!("[item {}] Voice '{}' requested (not sent to the model)", item_index, voice_name);
        }
    }

    fn response_received(&self, item_index: usize, response: &Value) {
        let body = response.to_string();
        debug!("[item {}] Gemini Response: {}", item_index, snippet(&body, RESPONSE_SNIPPET_CHARS));

        if let Some(usage) = GeminiUsageMetadata::from_response(response) {
            info!(
                "[item {}] Usage | Prompt: {} | Candidates: {} | Total: {}",
                item_index,
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count
            );
        }
    }

    fn warning_raised(&self, item_index: usize, warning: &str) {
        warn!("[item {}] {}", item_index, warning);
    }

    fn item_failed(&self, item_index: usize, error: &ItemError, continued: bool) {
        if continued {
            warn!("[item {}] Failed ({}), continuing: {}", item_index, error.kind(), error);
        } else {
            tracing::error!("[item {}] Failed ({}): {}", item_index, error.kind(), error);
        }
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
