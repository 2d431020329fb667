//! Generation service errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BODY_EXCERPT_CHARS: usize = 300;

/// Failure reported by (or while talking to) the generation service.
///
/// Treated opaquely by the pipeline: the message is carried into the
/// error record, the status and body excerpt into its details.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("Gemini API error{}: {message}", status.map(|s| format!(" ({})", s)).unwrap_or_default())]
pub struct ProviderError {
    /// HTTP status, when the service answered at all
    pub status: Option<u16>,
    /// Provider message (upstream `error.message` when available)
    pub message: String,
    /// Truncated raw response body
    pub body: Option<String>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { status: None, message: message.into(), body: None }
    }

    /// Build from a non-success HTTP answer.
    ///
    /// Google APIs report failures as `{"error": {"code", "message", "status"}}`;
    /// when the body has that shape its message is used, otherwise the body itself.
    pub fn from_status(status: u16, body: &str) -> Self {
        let upstream_message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_string));

        let excerpt = excerpt(body);
        let message = match upstream_message {
            Some(msg) if !msg.is_empty() => msg,
            _ if excerpt.is_empty() => format!("HTTP {}", status),
            _ => excerpt.clone(),
        };

        Self {
            status: Some(status),
            message,
            body: if excerpt.is_empty() { None } else { Some(excerpt) },
        }
    }

    /// Diagnostic string combining status and body excerpt.
    pub fn diagnostic(&self) -> Option<String> {
        match (self.status, &self.body) {
            (Some(status), Some(body)) => Some(format!("status {} | {}", status, body)),
            (Some(status), None) => Some(format!("status {}", status)),
            (None, Some(body)) => Some(body.clone()),
            (None, None) => None,
        }
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
    cut.push_str("...");
    cut
}
