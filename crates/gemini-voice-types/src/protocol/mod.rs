//! Protocol definitions for the generation service.
//!
//! Only the request side is typed. Responses are handled as raw
//! `serde_json::Value` because their shape varies and is not fully known.

pub mod gemini;

pub use gemini::{
    GeminiContent, GeminiPart, GeminiRole, GeminiTool, GeminiUsageMetadata,
    GenerateContentRequest, GenerationConfig, GoogleSearchRetrieval, PrebuiltVoiceConfig,
    SpeechConfig, VoiceConfig,
};
