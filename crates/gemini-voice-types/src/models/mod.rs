//! Batch models.

mod config;
mod credentials;
mod item;
mod normalized;
mod output;
mod profile;

pub use config::{
    ApiConfig, BatchConfig, ItemDefaults, DEFAULT_API_VERSION, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT_SECS,
};
pub use credentials::{ApiCredentials, CREDENTIAL_NAME};
pub use item::{
    InputItem, ItemConfig, DEFAULT_MODEL, DEFAULT_VOICE, KNOWN_MODELS, KNOWN_VOICES,
    PARAM_ENABLE_GROUNDING, PARAM_MODEL_NAME, PARAM_PROMPT, PARAM_VOICE_NAME,
};
pub use normalized::{NormalizedResult, DEFAULT_AUDIO_MIME_TYPE};
pub use output::{
    BinaryDescriptor, ErrorRecord, OutputRecord, PairedItem, AUDIO_BINARY_PROPERTY,
    DEFAULT_AUDIO_FILE_NAME, NO_AUDIO_WARNING,
};
pub use profile::{OutputProfile, TTS_AUDIO_BINARY_PROPERTY, TTS_AUDIO_FILE_NAME, TTS_MODEL};
