// Output record assembly

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use gemini_voice_types::models::{
    AUDIO_BINARY_PROPERTY, DEFAULT_AUDIO_FILE_NAME, NO_AUDIO_WARNING, TTS_AUDIO_BINARY_PROPERTY,
    TTS_AUDIO_FILE_NAME,
};
use gemini_voice_types::{ItemConfig, NormalizedResult, OutputRecord, PairedItem};

use crate::ports::BinaryPackager;

/// Build the success record for one item.
///
/// Normalizer warnings come first, followed by the missing-audio warning
/// when only text was produced. All warnings are joined with a single space.
pub fn assemble(
    config: &ItemConfig,
    normalized: NormalizedResult,
    item_index: usize,
    packager: &dyn BinaryPackager,
) -> OutputRecord {
    let NormalizedResult { text, audio_bytes, mime_type, mut warnings } = normalized;

    let mut json = Map::new();
    json.insert("textPrompt".to_string(), Value::String(config.prompt.clone()));
    json.insert("aiTextResponse".to_string(), Value::String(text.unwrap_or_default()));
    json.insert("modelUsed".to_string(), Value::String(config.model_name.clone()));
    json.insert("voiceUsed".to_string(), Value::String(config.voice_name.clone()));
    json.insert("groundingEnabled".to_string(), Value::Bool(config.enable_grounding));

    let binary = match audio_bytes {
        Some(bytes) => {
            let descriptor = packager.package(&bytes, DEFAULT_AUDIO_FILE_NAME, &mime_type);
            Some(BTreeMap::from([(AUDIO_BINARY_PROPERTY.to_string(), descriptor)]))
        },
        None => {
            warnings.push(NO_AUDIO_WARNING.to_string());
            None
        },
    };

    if !warnings.is_empty() {
        json.insert("warning".to_string(), Value::String(warnings.join(" ")));
    }

    OutputRecord { json, binary, paired_item: PairedItem { item: item_index } }
}

/// Build the audio-only record: `{text: prompt}` plus the `audio` attachment.
pub fn assemble_audio(
    prompt: &str,
    normalized: NormalizedResult,
    item_index: usize,
    packager: &dyn BinaryPackager,
) -> OutputRecord {
    let mut json = Map::new();
    json.insert("text".to_string(), Value::String(prompt.to_string()));

    let binary = normalized.audio_bytes.map(|bytes| {
        let descriptor = packager.package(&bytes, TTS_AUDIO_FILE_NAME, &normalized.mime_type);
        BTreeMap::from([(TTS_AUDIO_BINARY_PROPERTY.to_string(), descriptor)])
    });

    OutputRecord { json, binary, paired_item: PairedItem { item: item_index } }
}
