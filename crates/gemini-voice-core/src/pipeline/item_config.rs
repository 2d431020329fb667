// Boundary conversion: raw parameter values -> typed ItemConfig

use serde_json::Value;

use gemini_voice_types::models::{
    DEFAULT_MODEL, DEFAULT_VOICE, PARAM_ENABLE_GROUNDING, PARAM_MODEL_NAME, PARAM_PROMPT,
    PARAM_VOICE_NAME, TTS_MODEL,
};
use gemini_voice_types::{ItemConfig, ItemError};

use crate::ports::ParameterSource;

/// Resolve and type-check the configuration of one item.
///
/// The prompt must be a non-empty string. Model and voice fall back to the
/// built-in defaults when unset, grounding to `false`.
pub fn resolve_item_config(
    parameters: &dyn ParameterSource,
    item_index: usize,
) -> Result<ItemConfig, ItemError> {
    let prompt = resolve_prompt(parameters, item_index)?;
    let model_name = text_parameter(parameters, PARAM_MODEL_NAME, item_index, DEFAULT_MODEL)?;
    let voice_name = text_parameter(parameters, PARAM_VOICE_NAME, item_index, DEFAULT_VOICE)?;

    let enable_grounding = match parameters.get(PARAM_ENABLE_GROUNDING, item_index) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => flag,
        Some(other) => {
            return Err(ItemError::invalid_input(
                PARAM_ENABLE_GROUNDING,
                format!("expected a boolean, got {}", json_type_name(&other)),
            ));
        },
    };

    Ok(ItemConfig { prompt, model_name, voice_name, enable_grounding })
}

/// Configuration of an audio-only item: the prompt is the only parameter.
///
/// The model is fixed, no voice is requested and grounding is off.
pub fn resolve_audio_config(
    parameters: &dyn ParameterSource,
    item_index: usize,
) -> Result<ItemConfig, ItemError> {
    Ok(ItemConfig {
        prompt: resolve_prompt(parameters, item_index)?,
        model_name: TTS_MODEL.to_string(),
        voice_name: String::new(),
        enable_grounding: false,
    })
}

fn resolve_prompt(parameters: &dyn ParameterSource, item_index: usize) -> Result<String, ItemError> {
    let prompt = match parameters.get(PARAM_PROMPT, item_index) {
        Some(Value::String(text)) => text,
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            return Err(ItemError::invalid_input(
                PARAM_PROMPT,
                format!(
                    "Text prompt for item {} is not a string (got {}).",
                    item_index,
                    json_type_name(&other)
                ),
            ));
        },
    };
    if prompt.trim().is_empty() {
        return Err(ItemError::invalid_input(
            PARAM_PROMPT,
            format!("Text prompt for item {} is empty.", item_index),
        ));
    }
    Ok(prompt)
}

/// Best-effort prompt text for error records; never fails.
pub fn prompt_for_error_record(parameters: &dyn ParameterSource, item_index: usize) -> String {
    match parameters.get(PARAM_PROMPT, item_index) {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

fn text_parameter(
    parameters: &dyn ParameterSource,
    name: &str,
    item_index: usize,
    default: &str,
) -> Result<String, ItemError> {
    match parameters.get(name, item_index) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(default.to_string()),
        Some(Value::String(text)) => Ok(text.trim().to_string()),
        Some(other) => Err(ItemError::invalid_input(
            name,
            format!("expected an identifier string, got {}", json_type_name(&other)),
        )),
    }
}

pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
