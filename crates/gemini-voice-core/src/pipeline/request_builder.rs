// Request construction for generateContent
// Prompt becomes a single user turn; grounding and voice are the only optional sections

use gemini_voice_types::models::{PARAM_MODEL_NAME, PARAM_PROMPT};
use gemini_voice_types::protocol::{
    GeminiContent, GeminiTool, GenerateContentRequest, GenerationConfig, SpeechConfig,
};
use gemini_voice_types::ItemError;

/// Build the request for one item.
///
/// `model` addresses the endpoint and is only checked here. A `speech_voice`
/// becomes a prebuilt-voice `speechConfig`; whether the service honors it
/// depends on the model. With `None` the request carries no voice at all.
pub fn build_request(
    prompt: &str,
    model: &str,
    speech_voice: Option<&str>,
    enable_grounding: bool,
) -> Result<GenerateContentRequest, ItemError> {
    if prompt.trim().is_empty() {
        return Err(ItemError::invalid_input(PARAM_PROMPT, "prompt must be non-empty text"));
    }
    if model.trim().is_empty() {
        return Err(ItemError::invalid_input(PARAM_MODEL_NAME, "model identifier is empty"));
    }

    let tools = enable_grounding.then(|| vec![GeminiTool::google_search_retrieval()]);

    let generation_config = speech_voice
        .map(str::trim)
        .filter(|voice| !voice.is_empty())
        .map(|voice| GenerationConfig { speech_config: Some(SpeechConfig::prebuilt(voice)) });

    Ok(GenerateContentRequest {
        contents: vec![GeminiContent::user_text(prompt)],
        tools,
        generation_config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemini_voice_types::protocol::GeminiRole;
    use serde_json::json;

    #[test]
    fn test_prompt_is_single_user_turn() {
        let request = build_request("Tell me a joke", "models/m", None, false).unwrap();

        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, GeminiRole::User);
        assert_eq!(request.contents[0].parts[0].text, "Tell me a joke");
    }

    #[test]
    fn test_grounding_toggles_search_tool() {
        let grounded = build_request("Hi", "models/m", None, true).unwrap();
        let value = serde_json::to_value(&grounded).unwrap();
        assert_eq!(value["tools"], json!([{"googleSearchRetrieval": {}}]));
        assert!(grounded.has_grounding());

        let plain = build_request("Hi", "models/m", None, false).unwrap();
        assert!(plain.tools.is_none());
    }

    #[test]
    fn test_voice_is_omitted_unless_requested() {
        let request = build_request("Hi", "models/m", None, false).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert!(request.generation_config.is_none());
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_speech_voice_is_forwarded_as_hint() {
        let request = build_request("Hi", "models/m", Some("Charon"), false).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
            "Charon"
        );

        let no_voice = build_request("Hi", "models/m", Some(" "), false).unwrap();
        assert!(no_voice.generation_config.is_none());
    }

    #[test]
    fn test_empty_prompt_is_rejected() {
        let err = build_request("", "models/m", None, false).unwrap_err();
        assert_eq!(err.kind(), "InvalidInput");
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let err = build_request("Hi", "", None, false).unwrap_err();
        assert!(matches!(err, ItemError::InvalidInput { ref field, .. } if field == "modelName"));
    }
}
