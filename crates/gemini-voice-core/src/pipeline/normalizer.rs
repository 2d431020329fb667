// Response normalization
// Maps the loosely shaped generation response onto NormalizedResult

use serde_json::Value;
use tracing::debug;

use gemini_voice_types::{ItemError, NormalizedResult};

use super::payload::{decode_first, payload_candidates};

pub const SIMPLE_RESPONSE_WARNING: &str = "Received a simple text response from API. Expected structured parts with text and potentially audio.";

/// Recognized response shapes, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// Parts of the first candidate (never empty)
    Candidates(&'a [Value]),
    /// Degraded single text response
    FlatText(&'a str),
    Unknown,
}

pub fn detect_shape(response: &Value) -> ResponseShape<'_> {
    let parts = response
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .filter(|parts| !parts.is_empty());

    if let Some(parts) = parts {
        return ResponseShape::Candidates(parts);
    }

    match response.get("text").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => ResponseShape::FlatText(text),
        _ => ResponseShape::Unknown,
    }
}

/// Extract text, audio and warnings from a generation response.
///
/// Pure over its input. An unsupported payload carrier is downgraded to a
/// warning; a response with neither text nor audio is an error.
pub fn normalize(response: &Value) -> Result<NormalizedResult, ItemError> {
    let mut result = NormalizedResult::empty();

    match detect_shape(response) {
        ResponseShape::Candidates(parts) => collect_parts(parts, &mut result)?,
        ResponseShape::FlatText(text) => {
            result.text = Some(text.to_string());
            result.warnings.push(SIMPLE_RESPONSE_WARNING.to_string());
        },
        ResponseShape::Unknown => {
            return Err(ItemError::unexpected_shape(
                "expected candidates with content parts or a top-level text field",
            ));
        },
    }

    if !result.has_content() {
        return Err(ItemError::NoContentFound);
    }
    Ok(result)
}

/// Audio-only normalization: only the first part is inspected.
///
/// A part without a decodable payload fails the item. Text parts are not
/// collected.
pub fn normalize_audio(response: &Value) -> Result<NormalizedResult, ItemError> {
    let ResponseShape::Candidates(parts) = detect_shape(response) else {
        return Err(ItemError::unexpected_shape(
            "expected candidates with content parts carrying audio",
        ));
    };

    let mut result = NormalizedResult::empty();
    let decoded = parts.first().map(decode_first).transpose()?.flatten();
    let Some(decoded) = decoded else {
        return Err(ItemError::NoAudioFound);
    };

    if let Some(mime) = decoded.mime_type {
        result.mime_type = mime.to_string();
    }
    result.audio_bytes = Some(decoded.bytes);
    Ok(result)
}

fn collect_parts(parts: &[Value], result: &mut NormalizedResult) -> Result<(), ItemError> {
    let mut texts: Vec<&str> = Vec::new();
    let mut undecodable: Option<ItemError> = None;

    for (part_index, part) in parts.iter().enumerate() {
        if let Some(text) = part.get("text").and_then(Value::as_str) {
            if !text.is_empty() {
                texts.push(text);
            }
        }

        if result.audio_bytes.is_some() {
            if payload_candidates(part).next().is_some() {
                debug!(part_index, "Ignoring additional binary payload; only the first one is used");
            }
            continue;
        }

        match decode_first(part) {
            Ok(Some(decoded)) => {
                if let Some(mime) = decoded.mime_type {
                    result.mime_type = mime.to_string();
                }
                result.audio_bytes = Some(decoded.bytes);
            },
            Ok(None) => {},
            Err(err) if !err.is_item_fatal() => {
                debug!(part_index, "Skipping undecodable payload: {}", err);
                undecodable.get_or_insert(err);
            },
            Err(err) => return Err(err),
        }
    }

    if result.audio_bytes.is_none() {
        if let Some(err) = undecodable {
            result.warnings.push(err.to_string());
        }
    }
    if !texts.is_empty() {
        result.text = Some(texts.join("\n"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use gemini_voice_types::models::DEFAULT_AUDIO_MIME_TYPE;
    use serde_json::json;

    #[test]
    fn test_text_and_audio_parts() {
        let response = json!({
            "candidates": [{"content": {"parts": [
                {"text": "Why did the chicken..."},
                {"data": "SUQzAQI=", "mimeType": "audio/mpeg"}
            ]}}]
        });

        let result = normalize(&response).unwrap();
        assert_eq!(result.text.as_deref(), Some("Why did the chicken..."));
        assert_eq!(result.audio_bytes, Some(b"ID3\x01\x02".to_vec()));
        assert_eq!(result.mime_type, "audio/mpeg");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_text_only_parts() {
        let response = json!({"candidates": [{"content": {"parts": [{"text": "Hello"}]}}]});

        let result = normalize(&response).unwrap();
        assert_eq!(result.text.as_deref(), Some("Hello"));
        assert!(result.audio_bytes.is_none());
        assert_eq!(result.mime_type, DEFAULT_AUDIO_MIME_TYPE);
    }

    #[test]
    fn test_text_fragments_join_with_newline() {
        let response = json!({"candidates": [{"content": {"parts": [
            {"text": "one"}, {"text": ""}, {"text": "two"}
        ]}}]});

        assert_eq!(normalize(&response).unwrap().text.as_deref(), Some("one\ntwo"));
    }

    #[test]
    fn test_flat_text_is_degraded_shape() {
        let response = json!({"text": "plain answer"});

        assert_eq!(detect_shape(&response), ResponseShape::FlatText("plain answer"));
        let result = normalize(&response).unwrap();
        assert_eq!(result.text.as_deref(), Some("plain answer"));
        assert_eq!(result.warnings, vec![SIMPLE_RESPONSE_WARNING.to_string()]);
    }

    #[test]
    fn test_empty_parts_fall_back_to_flat_text() {
        let response = json!({"candidates": [{"content": {"parts": []}}], "text": "fallback"});
        assert_eq!(detect_shape(&response), ResponseShape::FlatText("fallback"));
    }

    #[test]
    fn test_unknown_shape_fails() {
        for response in [json!({}), json!({"candidates": []}), json!({"text": ""}), json!([1, 2])] {
            let err = normalize(&response).unwrap_err();
            assert_eq!(err.kind(), "UnexpectedResponseShape");
        }
    }

    #[test]
    fn test_parts_without_content_fail() {
        let response = json!({"candidates": [{"content": {"parts": [{"functionCall": {}}]}}]});
        assert_eq!(normalize(&response).unwrap_err(), ItemError::NoContentFound);
    }

    #[test]
    fn test_only_first_payload_counts() {
        let response = json!({"candidates": [{"content": {"parts": [
            {"inlineData": {"data": "QUJD", "mimeType": "audio/wav"}},
            {"data": "WFla", "mimeType": "audio/ogg"}
        ]}}]});

        let result = normalize(&response).unwrap();
        assert_eq!(result.audio_bytes, Some(b"ABC".to_vec()));
        assert_eq!(result.mime_type, "audio/wav");
        assert!(result.text.is_none());
    }

    #[test]
    fn test_nested_and_byte_array_layouts() {
        let blob = json!({"candidates": [{"content": {"parts": [
            {"blob": {"data": [1, 2, 3], "mime_type": "audio/L16"}}
        ]}}]});
        let result = normalize(&blob).unwrap();
        assert_eq!(result.audio_bytes, Some(vec![1, 2, 3]));
        assert_eq!(result.mime_type, "audio/L16");

        let snake = json!({"candidates": [{"content": {"parts": [
            {"inline_data": {"data": "QUJD"}}
        ]}}]});
        let result = normalize(&snake).unwrap();
        assert_eq!(result.audio_bytes, Some(b"ABC".to_vec()));
        assert_eq!(result.mime_type, DEFAULT_AUDIO_MIME_TYPE);
    }

    #[test]
    fn test_unsupported_carrier_is_a_warning() {
        let response = json!({"candidates": [{"content": {"parts": [
            {"text": "Hi"},
            {"data": {"nested": true}, "mimeType": "audio/mpeg"}
        ]}}]});

        let result = normalize(&response).unwrap();
        assert_eq!(result.text.as_deref(), Some("Hi"));
        assert!(result.audio_bytes.is_none());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("unexpected format"));
    }

    #[test]
    fn test_undecodable_direct_data_does_not_hide_blob() {
        let response = json!({"candidates": [{"content": {"parts": [
            {"text": "Hi", "data": {"x": 1}, "blob": {"data": "QUJD", "mimeType": "audio/wav"}}
        ]}}]});

        let result = normalize(&response).unwrap();
        assert_eq!(result.audio_bytes, Some(b"ABC".to_vec()));
        assert_eq!(result.mime_type, "audio/wav");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_undecodable_payload_does_not_hide_later_part() {
        let response = json!({"candidates": [{"content": {"parts": [
            {"text": "Hi", "data": 5},
            {"blob": {"data": "QUJD"}}
        ]}}]});

        let result = normalize(&response).unwrap();
        assert_eq!(result.audio_bytes, Some(b"ABC".to_vec()));
        assert_eq!(result.text.as_deref(), Some("Hi"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_audio_profile_reads_first_part_only() {
        let response = json!({"candidates": [{"content": {"parts": [
            {"blob": {"data": "QUJD", "mimeType": "audio/wav"}, "text": "ignored"},
            {"data": "WFla"}
        ]}}]});

        let result = normalize_audio(&response).unwrap();
        assert_eq!(result.audio_bytes, Some(b"ABC".to_vec()));
        assert_eq!(result.mime_type, "audio/wav");
        assert!(result.text.is_none());
    }

    #[test]
    fn test_audio_profile_requires_audio_in_first_part() {
        let later_audio = json!({"candidates": [{"content": {"parts": [
            {"text": "Hello"},
            {"data": "QUJD"}
        ]}}]});
        assert_eq!(normalize_audio(&later_audio).unwrap_err(), ItemError::NoAudioFound);

        let bad_carrier = json!({"candidates": [{"content": {"parts": [{"data": true}]}}]});
        assert_eq!(normalize_audio(&bad_carrier).unwrap_err().kind(), "UnsupportedPayloadEncoding");

        let flat = json!({"text": "plain"});
        assert_eq!(normalize_audio(&flat).unwrap_err().kind(), "UnexpectedResponseShape");
    }

    #[test]
    fn test_unsupported_carrier_without_text_is_no_content() {
        let response = json!({"candidates": [{"content": {"parts": [{"data": true}]}}]});
        assert_eq!(normalize(&response).unwrap_err(), ItemError::NoContentFound);
    }

    #[test]
    fn test_base64_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let response = json!({"candidates": [{"content": {"parts": [
            {"inlineData": {"data": STANDARD.encode(&bytes), "mimeType": "audio/mpeg"}}
        ]}}]});

        assert_eq!(normalize(&response).unwrap().audio_bytes, Some(bytes));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let response = json!({"candidates": [{"content": {"parts": [
            {"text": "A"}, {"data": "QUJD"}, {"text": "B"}
        ]}}]});

        assert_eq!(normalize(&response).unwrap(), normalize(&response).unwrap());
    }
}
