// Binary payload location and decoding
// Layouts: direct `data` on the part, or a nested container (blob / inlineData / inline_data)

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde_json::Value;

use gemini_voice_types::ItemError;

use super::item_config::json_type_name;

/// Nested containers checked after the direct `data` field, in priority order.
const NESTED_CONTAINERS: [&str; 3] = ["blob", "inlineData", "inline_data"];

const MIME_KEYS: [&str; 2] = ["mimeType", "mime_type"];

/// Where a payload was found on a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLayout {
    Direct,
    Nested(&'static str),
}

/// A payload carrier located on a response part, not yet decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedPayload<'a> {
    pub carrier: &'a Value,
    pub mime_type: Option<&'a str>,
    pub layout: PayloadLayout,
}

/// A payload that decoded to raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload<'a> {
    pub bytes: Vec<u8>,
    pub mime_type: Option<&'a str>,
    pub layout: PayloadLayout,
}

/// Every payload carrier on `part`: direct `data` first, then the nested containers.
pub fn payload_candidates(part: &Value) -> impl Iterator<Item = LocatedPayload<'_>> + '_ {
    let direct = part.get("data").filter(|v| is_present(v)).map(|carrier| LocatedPayload {
        carrier,
        mime_type: mime_hint(part),
        layout: PayloadLayout::Direct,
    });

    let nested = NESTED_CONTAINERS.into_iter().filter_map(move |key| {
        let container = part.get(key)?;
        let carrier = container.get("data").filter(|v| is_present(v))?;
        Some(LocatedPayload {
            carrier,
            mime_type: mime_hint(container),
            layout: PayloadLayout::Nested(key),
        })
    });

    direct.into_iter().chain(nested)
}

/// Decode the first carrier on `part` that yields bytes.
///
/// `Ok(None)` when the part carries no payload at all. When carriers exist
/// but none decodes, the error of the first one is returned.
pub fn decode_first(part: &Value) -> Result<Option<DecodedPayload<'_>>, ItemError> {
    let mut first_error = None;
    for located in payload_candidates(part) {
        match decode_payload(located.carrier) {
            Ok(bytes) => {
                return Ok(Some(DecodedPayload {
                    bytes,
                    mime_type: located.mime_type,
                    layout: located.layout,
                }));
            },
            Err(err) => {
                first_error.get_or_insert(err);
            },
        }
    }
    first_error.map_or(Ok(None), Err)
}

/// Turn a payload carrier into raw bytes.
///
/// Strings are base64 (standard or URL-safe, padded or not); arrays of
/// integers in `0..=255` are raw bytes. Everything else is unsupported.
pub fn decode_payload(carrier: &Value) -> Result<Vec<u8>, ItemError> {
    match carrier {
        Value::String(encoded) => decode_base64(encoded),
        Value::Array(values) => values
            .iter()
            .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| ItemError::unsupported_payload("array containing non-byte values")),
        other => Err(ItemError::unsupported_payload(json_type_name(other))),
    }
}

fn decode_base64(encoded: &str) -> Result<Vec<u8>, ItemError> {
    let trimmed = encoded.trim();
    for engine in [&STANDARD, &URL_SAFE, &STANDARD_NO_PAD, &URL_SAFE_NO_PAD] {
        if let Ok(bytes) = engine.decode(trimmed) {
            return Ok(bytes);
        }
    }
    Err(ItemError::unsupported_payload("string that is not valid base64"))
}

fn mime_hint(holder: &Value) -> Option<&str> {
    MIME_KEYS
        .iter()
        .find_map(|key| holder.get(*key).and_then(Value::as_str))
        .filter(|mime| !mime.trim().is_empty())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        _ => true,
    }
}
