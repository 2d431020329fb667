//! Audio format helpers.

use std::path::Path;

/// Detect the audio MIME type from the leading magic bytes.
#[allow(clippy::missing_asserts_for_indexing, reason = "Length checked at function start")]
pub fn detect_mime_type_from_bytes(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 {
        return None;
    }

    // MP3: ID3 tag or frame sync
    if data.starts_with(b"ID3") || (data[0] == 0xFF && (data[1] & 0xE0) == 0xE0) {
        return Some("audio/mpeg");
    }

    if data.starts_with(b"RIFF") && &data[8..12] == b"WAVE" {
        return Some("audio/wav");
    }

    if data.starts_with(b"fLaC") {
        return Some("audio/flac");
    }

    if data.starts_with(b"OggS") {
        return Some("audio/ogg");
    }

    if data.starts_with(b"FORM") && &data[8..12] == b"AIFF" {
        return Some("audio/aiff");
    }

    // M4A/AAC: ISO base media
    if &data[4..8] == b"ftyp" {
        return Some("audio/aac");
    }

    None
}

/// File extension for an audio MIME type, ignoring parameters such as `;rate=24000`.
pub fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.as_str() {
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/ogg" | "audio/opus" => Some("ogg"),
        "audio/flac" => Some("flac"),
        "audio/aac" | "audio/mp4" => Some("m4a"),
        "audio/aiff" | "audio/x-aiff" => Some("aiff"),
        "audio/l16" | "audio/pcm" => Some("pcm"),
        _ => None,
    }
}

/// Extension of `file_name`, if it has one.
pub fn extension_from_file_name(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

/// Whether two MIME types name the same audio container.
pub fn same_audio_format(declared: &str, sniffed: &str) -> bool {
    match (extension_for_mime(declared), extension_for_mime(sniffed)) {
        (Some(a), Some(b)) => a == b,
        _ => declared.eq_ignore_ascii_case(sniffed),
    }
}
