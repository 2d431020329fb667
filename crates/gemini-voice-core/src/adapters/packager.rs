// Inline base64 binary packaging

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use gemini_voice_types::BinaryDescriptor;

use crate::audio::{
    detect_mime_type_from_bytes, extension_for_mime, extension_from_file_name, same_audio_format,
};
use crate::ports::BinaryPackager;

/// Embeds the bytes as base64 in the descriptor.
///
/// The declared MIME type is kept as is; a mismatch with the sniffed
/// container is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineBinaryPackager;

impl BinaryPackager for InlineBinaryPackager {
    fn package(&self, bytes: &[u8], file_name: &str, mime_type: &str) -> BinaryDescriptor {
        if let Some(sniffed) = detect_mime_type_from_bytes(bytes) {
            if !same_audio_format(mime_type, sniffed) {
                tracing::debug!(
                    "Declared audio type {} differs from detected {} for {}",
                    mime_type,
                    sniffed,
                    file_name
                );
            }
        }

        let file_extension = extension_from_file_name(file_name)
            .or_else(|| extension_for_mime(mime_type).map(str::to_string));

        BinaryDescriptor {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.to_string(),
            file_name: file_name.to_string(),
            file_extension,
            file_size: bytes.len() as u64,
        }
    }
}
