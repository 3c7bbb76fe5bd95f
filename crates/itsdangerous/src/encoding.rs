//! URL-safe base64 and compact integer encodings used inside tokens.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// URL-safe alphabet, never emits padding, accepts input with or without it.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Characters that may appear in [`base64_encode`] output or its padding.
pub(crate) fn in_base64_alphabet(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=')
}

/// Encode bytes as unpadded URL-safe base64.
#[must_use]
pub fn base64_encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE.encode(data)
}

/// Decode URL-safe base64, padded or not.
///
/// # Errors
///
/// Returns [`base64::DecodeError`] on characters outside the URL-safe
/// alphabet or an impossible input length.
pub fn base64_decode(data: impl AsRef<[u8]>) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE.decode(data)
}

/// Big-endian bytes of `value` with leading zero bytes stripped.
///
/// Zero encodes as a single zero byte.
#[must_use]
pub fn int_to_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len().saturating_sub(1));
    bytes[first..].to_vec()
}

/// Interpret up to 8 big-endian bytes as an unsigned integer.
///
/// Returns `None` for empty input or more than 8 bytes.
#[must_use]
pub fn bytes_to_int(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    let mut padded = [0u8; 8];
    padded[8usize.saturating_sub(bytes.len())..].copy_from_slice(bytes);
    Some(u64::from_be_bytes(padded))
}
