//! JSON payload encoding with optional zlib compression.
//!
//! The encoded form is `base64(json)` or, when compression saves space,
//! `"." base64(zlib(json))`. The leading `.` cannot occur in base64
//! output, so it marks compression unambiguously.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::encoding::{base64_decode, base64_encode};
use crate::error::{DecodeError, SigningError, SigningResult};

/// Marker prefixed to compressed payloads.
pub const COMPRESSION_MARKER: char = '.';

/// Maximum size of an inflated payload (16 MiB) - zlib bomb protection.
pub const MAX_DECOMPRESSED_SIZE: u64 = 16 * 1024 * 1024;

/// Encode `value` as URL-safe text, compressing when it helps.
///
/// # Errors
///
/// Returns [`SigningError::Encode`] if `value` cannot be represented as JSON.
pub fn encode_payload<T: Serialize + ?Sized>(value: &T) -> SigningResult<String> {
    let json = serde_json::to_vec(value).map_err(SigningError::Encode)?;

    match compress(&json) {
        Some(compressed) if compressed.len() < json.len() => Ok(format!(
            "{COMPRESSION_MARKER}{}",
            base64_encode(&compressed)
        )),
        _ => Ok(base64_encode(&json)),
    }
}

/// Decode text produced by [`encode_payload`].
///
/// # Errors
///
/// Returns [`SigningError::Decode`] on invalid base64, a corrupt or
/// oversized compressed stream, or JSON that does not fit `T`.
pub fn decode_payload<T: DeserializeOwned>(encoded: &str) -> SigningResult<T> {
    let (compressed, data) = match encoded.strip_prefix(COMPRESSION_MARKER) {
        Some(rest) => (true, rest),
        None => (false, encoded),
    };

    let mut bytes = base64_decode(data).map_err(DecodeError::from)?;
    if compressed {
        bytes = decompress(&bytes)?;
    }

    Ok(serde_json::from_slice(&bytes).map_err(DecodeError::from)?)
}

fn compress(data: &[u8]) -> Option<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).ok()?;
    encoder.finish().ok()
}

fn decompress(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .take(MAX_DECOMPRESSED_SIZE.saturating_add(1))
        .read_to_end(&mut out)
        .map_err(DecodeError::Decompress)?;
    if out.len() as u64 > MAX_DECOMPRESSED_SIZE {
        return Err(DecodeError::PayloadTooLarge {
            limit: MAX_DECOMPRESSED_SIZE,
        });
    }
    Ok(out)
}
