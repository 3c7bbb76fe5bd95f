//! Signing error types.

use thiserror::Error;

/// Errors that can occur while constructing signers or producing and
/// verifying tokens.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The requested key derivation scheme is not known.
    #[error("unknown key derivation method: {0}")]
    UnknownDerivation(String),

    /// The separator is empty or could occur inside base64 output.
    #[error("invalid separator {0:?}: ASCII letters, digits and '-_=' must not be used")]
    InvalidSeparator(String),

    /// The token failed verification.
    #[error(transparent)]
    InvalidSignature(#[from] BadSignature),

    /// A verified payload could not be decoded.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] DecodeError),

    /// The value could not be encoded as JSON.
    #[error("failed to encode payload as JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// Signer configuration could not be parsed or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SigningError {
    /// Whether this error is any kind of signature failure, expiry included.
    #[must_use]
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, Self::InvalidSignature(_))
    }

    /// The expiry details, if the token was valid but too old.
    #[must_use]
    pub fn expired(&self) -> Option<&SignatureExpired> {
        match self {
            Self::InvalidSignature(BadSignature::Expired(expired)) => Some(expired),
            _ => None,
        }
    }
}

/// Reasons a signed value is rejected.
#[derive(Debug, Error)]
pub enum BadSignature {
    /// No separator was found in the signed value.
    #[error("no separator found in value")]
    SeparatorMissing,

    /// The signature does not match the value.
    #[error("signature does not match")]
    Mismatch,

    /// The signature segment is not valid base64.
    #[error("malformed signature: {0}")]
    MalformedSignature(#[source] base64::DecodeError),

    /// The value verified but carries no timestamp segment.
    #[error("timestamp missing")]
    TimestampMissing,

    /// The timestamp segment could not be decoded.
    #[error("malformed timestamp")]
    MalformedTimestamp,

    /// The signature is valid but older than the allowed age.
    #[error(transparent)]
    Expired(#[from] SignatureExpired),
}

/// A valid signature that exceeded its maximum age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("signature age {age} > {max_age} seconds")]
pub struct SignatureExpired {
    /// Age of the signature in seconds at verification time.
    pub age: i64,
    /// Maximum accepted age in seconds.
    pub max_age: u64,
}

/// Failures decoding a verified payload back into a value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid URL-safe base64.
    #[error("invalid base64 encoding: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The compressed payload could not be inflated.
    #[error("error decompressing payload: {0}")]
    Decompress(#[source] std::io::Error),

    /// The inflated payload exceeds the decompression limit.
    #[error("decompressed payload exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Limit in bytes.
        limit: u64,
    },

    /// The payload is not valid JSON for the requested type.
    #[error("error JSON decoding payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for signing operations.
pub type SigningResult<T> = Result<T, SigningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_is_invalid_signature() {
        let err = SigningError::from(BadSignature::Expired(SignatureExpired {
            age: 301,
            max_age: 300,
        }));
        assert!(err.is_invalid_signature());
        assert_eq!(err.expired().map(|e| e.age), Some(301));
        assert_eq!(err.to_string(), "signature age 301 > 300 seconds");
    }

    #[test]
    fn test_mismatch_is_not_expired() {
        let err = SigningError::from(BadSignature::Mismatch);
        assert!(err.is_invalid_signature());
        assert!(err.expired().is_none());
    }

    #[test]
    fn test_decode_error_is_not_invalid_signature() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = SigningError::from(DecodeError::from(json_err));
        assert!(!err.is_invalid_signature());
    }
}
