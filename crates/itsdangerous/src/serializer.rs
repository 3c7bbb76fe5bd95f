//! Signed, URL-safe serialization of structured values.
//!
//! Values are JSON-encoded, optionally compressed, base64-encoded and then
//! signed. Verification always happens before any decoding, so unverified
//! bytes never reach the JSON or zlib decoders.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SigningResult;
use crate::payload::{decode_payload, encode_payload};
use crate::signer::Signer;
use crate::timestamp::TimestampSigner;

/// Signs serializable values into URL-safe tokens.
///
/// # Example
///
/// ```
/// use itsdangerous::UrlSafeSerializer;
/// use serde_json::{Value, json};
///
/// let serializer = UrlSafeSerializer::new("secret_key", "salt");
/// let token = serializer.marshal(&json!({"foo": "bar"})).unwrap();
/// assert_eq!(token, "eyJmb28iOiJiYXIifQ.6qEA6F4-V0kG0nJfqfnqdD3vQNE");
///
/// let value: Value = serializer.unmarshal(&token).unwrap();
/// assert_eq!(value, json!({"foo": "bar"}));
/// ```
#[derive(Debug, Clone)]
pub struct UrlSafeSerializer {
    signer: Signer,
}

impl UrlSafeSerializer {
    /// Create a serializer with a default [`Signer`].
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>, salt: impl AsRef<str>) -> Self {
        Self::from_signer(Signer::new(secret, salt))
    }

    /// Serialize through an existing signer.
    #[must_use]
    pub const fn from_signer(signer: Signer) -> Self {
        Self { signer }
    }

    /// The underlying signer.
    #[must_use]
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Encode and sign `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Encode`](crate::SigningError::Encode) if the
    /// value cannot be represented as JSON.
    pub fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> SigningResult<String> {
        Ok(self.signer.sign(&encode_payload(value)?))
    }

    /// Verify `signed` and decode the value it carries.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidSignature`](crate::SigningError::InvalidSignature)
    /// if verification fails, or [`SigningError::Decode`](crate::SigningError::Decode)
    /// if the verified payload cannot be decoded into `T`.
    pub fn unmarshal<T: DeserializeOwned>(&self, signed: &str) -> SigningResult<T> {
        decode_payload(self.signer.unsign(signed)?)
    }
}

/// Signs serializable values into URL-safe tokens carrying an issuance time.
#[derive(Debug, Clone)]
pub struct UrlSafeTimedSerializer {
    signer: TimestampSigner,
}

impl UrlSafeTimedSerializer {
    /// Create a serializer with a default [`TimestampSigner`].
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>, salt: impl AsRef<str>) -> Self {
        Self::from_signer(TimestampSigner::new(secret, salt))
    }

    /// Serialize through an existing timestamp signer.
    #[must_use]
    pub const fn from_signer(signer: TimestampSigner) -> Self {
        Self { signer }
    }

    /// The underlying timestamp signer.
    #[must_use]
    pub fn signer(&self) -> &TimestampSigner {
        &self.signer
    }

    /// Encode, timestamp and sign `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Encode`](crate::SigningError::Encode) if the
    /// value cannot be represented as JSON.
    pub fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> SigningResult<String> {
        Ok(self.signer.sign(&encode_payload(value)?))
    }

    /// Verify `signed`, check its age and decode the value it carries.
    ///
    /// A `max_age` of `None` or zero never expires.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidSignature`](crate::SigningError::InvalidSignature)
    /// if verification fails or the token expired, or
    /// [`SigningError::Decode`](crate::SigningError::Decode) if the verified
    /// payload cannot be decoded into `T`.
    pub fn unmarshal<T: DeserializeOwned>(
        &self,
        signed: &str,
        max_age: Option<Duration>,
    ) -> SigningResult<T> {
        decode_payload(self.signer.unsign(signed, max_age)?)
    }

    /// Like [`unmarshal`](Self::unmarshal), also returning the signing time.
    ///
    /// # Errors
    ///
    /// Same as [`unmarshal`](Self::unmarshal).
    pub fn unmarshal_with_timestamp<T: DeserializeOwned>(
        &self,
        signed: &str,
        max_age: Option<Duration>,
    ) -> SigningResult<(T, DateTime<Utc>)> {
        let (payload, issued) = self.signer.unsign_with_timestamp(signed, max_age)?;
        Ok((decode_payload(payload)?, issued))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::*;
    use crate::clock::FixedClock;
    use crate::error::{BadSignature, SigningError};

    /// 2024-09-27T14:00:00Z
    const ISSUED: i64 = 1_727_445_600;
    const FIVE_MINUTES: Option<Duration> = Some(Duration::from_secs(300));

    fn timed_at(secs: i64) -> UrlSafeTimedSerializer {
        UrlSafeTimedSerializer::from_signer(
            TimestampSigner::new("secret_key", "salt")
                .with_clock(Arc::new(FixedClock::from_timestamp(secs).unwrap())),
        )
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct ResetToken {
        user_id: u64,
        email: String,
    }

    #[test]
    fn test_marshal_reference_vectors() {
        let s = UrlSafeSerializer::new("secret_key", "salt");
        assert_eq!(
            s.marshal("my string").unwrap(),
            "Im15IHN0cmluZyI.Cm-9vjbVa2uq2UcarUKVT4ETsJM"
        );
        assert_eq!(
            s.marshal(&json!({"foo": "bar"})).unwrap(),
            "eyJmb28iOiJiYXIifQ.6qEA6F4-V0kG0nJfqfnqdD3vQNE"
        );
    }

    #[test]
    fn test_unmarshal_reference_compressed() {
        let s = UrlSafeSerializer::new("secret_key", "salt");
        let value: String = s
            .unmarshal(".eJxTSsQESgBSMgd4.BTZ1azMeckx-AF_DQS-xc7A5Tn0")
            .unwrap();
        assert_eq!(value, "aaaaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn test_unmarshal_altered_signature() {
        let s = UrlSafeSerializer::new("secret_key", "salt");
        let err = s
            .unmarshal::<Value>("Im15IHN0cmluZyI.aaaaaabVa2uq2UcarUKVT4ETsJM")
            .unwrap_err();
        assert!(err.is_invalid_signature());
    }

    #[test]
    fn test_signature_checked_before_decoding() {
        // Garbage payload with a forged signature must fail on the signature.
        let s = UrlSafeSerializer::new("secret_key", "salt");
        let err = s.unmarshal::<Value>("!!!.xv0r21ogoygusbkJA01c4OxsAio").unwrap_err();
        assert!(matches!(
            err,
            SigningError::InvalidSignature(BadSignature::Mismatch)
        ));
    }

    #[test]
    fn test_verified_garbage_is_decode_error() {
        let s = UrlSafeSerializer::new("secret_key", "salt");
        let token = s.signer().sign("!!!");
        let err = s.unmarshal::<Value>(&token).unwrap_err();
        assert!(matches!(err, SigningError::Decode(_)));
    }

    #[test]
    fn test_struct_round_trip() {
        let s = UrlSafeSerializer::new("secret_key", "password-reset");
        let token = ResetToken {
            user_id: 42,
            email: "user@example.com".to_owned(),
        };
        let signed = s.marshal(&token).unwrap();
        assert_eq!(s.unmarshal::<ResetToken>(&signed).unwrap(), token);
    }

    #[test]
    fn test_timed_marshal_reference_vectors() {
        let s = timed_at(ISSUED);
        assert_eq!(
            s.marshal("my string").unwrap(),
            "Im15IHN0cmluZyI.Zva6YA.xuP6ANJkkE2bfIQKSLbBTlu0LfM"
        );
        assert_eq!(
            s.marshal(&json!({"foo": "bar"})).unwrap(),
            "eyJmb28iOiJiYXIifQ.Zva6YA.qsA1vSQNlWBQSAPljwFH6C1Nx2I"
        );
    }

    #[test]
    fn test_timed_unmarshal_within_and_after_max_age() {
        let token = "eyJmb28iOiJiYXIifQ.Zva6YA.qsA1vSQNlWBQSAPljwFH6C1Nx2I";

        let value: Value = timed_at(ISSUED + 299).unmarshal(token, FIVE_MINUTES).unwrap();
        assert_eq!(value, json!({"foo": "bar"}));

        let err = timed_at(ISSUED + 301)
            .unmarshal::<Value>(token, FIVE_MINUTES)
            .unwrap_err();
        assert!(err.is_invalid_signature());
        assert!(err.expired().is_some());
    }

    #[test]
    fn test_timed_unmarshal_reference_compressed() {
        let value: String = timed_at(ISSUED + 60)
            .unmarshal(".eJxTSsQESgBSMgd4.Zva6YA._ItIzP5np9NnMIsNlxV6TpXzFUM", FIVE_MINUTES)
            .unwrap();
        assert_eq!(value, "aaaaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn test_timed_unmarshal_without_timestamp() {
        let err = timed_at(ISSUED + 299)
            .unmarshal::<Value>("Im15IHN0cmluZyI.Cm-9vjbVa2uq2UcarUKVT4ETsJM", FIVE_MINUTES)
            .unwrap_err();
        assert!(err.is_invalid_signature());
        assert!(err.expired().is_none());
    }

    #[test]
    fn test_timed_unmarshal_with_timestamp() {
        let s = timed_at(ISSUED);
        let signed = s.marshal(&json!([1, 2, 3])).unwrap();
        let (value, issued): (Value, _) = s.unmarshal_with_timestamp(&signed, None).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
        assert_eq!(issued.timestamp(), ISSUED);
    }
}
