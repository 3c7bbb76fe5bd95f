//! Signing with an embedded issuance time.
//!
//! Produces `value SEP base64(ts) SEP base64(signature)` where `ts` is the
//! Unix time in seconds as big-endian bytes with leading zeros stripped.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::encoding::{base64_decode, base64_encode, bytes_to_int, int_to_bytes};
use crate::error::{BadSignature, SignatureExpired, SigningResult};
use crate::signer::Signer;

/// A [`Signer`] that also records when a value was signed and can reject
/// signatures older than a maximum age.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use itsdangerous::{FixedClock, TimestampSigner};
///
/// let issued = FixedClock::from_timestamp(1_727_445_600).unwrap();
/// let signer = TimestampSigner::new("secret_key", "salt").with_clock(Arc::new(issued));
/// let token = signer.sign("my string");
/// assert_eq!(token, "my string.Zva6YA.aqBNzGvNEDkO6RGFPEX1HIhz0vU");
///
/// let later = FixedClock::from_timestamp(1_727_445_600 + 301).unwrap();
/// let verifier = TimestampSigner::new("secret_key", "salt").with_clock(Arc::new(later));
/// let err = verifier.unsign(&token, Some(Duration::from_secs(300))).unwrap_err();
/// assert!(err.expired().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct TimestampSigner {
    signer: Signer,
    clock: Arc<dyn Clock>,
}

impl TimestampSigner {
    /// Create a timestamp signer with default options and the system clock.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>, salt: impl AsRef<str>) -> Self {
        Self::from_signer(Signer::new(secret, salt))
    }

    /// Wrap an existing signer, using the system clock.
    #[must_use]
    pub fn from_signer(signer: Signer) -> Self {
        Self {
            signer,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The wrapped signer.
    #[must_use]
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// The current time according to this signer's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Sign `value` with the current time.
    #[must_use]
    pub fn sign(&self, value: &str) -> String {
        let ts = base64_encode(int_to_bytes(self.clock.epoch_seconds()));
        let value = format!("{value}{}{ts}", self.signer.separator());
        self.signer.sign(&value)
    }

    /// Verify `signed` and return its value.
    ///
    /// A `max_age` of `None` or zero never expires. A positive `max_age` is
    /// compared in whole seconds, so anything under one second rejects
    /// signatures from earlier seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidSignature`](crate::SigningError::InvalidSignature)
    /// if verification fails or the timestamp is missing or malformed, with
    /// [`BadSignature::Expired`] when the signature is older than `max_age`.
    pub fn unsign<'a>(&self, signed: &'a str, max_age: Option<Duration>) -> SigningResult<&'a str> {
        self.unsign_raw(signed, max_age).map(|(value, _)| value)
    }

    /// Like [`unsign`](Self::unsign), also returning the signing time.
    ///
    /// # Errors
    ///
    /// Same as [`unsign`](Self::unsign).
    pub fn unsign_with_timestamp<'a>(
        &self,
        signed: &'a str,
        max_age: Option<Duration>,
    ) -> SigningResult<(&'a str, DateTime<Utc>)> {
        let (value, timestamp) = self.unsign_raw(signed, max_age)?;
        let issued = timestamp_to_datetime(timestamp).ok_or(BadSignature::MalformedTimestamp)?;
        Ok((value, issued))
    }

    /// Whether `signed` is valid and not older than `max_age`.
    #[must_use]
    pub fn validate(&self, signed: &str, max_age: Option<Duration>) -> bool {
        self.unsign(signed, max_age).is_ok()
    }

    fn unsign_raw<'a>(
        &self,
        signed: &'a str,
        max_age: Option<Duration>,
    ) -> SigningResult<(&'a str, u64)> {
        let result = self.signer.unsign(signed)?;
        let (value, ts) = self
            .signer
            .split_last(result)
            .ok_or(BadSignature::TimestampMissing)?;
        let timestamp = base64_decode(ts)
            .ok()
            .and_then(|bytes| bytes_to_int(&bytes))
            .ok_or(BadSignature::MalformedTimestamp)?;

        if let Some(max_age) = max_age.filter(|d| !d.is_zero()).map(|d| d.as_secs()) {
            let age = i128::from(self.clock.epoch_seconds()).saturating_sub(i128::from(timestamp));
            if age > i128::from(max_age) {
                return Err(BadSignature::Expired(SignatureExpired {
                    age: i64::try_from(age).unwrap_or(i64::MAX),
                    max_age,
                })
                .into());
            }
        }

        Ok((value, timestamp))
    }
}

/// Convert Unix seconds to a UTC time, if representable.
#[must_use]
pub fn timestamp_to_datetime(secs: u64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(i64::try_from(secs).ok()?, 0)
}
