//! Test fixtures and reference vectors.

use std::sync::Arc;

use itsdangerous::{Signer, TimestampSigner, UrlSafeSerializer, UrlSafeTimedSerializer};

use crate::mocks::MockClock;

/// Secret used by the reference vectors.
pub const TEST_SECRET: &str = "secret_key";

/// Salt used by the reference vectors.
pub const TEST_SALT: &str = "salt";

/// 2024-09-27T14:00:00Z, the issuance time of the timed reference vectors.
pub const REFERENCE_TIME: i64 = 1_727_445_600;

/// `"my string"` signed with the default signer.
pub const SIGNED_MY_STRING: &str = "my string.xv0r21ogoygusbkJA01c4OxsAio";

/// `"my string"` signed by the timestamp signer at [`REFERENCE_TIME`].
pub const TIMED_MY_STRING: &str = "my string.Zva6YA.aqBNzGvNEDkO6RGFPEX1HIhz0vU";

/// `"my string"` marshalled by the serializer.
pub const MARSHALLED_MY_STRING: &str = "Im15IHN0cmluZyI.Cm-9vjbVa2uq2UcarUKVT4ETsJM";

/// `{"foo": "bar"}` marshalled by the serializer.
pub const MARSHALLED_MAP: &str = "eyJmb28iOiJiYXIifQ.6qEA6F4-V0kG0nJfqfnqdD3vQNE";

/// `"aaaaaaaaaaaaaaaaaaa"` marshalled with compression.
pub const MARSHALLED_COMPRESSED: &str = ".eJxTSsQESgBSMgd4.BTZ1azMeckx-AF_DQS-xc7A5Tn0";

/// `"my string"` marshalled by the timed serializer at [`REFERENCE_TIME`].
pub const TIMED_MARSHALLED_MY_STRING: &str = "Im15IHN0cmluZyI.Zva6YA.xuP6ANJkkE2bfIQKSLbBTlu0LfM";

/// `{"foo": "bar"}` marshalled by the timed serializer at [`REFERENCE_TIME`].
pub const TIMED_MARSHALLED_MAP: &str = "eyJmb28iOiJiYXIifQ.Zva6YA.qsA1vSQNlWBQSAPljwFH6C1Nx2I";

/// `"aaaaaaaaaaaaaaaaaaa"` marshalled with compression at [`REFERENCE_TIME`].
pub const TIMED_MARSHALLED_COMPRESSED: &str =
    ".eJxTSsQESgBSMgd4.Zva6YA._ItIzP5np9NnMIsNlxV6TpXzFUM";

/// Create the reference signer.
#[must_use]
pub fn test_signer() -> Signer {
    Signer::new(TEST_SECRET, TEST_SALT)
}

/// Create the reference timestamp signer driven by `clock`.
#[must_use]
pub fn test_timestamp_signer(clock: &MockClock) -> TimestampSigner {
    TimestampSigner::new(TEST_SECRET, TEST_SALT).with_clock(Arc::new(clock.clone()))
}

/// Create the reference serializer.
#[must_use]
pub fn test_serializer() -> UrlSafeSerializer {
    UrlSafeSerializer::new(TEST_SECRET, TEST_SALT)
}

/// Create the reference timed serializer driven by `clock`.
#[must_use]
pub fn test_timed_serializer(clock: &MockClock) -> UrlSafeTimedSerializer {
    UrlSafeTimedSerializer::from_signer(test_timestamp_signer(clock))
}
