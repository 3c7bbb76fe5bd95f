//! Tamper-evident tokens for untrusted channels.
//!
//! This crate provides:
//! - [`Signer`]: `value.signature` tokens with pluggable key derivation and
//!   signing algorithm (HMAC-SHA1 by default)
//! - [`TimestampSigner`]: `value.timestamp.signature` tokens that can expire
//! - [`UrlSafeSerializer`] and [`UrlSafeTimedSerializer`]: signed, URL-safe
//!   JSON payloads with optional zlib compression
//!
//! Tokens are signed, not encrypted. Anyone holding a token can read its
//! payload; only holders of the secret can produce a valid one.
//!
//! # Secrets
//!
//! Key derivation is a single hash or HMAC, not a password hashing
//! function. Use a long random secret.
//!
//! # Example
//!
//! ```
//! use itsdangerous::{Signer, SigningError};
//!
//! let signer = Signer::new("secret_key", "salt");
//! let token = signer.sign("my string");
//! assert_eq!(signer.unsign(&token).unwrap(), "my string");
//!
//! let err = signer.unsign("my strinG.xv0r21ogoygusbkJA01c4OxsAio").unwrap_err();
//! assert!(matches!(err, SigningError::InvalidSignature(_)));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod algorithm;
mod clock;
mod config;
mod derive;
mod encoding;
mod error;
mod payload;
mod serializer;
mod signer;
mod timestamp;

pub use algorithm::{AlgorithmKind, DigestMethod, HmacAlgorithm, NoneAlgorithm, SigningAlgorithm};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::SignerConfig;
pub use derive::{KeyDerivation, derive_key};
pub use encoding::{base64_decode, base64_encode, bytes_to_int, int_to_bytes};
pub use error::{BadSignature, DecodeError, SignatureExpired, SigningError, SigningResult};
pub use payload::{COMPRESSION_MARKER, MAX_DECOMPRESSED_SIZE, decode_payload, encode_payload};
pub use serializer::{UrlSafeSerializer, UrlSafeTimedSerializer};
pub use signer::{DEFAULT_SALT, DEFAULT_SEPARATOR, Signer, SignerBuilder};
pub use timestamp::{TimestampSigner, timestamp_to_datetime};
