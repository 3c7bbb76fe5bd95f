//! Digest methods and signing algorithms.
//!
//! A [`SigningAlgorithm`] turns a derived key and a value into signature
//! bytes. The default is [`HmacAlgorithm`] over SHA-1, which keeps tokens
//! interchangeable with other itsdangerous implementations.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::error::SigningError;

/// Run `$body` with `$d` bound to the concrete digest type for `$method`.
macro_rules! with_digest {
    ($method:expr, $d:ident => $body:expr) => {
        match $method {
            DigestMethod::Sha1 => {
                type $d = Sha1;
                $body
            },
            DigestMethod::Sha224 => {
                type $d = Sha224;
                $body
            },
            DigestMethod::Sha256 => {
                type $d = Sha256;
                $body
            },
            DigestMethod::Sha384 => {
                type $d = Sha384;
                $body
            },
            DigestMethod::Sha512 => {
                type $d = Sha512;
                $body
            },
        }
    };
}

/// Hash function used for key derivation and HMAC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestMethod {
    /// SHA-1 (160-bit). Default for compatibility.
    #[default]
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl DigestMethod {
    /// Digest output size in bytes.
    #[must_use]
    pub fn digest_size(self) -> usize {
        with_digest!(self, D => <D as Digest>::output_size())
    }

    /// Hash the concatenation of `parts`.
    #[must_use]
    pub fn hash(self, parts: &[&[u8]]) -> Vec<u8> {
        with_digest!(self, D => {
            let mut hasher = <D as Digest>::new();
            for part in parts {
                Digest::update(&mut hasher, part);
            }
            hasher.finalize().to_vec()
        })
    }

    /// HMAC of the concatenation of `parts` under `key`.
    #[must_use]
    pub fn hmac(self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
        with_digest!(self, D => {
            let Ok(mut mac) = <Hmac<D> as Mac>::new_from_slice(key) else {
                unreachable!("HMAC accepts keys of any length")
            };
            for part in parts {
                mac.update(part);
            }
            mac.finalize().into_bytes().to_vec()
        })
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for DigestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestMethod {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            other => Err(SigningError::Config(format!(
                "unsupported digest method '{other}'; expected one of: sha1, sha224, sha256, sha384, sha512"
            ))),
        }
    }
}

/// Computes and verifies signatures over a value with a derived key.
///
/// Implementations must be deterministic: the same key and value always
/// produce the same signature.
pub trait SigningAlgorithm: fmt::Debug + Send + Sync {
    /// Signature bytes for `value` under `key`.
    fn get_signature(&self, key: &[u8], value: &[u8]) -> Vec<u8>;

    /// Check `sig` against the expected signature.
    ///
    /// The default implementation compares in constant time.
    fn verify_signature(&self, key: &[u8], value: &[u8], sig: &[u8]) -> bool {
        let expected = self.get_signature(key, value);
        bool::from(expected.ct_eq(sig))
    }
}

/// HMAC over a configurable digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HmacAlgorithm {
    digest: DigestMethod,
}

impl HmacAlgorithm {
    /// Create an HMAC algorithm over `digest`.
    #[must_use]
    pub const fn new(digest: DigestMethod) -> Self {
        Self { digest }
    }

    /// The underlying digest.
    #[must_use]
    pub const fn digest(&self) -> DigestMethod {
        self.digest
    }
}

impl SigningAlgorithm for HmacAlgorithm {
    fn get_signature(&self, key: &[u8], value: &[u8]) -> Vec<u8> {
        self.digest.hmac(key, &[value])
    }
}

/// Produces an empty signature.
///
/// Tokens keep the `value.signature` shape but carry no integrity
/// protection. Only useful where the transport is already trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoneAlgorithm;

impl SigningAlgorithm for NoneAlgorithm {
    fn get_signature(&self, _key: &[u8], _value: &[u8]) -> Vec<u8> {
        Vec::new()
    }
}

/// Named algorithm selection for configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// [`HmacAlgorithm`] over the configured digest.
    #[default]
    Hmac,
    /// [`NoneAlgorithm`].
    None,
}
