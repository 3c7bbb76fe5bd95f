//! Key derivation from a long-term secret and a namespacing salt.
//!
//! # Security
//!
//! None of these schemes is a password hashing function. They are cheap
//! by construction and assume the secret already carries enough entropy
//! (for example 32 random bytes). A weak secret stays weak.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::algorithm::DigestMethod;
use crate::error::SigningError;

/// How the signing key is derived from the secret and salt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyDerivation {
    /// `hash(salt ++ secret)`.
    Concat,
    /// `hash(salt ++ "signer" ++ secret)`.
    #[default]
    DjangoConcat,
    /// `HMAC(key = secret, message = salt)`.
    Hmac,
    /// The secret is used verbatim.
    None,
}

impl KeyDerivation {
    /// Canonical scheme name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concat => "concat",
            Self::DjangoConcat => "django-concat",
            Self::Hmac => "hmac",
            Self::None => "none",
        }
    }

    /// Derive the signing key.
    #[must_use]
    pub fn derive(self, secret: &[u8], salt: &[u8], digest: DigestMethod) -> Zeroizing<Vec<u8>> {
        let key = match self {
            Self::Concat => digest.hash(&[salt, secret]),
            Self::DjangoConcat => digest.hash(&[salt, b"signer", secret]),
            Self::Hmac => digest.hmac(secret, &[salt]),
            Self::None => secret.to_vec(),
        };
        Zeroizing::new(key)
    }
}

impl fmt::Display for KeyDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyDerivation {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concat" => Ok(Self::Concat),
            "django-concat" => Ok(Self::DjangoConcat),
            "hmac" => Ok(Self::Hmac),
            "none" => Ok(Self::None),
            other => Err(SigningError::UnknownDerivation(other.to_owned())),
        }
    }
}

/// Derive a key by scheme name.
///
/// # Errors
///
/// Returns [`SigningError::UnknownDerivation`] if `scheme` is not one of
/// `concat`, `django-concat`, `hmac` or `none`.
pub fn derive_key(
    secret: &[u8],
    salt: &[u8],
    scheme: &str,
    digest: DigestMethod,
) -> Result<Zeroizing<Vec<u8>>, SigningError> {
    Ok(scheme.parse::<KeyDerivation>()?.derive(secret, salt, digest))
}
