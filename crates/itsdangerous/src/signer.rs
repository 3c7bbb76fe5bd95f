//! Signing and verifying opaque string values.
//!
//! A signed value has the shape `value SEP base64(signature)`. Verification
//! splits at the *last* separator, so the value itself may contain the
//! separator freely.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::algorithm::{DigestMethod, HmacAlgorithm, SigningAlgorithm};
use crate::derive::KeyDerivation;
use crate::encoding::{base64_decode, base64_encode, in_base64_alphabet};
use crate::error::{BadSignature, SigningError, SigningResult};

/// Salt used when none is given.
pub const DEFAULT_SALT: &str = "itsdangerous.Signer";

/// Separator used when none is given.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Signs values and verifies signed values.
///
/// Holds only the derived key, never the original secret. Cheap to clone
/// and safe to share across threads.
///
/// # Example
///
/// ```
/// use itsdangerous::Signer;
///
/// let signer = Signer::new("secret_key", "salt");
/// let signed = signer.sign("my string");
/// assert_eq!(signed, "my string.xv0r21ogoygusbkJA01c4OxsAio");
/// assert_eq!(signer.unsign(&signed).unwrap(), "my string");
/// ```
#[derive(Clone)]
pub struct Signer {
    key: Zeroizing<Vec<u8>>,
    separator: String,
    algorithm: Arc<dyn SigningAlgorithm>,
}

impl Signer {
    /// Create a signer with the default separator, key derivation and
    /// HMAC-SHA1 algorithm.
    ///
    /// An empty `salt` selects [`DEFAULT_SALT`].
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>, salt: impl AsRef<str>) -> Self {
        // Default separator and derivation need no validation.
        SignerBuilder::new(secret)
            .salt(salt.as_ref())
            .assemble(KeyDerivation::default())
    }

    /// Start building a signer with non-default options.
    #[must_use]
    pub fn builder(secret: impl AsRef<[u8]>) -> SignerBuilder {
        SignerBuilder::new(secret)
    }

    /// The separator joining value and signature.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The base64 signature for `value`.
    #[must_use]
    pub fn get_signature(&self, value: &str) -> String {
        base64_encode(self.algorithm.get_signature(&self.key, value.as_bytes()))
    }

    /// Whether `sig` is the base64 signature of `value`.
    ///
    /// Malformed base64 is simply not a match.
    #[must_use]
    pub fn verify_signature(&self, value: &str, sig: &str) -> bool {
        base64_decode(sig).is_ok_and(|sig| {
            self.algorithm
                .verify_signature(&self.key, value.as_bytes(), &sig)
        })
    }

    /// Sign `value`, producing `value SEP signature`.
    #[must_use]
    pub fn sign(&self, value: &str) -> String {
        format!("{value}{}{}", self.separator, self.get_signature(value))
    }

    /// Verify `signed` and return the value it carries.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidSignature`] if the separator is
    /// missing, the signature is not base64 or it does not match.
    pub fn unsign<'a>(&self, signed: &'a str) -> SigningResult<&'a str> {
        let (value, sig) = self
            .split_last(signed)
            .ok_or(BadSignature::SeparatorMissing)?;
        let sig = base64_decode(sig).map_err(BadSignature::MalformedSignature)?;
        if self
            .algorithm
            .verify_signature(&self.key, value.as_bytes(), &sig)
        {
            Ok(value)
        } else {
            Err(BadSignature::Mismatch.into())
        }
    }

    /// Whether `signed` carries a valid signature.
    #[must_use]
    pub fn validate(&self, signed: &str) -> bool {
        self.unsign(signed).is_ok()
    }

    /// Split at the last separator.
    pub(crate) fn split_last<'a>(&self, s: &'a str) -> Option<(&'a str, &'a str)> {
        s.rsplit_once(self.separator.as_str())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("key", &"<redacted>")
            .field("separator", &self.separator)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Builder for a [`Signer`] with custom salt, separator, key derivation,
/// digest or algorithm.
///
/// # Example
///
/// ```
/// use itsdangerous::{DigestMethod, KeyDerivation, Signer};
///
/// let signer = Signer::builder("secret_key")
///     .salt("password-reset")
///     .separator(":")
///     .key_derivation(KeyDerivation::Hmac)
///     .digest_method(DigestMethod::Sha256)
///     .build()
///     .unwrap();
/// assert!(signer.validate(&signer.sign("user:42")));
/// ```
pub struct SignerBuilder {
    secret: Zeroizing<Vec<u8>>,
    salt: String,
    separator: String,
    derivation: String,
    digest: DigestMethod,
    algorithm: Option<Arc<dyn SigningAlgorithm>>,
}

impl SignerBuilder {
    /// Start from the defaults with the given secret.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            salt: DEFAULT_SALT.to_owned(),
            separator: DEFAULT_SEPARATOR.to_owned(),
            derivation: KeyDerivation::default().as_str().to_owned(),
            digest: DigestMethod::default(),
            algorithm: None,
        }
    }

    /// Namespace the derived key. An empty salt selects [`DEFAULT_SALT`].
    #[must_use]
    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        let salt = salt.into();
        self.salt = if salt.is_empty() {
            DEFAULT_SALT.to_owned()
        } else {
            salt
        };
        self
    }

    /// Separator between segments. Must not use base64 characters.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Key derivation scheme.
    #[must_use]
    pub fn key_derivation(mut self, derivation: KeyDerivation) -> Self {
        derivation.as_str().clone_into(&mut self.derivation);
        self
    }

    /// Key derivation scheme by name, checked by [`build`](Self::build).
    #[must_use]
    pub fn key_derivation_name(mut self, name: impl Into<String>) -> Self {
        self.derivation = name.into();
        self
    }

    /// Digest for key derivation and the default HMAC algorithm.
    #[must_use]
    pub fn digest_method(mut self, digest: DigestMethod) -> Self {
        self.digest = digest;
        self
    }

    /// Replace the default HMAC algorithm.
    #[must_use]
    pub fn algorithm(mut self, algorithm: Arc<dyn SigningAlgorithm>) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Derive the key and build the signer.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::UnknownDerivation`] for an unknown scheme
    /// name and [`SigningError::InvalidSeparator`] for an empty separator
    /// or one containing base64 characters.
    pub fn build(self) -> SigningResult<Signer> {
        validate_separator(&self.separator)?;
        let derivation: KeyDerivation = self.derivation.parse()?;
        Ok(self.assemble(derivation))
    }

    /// Derive the key for an already validated builder.
    fn assemble(self, derivation: KeyDerivation) -> Signer {
        let algorithm = self
            .algorithm
            .unwrap_or_else(|| Arc::new(HmacAlgorithm::new(self.digest)));

        tracing::debug!(
            derivation = %derivation,
            digest = %self.digest,
            salt_len = self.salt.len(),
            separator = %self.separator,
            "signer constructed"
        );

        Signer {
            key: derivation.derive(&self.secret, self.salt.as_bytes(), self.digest),
            separator: self.separator,
            algorithm,
        }
    }
}

impl fmt::Debug for SignerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerBuilder")
            .field("secret", &"<redacted>")
            .field("salt", &self.salt)
            .field("separator", &self.separator)
            .field("derivation", &self.derivation)
            .field("digest", &self.digest)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Reject separators that could appear inside base64 output.
pub(crate) fn validate_separator(separator: &str) -> SigningResult<()> {
    if separator.is_empty() || separator.chars().any(in_base64_alphabet) {
        return Err(SigningError::InvalidSeparator(separator.to_owned()));
    }
    Ok(())
}
