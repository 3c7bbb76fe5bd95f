//! Declarative signer configuration.
//!
//! Everything about a signer except the secret can be described in TOML:
//!
//! ```toml
//! salt = "password-reset"
//! separator = "."
//! key_derivation = "django-concat"
//! digest_method = "sha256"
//! algorithm = "hmac"
//! max_age_secs = 3600
//! ```
//!
//! The secret is supplied separately when building and is never part of
//! the configuration.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithm::{AlgorithmKind, DigestMethod, HmacAlgorithm, NoneAlgorithm, SigningAlgorithm};
use crate::derive::KeyDerivation;
use crate::error::{SigningError, SigningResult};
use crate::serializer::{UrlSafeSerializer, UrlSafeTimedSerializer};
use crate::signer::{DEFAULT_SALT, DEFAULT_SEPARATOR, Signer, validate_separator};
use crate::timestamp::TimestampSigner;

/// Signer options, deserializable from TOML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignerConfig {
    /// Namespace for the derived key.
    pub salt: String,
    /// Separator between token segments.
    pub separator: String,
    /// Key derivation scheme name.
    pub key_derivation: String,
    /// Digest for derivation and HMAC.
    pub digest_method: DigestMethod,
    /// Signing algorithm.
    pub algorithm: AlgorithmKind,
    /// Default maximum token age for timed verification. `None` or zero
    /// never expires.
    pub max_age_secs: Option<u64>,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_owned(),
            separator: DEFAULT_SEPARATOR.to_owned(),
            key_derivation: KeyDerivation::default().as_str().to_owned(),
            digest_method: DigestMethod::default(),
            algorithm: AlgorithmKind::default(),
            max_age_secs: None,
        }
    }
}

impl SignerConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Config`] if the document is malformed or has
    /// unknown fields, and the errors of [`validate`](Self::validate).
    pub fn from_toml_str(s: &str) -> SigningResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| SigningError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> SigningResult<String> {
        toml::to_string(self).map_err(|e| SigningError::Config(e.to_string()))
    }

    /// Check cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidSeparator`] or
    /// [`SigningError::UnknownDerivation`].
    pub fn validate(&self) -> SigningResult<()> {
        validate_separator(&self.separator)?;
        self.key_derivation.parse::<KeyDerivation>()?;
        Ok(())
    }

    /// The configured maximum age, if any.
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Build a [`Signer`] for `secret`.
    ///
    /// # Errors
    ///
    /// Same as [`SignerBuilder::build`](crate::SignerBuilder::build).
    pub fn build_signer(&self, secret: impl AsRef<[u8]>) -> SigningResult<Signer> {
        let algorithm: Arc<dyn SigningAlgorithm> = match self.algorithm {
            AlgorithmKind::Hmac => Arc::new(HmacAlgorithm::new(self.digest_method)),
            AlgorithmKind::None => Arc::new(NoneAlgorithm),
        };
        Signer::builder(secret)
            .salt(self.salt.as_str())
            .separator(self.separator.as_str())
            .key_derivation_name(self.key_derivation.as_str())
            .digest_method(self.digest_method)
            .algorithm(algorithm)
            .build()
    }

    /// Build a [`TimestampSigner`] for `secret` on the system clock.
    ///
    /// # Errors
    ///
    /// Same as [`build_signer`](Self::build_signer).
    pub fn build_timestamp_signer(
        &self,
        secret: impl AsRef<[u8]>,
    ) -> SigningResult<TimestampSigner> {
        self.build_signer(secret).map(TimestampSigner::from_signer)
    }

    /// Build a [`UrlSafeSerializer`] for `secret`.
    ///
    /// # Errors
    ///
    /// Same as [`build_signer`](Self::build_signer).
    pub fn build_serializer(&self, secret: impl AsRef<[u8]>) -> SigningResult<UrlSafeSerializer> {
        self.build_signer(secret).map(UrlSafeSerializer::from_signer)
    }

    /// Build a [`UrlSafeTimedSerializer`] for `secret` on the system clock.
    ///
    /// # Errors
    ///
    /// Same as [`build_signer`](Self::build_signer).
    pub fn build_timed_serializer(
        &self,
        secret: impl AsRef<[u8]>,
    ) -> SigningResult<UrlSafeTimedSerializer> {
        self.build_timestamp_signer(secret)
            .map(UrlSafeTimedSerializer::from_signer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = SignerConfig::from_toml_str("").unwrap();
        assert_eq!(config, SignerConfig::default());
        assert_eq!(config.max_age(), None);
    }

    #[test]
    fn test_full_document() {
        let config = SignerConfig::from_toml_str(
            r#"
            salt = "salt"
            separator = ":"
            key_derivation = "hmac"
            digest_method = "sha256"
            algorithm = "hmac"
            max_age_secs = 300
            "#,
        )
        .unwrap();
        assert_eq!(config.separator, ":");
        assert_eq!(config.digest_method, DigestMethod::Sha256);
        assert_eq!(config.max_age(), Some(Duration::from_secs(300)));

        let signer = config.build_signer("secret_key").unwrap();
        let expected = Signer::builder("secret_key")
            .salt("salt")
            .separator(":")
            .key_derivation(KeyDerivation::Hmac)
            .digest_method(DigestMethod::Sha256)
            .build()
            .unwrap();
        assert_eq!(signer.sign("v"), expected.sign("v"));
    }

    #[test]
    fn test_default_config_matches_reference_vector() {
        let config = SignerConfig {
            salt: "salt".to_owned(),
            ..SignerConfig::default()
        };
        let signer = config.build_signer("secret_key").unwrap();
        assert_eq!(signer.sign("my string"), "my string.xv0r21ogoygusbkJA01c4OxsAio");
    }

    #[test]
    fn test_zero_max_age_means_never() {
        let config = SignerConfig::from_toml_str("max_age_secs = 0").unwrap();
        assert_eq!(config.max_age(), None);
    }

    #[test]
    fn test_unknown_derivation() {
        let err = SignerConfig::from_toml_str(r#"key_derivation = "scrypt""#).unwrap_err();
        assert!(matches!(err, SigningError::UnknownDerivation(_)));
    }

    #[test]
    fn test_bad_separator() {
        let err = SignerConfig::from_toml_str(r#"separator = "x""#).unwrap_err();
        assert!(matches!(err, SigningError::InvalidSeparator(_)));
    }

    #[test]
    fn test_unknown_field_and_digest() {
        assert!(matches!(
            SignerConfig::from_toml_str(r#"secret = "oops""#),
            Err(SigningError::Config(_))
        ));
        assert!(matches!(
            SignerConfig::from_toml_str(r#"digest_method = "md5""#),
            Err(SigningError::Config(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SignerConfig {
            max_age_secs: Some(60),
            digest_method: DigestMethod::Sha512,
            ..SignerConfig::default()
        };
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(SignerConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_none_algorithm_config() {
        let config = SignerConfig::from_toml_str(r#"algorithm = "none""#).unwrap();
        let signer = config.build_signer("secret_key").unwrap();
        assert_eq!(signer.sign("v"), "v.");
    }
}
