//! Prelude module - commonly used types for convenient import.
//!
//! Use `use itsdangerous::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use itsdangerous::prelude::*;
//!
//! let serializer = UrlSafeSerializer::new("secret_key", "salt");
//! let token = serializer.marshal(&vec![1, 2, 3]).unwrap();
//! let value: Vec<u32> = serializer.unmarshal(&token).unwrap();
//! assert_eq!(value, vec![1, 2, 3]);
//! ```

// Errors
pub use crate::{BadSignature, DecodeError, SignatureExpired, SigningError, SigningResult};

// Signers
pub use crate::{Signer, SignerBuilder, TimestampSigner};

// Serializers
pub use crate::{UrlSafeSerializer, UrlSafeTimedSerializer};

// Algorithms and key derivation
pub use crate::{DigestMethod, KeyDerivation, SigningAlgorithm};

// Time
pub use crate::{Clock, FixedClock, SystemClock};

// Configuration
pub use crate::SignerConfig;
