//! Shared test utilities for the itsdangerous crates.
//!
//! Provides the reference vectors, signer fixtures pinned to known
//! instants, a controllable clock and a tracing bootstrap.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! itsdangerous-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use itsdangerous_test::{MockClock, REFERENCE_TIME, test_timestamp_signer};
//!
//! #[test]
//! fn expires_after_five_minutes() {
//!     let clock = MockClock::at(REFERENCE_TIME);
//!     let signer = test_timestamp_signer(&clock);
//!     let token = signer.sign("value");
//!     clock.advance(301);
//!     assert!(signer.unsign(&token, Some(std::time::Duration::from_secs(300))).is_err());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
