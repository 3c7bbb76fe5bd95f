//! Prelude module - commonly used test helpers.

pub use crate::fixtures::{
    REFERENCE_TIME, TEST_SALT, TEST_SECRET, test_serializer, test_signer, test_timed_serializer,
    test_timestamp_signer,
};
pub use crate::harness::init_test_tracing;
pub use crate::mocks::MockClock;
