//! Signers are shared across threads without locking.

use std::sync::Arc;
use std::thread;

use itsdangerous::{Signer, TimestampSigner, UrlSafeSerializer};
use itsdangerous_test::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn signer_types_are_send_and_sync() {
    assert_send_sync::<Signer>();
    assert_send_sync::<TimestampSigner>();
    assert_send_sync::<UrlSafeSerializer>();
    assert_send_sync::<itsdangerous::UrlSafeTimedSerializer>();
}

#[test]
fn shared_signer_is_consistent_across_threads() {
    let signer = Arc::new(test_signer());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let signer = Arc::clone(&signer);
            thread::spawn(move || {
                for i in 0..100 {
                    let value = format!("thread-{t}-value-{i}");
                    let signed = signer.sign(&value);
                    assert_eq!(signer.unsign(&signed).unwrap(), value);
                }
                signer.sign("my string")
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), SIGNED_MY_STRING);
    }
}

#[test]
fn shared_timestamp_signer_uses_one_clock() {
    let clock = MockClock::at(REFERENCE_TIME);
    let signer = Arc::new(test_timestamp_signer(&clock));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let signer = Arc::clone(&signer);
            thread::spawn(move || signer.sign("my string"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), TIMED_MY_STRING);
    }
}
