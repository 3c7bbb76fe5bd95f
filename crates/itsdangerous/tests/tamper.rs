//! Any single-character change to a token must be rejected.

use itsdangerous::SigningError;
use itsdangerous_test::*;

/// Every variant of `token` with one character replaced.
fn single_char_mutations(token: &str) -> Vec<String> {
    let mut out = Vec::new();
    for (i, c) in token.char_indices() {
        let replacement = if c == 'A' { 'B' } else { 'A' };
        let mut mutated = String::with_capacity(token.len());
        mutated.push_str(&token[..i]);
        mutated.push(replacement);
        mutated.push_str(&token[i + c.len_utf8()..]);
        out.push(mutated);
    }
    out
}

#[test]
fn signer_rejects_every_mutation() {
    let signer = test_signer();
    for mutated in single_char_mutations(SIGNED_MY_STRING) {
        let err = signer.unsign(&mutated).unwrap_err();
        assert!(err.is_invalid_signature(), "{mutated}: {err}");
    }
}

#[test]
fn timestamp_signer_rejects_every_mutation() {
    let clock = MockClock::at(REFERENCE_TIME);
    let signer = test_timestamp_signer(&clock);
    for mutated in single_char_mutations(TIMED_MY_STRING) {
        let err = signer.unsign(&mutated, None).unwrap_err();
        assert!(err.is_invalid_signature(), "{mutated}: {err}");
        assert!(err.expired().is_none(), "{mutated}: {err}");
    }
}

#[test]
fn serializer_rejects_every_mutation_before_decoding() {
    let serializer = test_serializer();
    for mutated in single_char_mutations(MARSHALLED_MAP) {
        let err = serializer.unmarshal::<serde_json::Value>(&mutated).unwrap_err();
        assert!(
            matches!(err, SigningError::InvalidSignature(_)),
            "{mutated}: {err}"
        );
    }
}

#[test]
fn truncated_tokens_are_rejected() {
    let signer = test_signer();
    for end in 0..SIGNED_MY_STRING.len() {
        assert!(!signer.validate(&SIGNED_MY_STRING[..end]), "{end}");
    }
}

#[test]
fn other_secret_is_rejected() {
    let other = itsdangerous::Signer::new("another_key", TEST_SALT);
    assert!(other.unsign(SIGNED_MY_STRING).unwrap_err().is_invalid_signature());
}
