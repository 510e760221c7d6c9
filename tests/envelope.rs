//! Behavior tests for the public envelope API.

use base64::{Engine, engine::general_purpose::STANDARD};
use passky_cipher::{EnvelopeError, XNONCE_SIZE, decrypt, decrypt_bytes, encrypt, encrypt_bytes};
use proptest::prelude::*;

const KEY: &[u8] = b"passky-unit-test-key-0123456789!";

/// Reverses the text-safe encoding outside the crate: base64, then narrow
/// each Latin-1 code point back to one byte.
fn decode_raw(envelope: &str) -> Vec<u8> {
    let widened = String::from_utf8(STANDARD.decode(envelope).unwrap()).unwrap();
    widened.chars().map(|c| u8::try_from(u32::from(c)).unwrap()).collect()
}

/// Builds an envelope string from raw bytes, for feeding malformed data in.
fn encode_raw(bytes: &[u8]) -> String {
    let widened: String = bytes.iter().map(|&b| char::from(b)).collect();
    STANDARD.encode(widened.as_bytes())
}

#[test]
fn round_trip_text() {
    let secret = "2b00042f7481c7b056c4b410d28f33cf";
    let sealed = encrypt("correct horse battery staple", secret).unwrap();
    assert_eq!(decrypt(&sealed, secret).unwrap(), "correct horse battery staple");
}

#[test]
fn round_trip_full_latin1_range() {
    let message: String = (1u8..=255).map(char::from).collect();
    let sealed = encrypt(&message, "clé-à-caractères-étendus").unwrap();
    assert_eq!(decrypt(&sealed, "clé-à-caractères-étendus").unwrap(), message);
}

#[test]
fn fresh_nonce_per_call() {
    let a = encrypt_bytes(b"same plaintext", KEY);
    let b = encrypt_bytes(b"same plaintext", KEY);
    assert_ne!(a, b);

    // and both still open
    assert_eq!(decrypt_bytes(&a, KEY).unwrap(), b"same plaintext");
    assert_eq!(decrypt_bytes(&b, KEY).unwrap(), b"same plaintext");
}

#[test]
fn envelope_is_plaintext_plus_nonce() {
    for len in [0usize, 1, 63, 64, 65, 4096] {
        let plaintext = vec![0xabu8; len];
        let sealed = encrypt_bytes(&plaintext, KEY);
        assert_eq!(decode_raw(&sealed).len(), len + XNONCE_SIZE);
    }
}

#[test]
fn empty_message() {
    let sealed = encrypt("", "some-secret").unwrap();
    assert_eq!(decode_raw(&sealed).len(), XNONCE_SIZE);
    assert_eq!(decrypt(&sealed, "some-secret").unwrap(), "");
}

#[test]
fn wrong_key_yields_garbage_not_error() {
    let sealed = encrypt_bytes(b"top secret", KEY);
    let opened = decrypt_bytes(&sealed, b"not-the-key").unwrap();
    assert_ne!(opened, b"top secret");
}

#[test]
fn rejects_invalid_base64() {
    assert!(matches!(
        decrypt_bytes("not&valid&base64", KEY),
        Err(EnvelopeError::Base64(_))
    ));
}

#[test]
fn rejects_non_byte_preserving_payload() {
    // valid base64, but the payload is not UTF-8
    let bad_utf8 = STANDARD.encode([0xff, 0xfe, 0xfd]);
    assert!(matches!(decrypt_bytes(&bad_utf8, KEY), Err(EnvelopeError::Malformed)));

    // valid UTF-8, but a code point above U+00FF
    let high = STANDARD.encode("Ā".repeat(XNONCE_SIZE));
    assert!(matches!(decrypt_bytes(&high, KEY), Err(EnvelopeError::Malformed)));
}

#[test]
fn rejects_truncated_envelope() {
    let short = encode_raw(&[0u8; 10]);
    assert!(matches!(
        decrypt_bytes(&short, KEY),
        Err(EnvelopeError::Truncated { len: 10 })
    ));
}

#[test]
fn rejects_non_latin1_text() {
    assert!(matches!(
        encrypt("snowman ☃", "key"),
        Err(EnvelopeError::NonLatin1 { ch: '☃', index: 8 })
    ));
    assert!(matches!(
        decrypt("dG90YWxseS1yYW5kb20tbm9uY2UyNGIh", "ключ"),
        Err(EnvelopeError::NonLatin1 { index: 0, .. })
    ));
}

proptest! {
    /// decrypt(encrypt(p, k), k) == p for random keys and 0–10,000 byte
    /// plaintexts. Plaintexts ending in NUL are exercised separately through
    /// the byte API, which does not strip.
    #[test]
    fn round_trip_law(
        plaintext in proptest::collection::vec(any::<u8>(), 0..10_000),
        key in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let sealed = encrypt_bytes(&plaintext, &key);
        prop_assert_eq!(decrypt_bytes(&sealed, &key).unwrap(), plaintext);
    }

    /// Text round trip for Latin-1 strings not ending in NUL.
    #[test]
    fn round_trip_law_text(
        message in proptest::collection::vec(1u8..=255, 0..2_000),
        key in proptest::collection::vec(1u8..=255, 1..64),
    ) {
        let message: String = message.iter().map(|&b| char::from(b)).collect();
        let key: String = key.iter().map(|&b| char::from(b)).collect();

        let sealed = encrypt(&message, &key).unwrap();
        prop_assert_eq!(decrypt(&sealed, &key).unwrap(), message);
    }
}
