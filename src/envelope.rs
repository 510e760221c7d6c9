//! The XChaCha20 ciphertext envelope used for stored credential fields.
//!
//! An envelope is `ciphertext ++ nonce` (24-byte nonce last), made
//! text-safe by widening each byte to the Unicode code point U+0000–U+00FF,
//! UTF-8 encoding the resulting string and base64-encoding that. The
//! widening step looks redundant next to plain base64 but reproduces the
//! `btoa(encodeURIComponent(...))` pipeline of the original browser SDK, so
//! envelopes written by either implementation decode in both.

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

use crate::error::EnvelopeError;
use crate::hchacha::hchacha20;
use crate::stream::apply_keystream;
use crate::{KEY_SIZE, NONCE_SIZE, XNONCE_SIZE};

/// Encrypts `plaintext` under `key` and returns the text-safe envelope.
///
/// A fresh 24-byte nonce is drawn from the OS CSPRNG per call, so two
/// encryptions of the same plaintext never produce the same envelope.
/// `key` may be any length: the first 32 bytes are used, shorter keys are
/// zero-padded (Passky account keys are 128-char sha512 hex strings, of
/// which only the first 32 bytes ever feed the cipher).
#[must_use]
pub fn encrypt_bytes(plaintext: &[u8], key: &[u8]) -> String {
    let mut nonce = [0u8; XNONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let sealed = seal_with_nonce(plaintext, key, &nonce);
    encode_envelope(&sealed)
}

/// Decodes a text-safe envelope and decrypts it under `key`.
///
/// # Errors
///
/// Fails if the envelope is not valid base64, not the byte-preserving text
/// form, or shorter than the trailing nonce. A tampered envelope of valid
/// shape decrypts silently into garbage; see the crate-level warning.
pub fn decrypt_bytes(encoded: &str, key: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    let mut sealed = decode_envelope(encoded)?;
    if sealed.len() < XNONCE_SIZE {
        return Err(EnvelopeError::Truncated { len: sealed.len() });
    }

    let split = sealed.len() - XNONCE_SIZE;
    let nonce: [u8; XNONCE_SIZE] = sealed[split..].try_into().expect("24-byte trailing nonce");
    sealed.truncate(split);

    let mut key32 = normalize_key(key);
    let mut subkey = hchacha20(&key32, nonce[..16].as_ref().try_into().expect("16-byte nonce prefix"));

    let mut chacha_nonce = [0u8; NONCE_SIZE];
    chacha_nonce[4..].copy_from_slice(&nonce[16..]);

    apply_keystream(&subkey, 0, &chacha_nonce, &mut sealed);
    subkey.zeroize();
    key32.zeroize();

    Ok(sealed)
}

/// Encrypts a credential field string under a secret key string.
///
/// Both strings are taken one byte per character: every `char` must fall in
/// the Latin-1 range (U+0000–U+00FF). This is the contract the original SDK
/// imposed implicitly via character codes; here it is enforced.
///
/// # Errors
///
/// Fails with [`EnvelopeError::NonLatin1`] if either string contains a
/// character above U+00FF. Arbitrary text should be UTF-8 encoded by the
/// caller and passed through [`encrypt_bytes`].
pub fn encrypt(message: &str, secret_key: &str) -> Result<String, EnvelopeError> {
    let plaintext = latin1_bytes(message)?;
    let key = latin1_bytes(secret_key)?;
    Ok(encrypt_bytes(&plaintext, &key))
}

/// Decrypts an envelope produced by [`encrypt`] back into a string.
///
/// If the recovered plaintext ends in a single NUL byte it is stripped:
/// envelopes written by the original SDK carry one surplus keystream byte
/// that decrypts to NUL. This is a compatibility workaround, not a padding
/// scheme — a legitimate message ending in NUL loses that byte.
///
/// # Errors
///
/// Same failure modes as [`decrypt_bytes`], plus [`EnvelopeError::NonLatin1`]
/// for the key string.
pub fn decrypt(encoded: &str, secret_key: &str) -> Result<String, EnvelopeError> {
    let key = latin1_bytes(secret_key)?;
    let mut plaintext = decrypt_bytes(encoded, &key)?;
    if plaintext.last() == Some(&0) {
        plaintext.pop();
    }
    Ok(plaintext.iter().map(|&b| char::from(b)).collect())
}

/// Seals `plaintext` with a caller-supplied nonce: derive the subkey from
/// the nonce prefix, run the stream cipher with the reduced nonce, append
/// the full nonce.
fn seal_with_nonce(plaintext: &[u8], key: &[u8], nonce: &[u8; XNONCE_SIZE]) -> Vec<u8> {
    let mut key32 = normalize_key(key);
    let mut subkey = hchacha20(&key32, nonce[..16].as_ref().try_into().expect("16-byte nonce prefix"));

    // first 4 bytes zero, last 8 from the extended nonce
    // (draft-irtf-cfrg-xchacha construction)
    let mut chacha_nonce = [0u8; NONCE_SIZE];
    chacha_nonce[4..].copy_from_slice(&nonce[16..]);

    let mut out = plaintext.to_vec();
    apply_keystream(&subkey, 0, &chacha_nonce, &mut out);
    out.extend_from_slice(nonce);

    subkey.zeroize();
    key32.zeroize();
    out
}

/// First 32 key bytes, zero-padded if fewer are given.
fn normalize_key(key: &[u8]) -> [u8; KEY_SIZE] {
    let mut key32 = [0u8; KEY_SIZE];
    for (dst, src) in key32.iter_mut().zip(key.iter()) {
        *dst = *src;
    }
    key32
}

/// One byte per character, rejecting anything above U+00FF.
fn latin1_bytes(text: &str) -> Result<Vec<u8>, EnvelopeError> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            u8::try_from(u32::from(ch)).map_err(|_| EnvelopeError::NonLatin1 { ch, index })
        })
        .collect()
}

/// Widens each envelope byte to a Latin-1 code point and base64-encodes the
/// UTF-8 form of the resulting string.
fn encode_envelope(bytes: &[u8]) -> String {
    let widened: String = bytes.iter().map(|&b| char::from(b)).collect();
    STANDARD.encode(widened.as_bytes())
}

/// Losslessly reverses [`encode_envelope`].
fn decode_envelope(encoded: &str) -> Result<Vec<u8>, EnvelopeError> {
    let raw = STANDARD.decode(encoded)?;
    let widened = String::from_utf8(raw).map_err(|_| EnvelopeError::Malformed)?;
    widened
        .chars()
        .map(|ch| u8::try_from(u32::from(ch)).map_err(|_| EnvelopeError::Malformed))
        .collect()
}
