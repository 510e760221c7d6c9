//! Error type for envelope encoding and decoding.

use thiserror::Error;

/// Errors surfaced by the envelope API.
///
/// Note what is *not* here: a tampered ciphertext of valid shape decrypts
/// without error into garbage, since the cipher carries no authentication
/// tag. Callers needing integrity must layer a MAC above this crate.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The envelope is not valid base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The base64 payload is not the byte-preserving text form envelopes
    /// are stored in (invalid UTF-8, or a code point above U+00FF).
    #[error("envelope payload is not a byte-preserving text encoding")]
    Malformed,

    /// The decoded envelope is shorter than the trailing 24-byte nonce.
    #[error("envelope too short: {len} bytes, need at least 24")]
    Truncated {
        /// Decoded envelope length in bytes.
        len: usize,
    },

    /// The text API was given a character outside the one-byte-per-char
    /// Latin-1 contract. Pass UTF-8 bytes through [`crate::encrypt_bytes`]
    /// instead.
    #[error("character {ch:?} at index {index} is outside the Latin-1 range")]
    NonLatin1 {
        /// The offending character.
        ch: char,
        /// Character index within the input string.
        index: usize,
    },
}
