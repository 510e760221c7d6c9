//! Client-side field encryption for the Passky password manager.
//!
//! Passky stores each credential field (website, username, password, message)
//! encrypted in the browser before it ever reaches the server. This crate is
//! the cipher engine behind that: XChaCha20, built from the RFC 8439 ChaCha20
//! block function with an HChaCha20 subkey-derivation step that extends the
//! nonce to 24 bytes, plus the text-safe envelope format the stored
//! ciphertexts use (ciphertext ++ nonce, widened to Latin-1 code points,
//! UTF-8 encoded, base64).
//!
//! The two entry points are [`encrypt`] and [`decrypt`] (or their byte-level
//! counterparts [`encrypt_bytes`] and [`decrypt_bytes`]). The block-level
//! functions [`chacha20_block`], [`hchacha20`] and [`apply_keystream`] are
//! exposed for callers that manage nonces themselves.
//!
//! # ⚠️ Security Warning: Hazmat!
//!
//! This cipher provides confidentiality only. Ciphertexts carry no
//! authentication tag: a tampered or truncated envelope decrypts without
//! error into garbage. Layering a MAC on top is the caller's job — adding
//! one here would break compatibility with already-stored ciphertexts.
//!
//! # Example
//!
//! ```
//! let secret = "2b00042f7481c7b056c4b410d28f33cf";
//!
//! let sealed = passky_cipher::encrypt("hunter2", secret)?;
//! let opened = passky_cipher::decrypt(&sealed, secret)?;
//! assert_eq!(opened, "hunter2");
//! # Ok::<(), passky_cipher::EnvelopeError>(())
//! ```

#![warn(missing_docs, rust_2018_idioms, trivial_casts, unused_qualifications)]

mod block;
mod envelope;
mod error;
mod hchacha;
mod stream;

pub use block::chacha20_block;
pub use envelope::{decrypt, decrypt_bytes, encrypt, encrypt_bytes};
pub use error::EnvelopeError;
pub use hchacha::hchacha20;
pub use stream::apply_keystream;

/// Number of 32-bit words in the ChaCha state.
pub(crate) const STATE_WORDS: usize = 16;

/// State initialization constants ("expand 32-byte k").
pub(crate) const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// Size of a single keystream block in bytes.
pub const BLOCK_SIZE: usize = 64;

/// ChaCha20 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Nonce size of the ChaCha20 block function in bytes (RFC 8439).
pub const NONCE_SIZE: usize = 12;

/// Extended XChaCha20 nonce size in bytes, appended to every envelope.
pub const XNONCE_SIZE: usize = 24;

/// The ChaCha quarter round: the add-rotate-xor sequence over four state
/// words, with wrapping 32-bit arithmetic throughout.
pub(crate) fn quarter_round(a: usize, b: usize, c: usize, d: usize, state: &mut [u32; STATE_WORDS]) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}
