//! Keystream application over arbitrary-length buffers.

use crate::block::chacha20_block;
use crate::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE};

/// XORs the ChaCha20 keystream for `(key, nonce)` into `data` in place,
/// starting at block `counter`.
///
/// One 64-byte block is generated per 64 bytes of data, incrementing the
/// counter each block; the unused tail of the final block is discarded.
/// Encryption and decryption are the same operation, so applying this twice
/// with identical parameters returns the buffer to its original contents.
/// Passky envelopes always start at counter 0.
pub fn apply_keystream(key: &[u8; KEY_SIZE], counter: u32, nonce: &[u8; NONCE_SIZE], data: &mut [u8]) {
    for (i, chunk) in data.chunks_mut(BLOCK_SIZE).enumerate() {
        let block = chacha20_block(key, nonce, counter.wrapping_add(i as u32));
        for (byte, ks) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= ks;
        }
    }
}
