//! The ChaCha20 block function (RFC 8439 §2.3).

use crate::{BLOCK_SIZE, CONSTANTS, KEY_SIZE, NONCE_SIZE, STATE_WORDS, quarter_round};

/// Runs the 20 ChaCha rounds over a copy of `state` and adds the original
/// state back in, word by word.
pub(crate) fn run_rounds(state: &[u32; STATE_WORDS]) -> [u32; STATE_WORDS] {
    let mut res = *state;

    for _ in 0..10 {
        // column rounds
        quarter_round(0, 4, 8, 12, &mut res);
        quarter_round(1, 5, 9, 13, &mut res);
        quarter_round(2, 6, 10, 14, &mut res);
        quarter_round(3, 7, 11, 15, &mut res);

        // diagonal rounds
        quarter_round(0, 5, 10, 15, &mut res);
        quarter_round(1, 6, 11, 12, &mut res);
        quarter_round(2, 7, 8, 13, &mut res);
        quarter_round(3, 4, 9, 14, &mut res);
    }

    for (s1, s0) in res.iter_mut().zip(state.iter()) {
        *s1 = s1.wrapping_add(*s0);
    }
    res
}

/// The ChaCha20 block function: produces one 64-byte keystream block for the
/// given key, nonce and block counter.
///
/// State layout per RFC 8439 §2.3: four constant words, eight little-endian
/// key words, the counter, three little-endian nonce words. The round count
/// is fixed at 20; ciphertexts produced with any other count are not
/// interoperable with stored Passky data.
pub fn chacha20_block(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    counter: u32,
) -> [u8; BLOCK_SIZE] {
    let mut state = [0u32; STATE_WORDS];
    state[..4].copy_from_slice(&CONSTANTS);
    for (v, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
        *v = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    state[12] = counter;
    for (v, chunk) in state[13..].iter_mut().zip(nonce.chunks_exact(4)) {
        *v = u32::from_le_bytes(chunk.try_into().unwrap());
    }

    let res = run_rounds(&state);

    let mut block = [0u8; BLOCK_SIZE];
    for (chunk, val) in block.chunks_exact_mut(4).zip(res.iter()) {
        chunk.copy_from_slice(&val.to_le_bytes());
    }
    block
}
