//! The HChaCha20 subkey-derivation function.

use crate::{CONSTANTS, KEY_SIZE, STATE_WORDS, quarter_round};

/// The HChaCha20 function: compresses a key and a 16-byte nonce prefix into
/// a fresh 32-byte subkey, extending the effective nonce space of ChaCha20
/// in the same manner HSalsa extends Salsa.
///
/// The state is initialized like the block function except that words 12..16
/// take the 16-byte input in place of the counter and nonce. After the 20
/// rounds the original state is *not* added back; the output is the raw
/// permuted words 0..4 and 12..16, serialized little-endian. Both
/// asymmetries are what make the derived subkey independent of the keystream
/// blocks later generated from it — altering either unrecoverably changes
/// every ciphertext.
///
/// Specified in draft-irtf-cfrg-xchacha §2.2.
pub fn hchacha20(key: &[u8; KEY_SIZE], input: &[u8; 16]) -> [u8; KEY_SIZE] {
    let mut state = [0u32; STATE_WORDS];
    state[..4].copy_from_slice(&CONSTANTS);
    for (v, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
        *v = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    for (v, chunk) in state[12..].iter_mut().zip(input.chunks_exact(4)) {
        *v = u32::from_le_bytes(chunk.try_into().unwrap());
    }

    for _ in 0..10 {
        // column rounds
        quarter_round(0, 4, 8, 12, &mut state);
        quarter_round(1, 5, 9, 13, &mut state);
        quarter_round(2, 6, 10, 14, &mut state);
        quarter_round(3, 7, 11, 15, &mut state);

        // diagonal rounds
        quarter_round(0, 5, 10, 15, &mut state);
        quarter_round(1, 6, 11, 12, &mut state);
        quarter_round(2, 7, 8, 13, &mut state);
        quarter_round(3, 4, 9, 14, &mut state);
    }

    let mut output = [0u8; KEY_SIZE];
    for (chunk, val) in output[..16].chunks_exact_mut(4).zip(&state[..4]) {
        chunk.copy_from_slice(&val.to_le_bytes());
    }
    for (chunk, val) in output[16..].chunks_exact_mut(4).zip(&state[12..]) {
        chunk.copy_from_slice(&val.to_le_bytes());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    /// Test vector from draft-irtf-cfrg-xchacha §2.2.1.
    #[test]
    fn test_vector() {
        const KEY: [u8; 32] = hex!(
            "000102030405060708090a0b0c0d0e0f"
            "101112131415161718191a1b1c1d1e1f"
        );

        const INPUT: [u8; 16] = hex!("000000090000004a0000000031415927");

        const OUTPUT: [u8; 32] = hex!(
            "82413b4227b27bfed30e42508a877d73"
            "a0f9e4d58a74a853c12ec41326d3ecdc"
        );

        assert_eq!(hchacha20(&KEY, &INPUT), OUTPUT);
    }

    /// Pure function: same inputs, same subkey, every call.
    #[test]
    fn deterministic() {
        let key = *b"passky-unit-test-key-0123456789!";
        let prefix = *b"totally-random-n";

        let first = hchacha20(&key, &prefix);
        assert_eq!(
            first,
            hex!("c36c7617732a4b253fc24a08c906aa22f457db1bb3009c7e014808073b78d0a4")
        );
        assert_eq!(hchacha20(&key, &prefix), first);
    }
}
