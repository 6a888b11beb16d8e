//! Hash and extendable-output function (XOF) adapters.
//!
//! Wraps the SHA-3 family in the roles a module-lattice KEM needs:
//!
//! | Role    | Primitive | Function |
//! |---------|-----------|----------|
//! | **H**   | SHA3-256  | [`hash_h`], [`hash_h_parts`] |
//! | **G**   | SHA3-512  | [`hash_g`] |
//! | **PRF** | SHAKE-256 | [`prf`] |
//! | **XOF** | SHAKE-128 | [`xof_absorb`] |
//! | **J**   | SHAKE-256 | [`rkprf`] |
//!
//! Every input is a domain-separated byte string: a seed followed by short
//! context bytes (indices or nonces).

#![deny(unsafe_code)]

use lattice_math::SYMBYTES;
use sha3::digest::{ExtendableOutput, Update};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

pub use sha3::digest::XofReader;

/// H(input) = SHA3-256(input).
#[inline]
#[must_use]
pub fn hash_h(input: &[u8]) -> [u8; SYMBYTES] {
    hash_h_parts(&[input])
}

/// H over the concatenation of `parts`, without allocating the concatenation.
#[must_use]
pub fn hash_h_parts(parts: &[&[u8]]) -> [u8; SYMBYTES] {
    let mut h = Sha3_256::new();
    for part in parts {
        Digest::update(&mut h, part);
    }
    h.finalize().into()
}

/// G(input) = SHA3-512(input), split into two 32-byte halves.
#[must_use]
pub fn hash_g(input: &[u8]) -> ([u8; SYMBYTES], [u8; SYMBYTES]) {
    let mut h = Sha3_512::new();
    Digest::update(&mut h, input);
    let out = h.finalize();
    let mut lo = [0u8; SYMBYTES];
    let mut hi = [0u8; SYMBYTES];
    lo.copy_from_slice(&out[..SYMBYTES]);
    hi.copy_from_slice(&out[SYMBYTES..]);
    (lo, hi)
}

/// PRF(seed, nonce) = SHAKE-256(seed ‖ nonce), squeezed to fill `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    let mut h = Shake256::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[nonce]);
    h.finalize_xof().read(output);
}

/// SHAKE-128 reader over `seed ‖ x ‖ y`, for matrix expansion.
pub fn xof_absorb(seed: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    let mut h = Shake128::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[x, y]);
    h.finalize_xof()
}

/// J(key, ct) = SHAKE-256(key ‖ ct), truncated to 32 bytes.
///
/// The implicit-rejection value returned by decapsulation on a mismatch.
#[must_use]
pub fn rkprf(key: &[u8; SYMBYTES], ct: &[u8]) -> [u8; SYMBYTES] {
    let mut h = Shake256::default();
    Update::update(&mut h, key);
    Update::update(&mut h, ct);
    let mut out = [0u8; SYMBYTES];
    h.finalize_xof().read(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn sha3_256_empty() {
        assert_eq!(
            hex(&hash_h(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn sha3_512_abc_halves() {
        let (lo, hi) = hash_g(b"abc");
        assert_eq!(
            hex(&lo),
            "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e"
        );
        assert_eq!(
            hex(&hi),
            "10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
        );
    }

    #[test]
    fn parts_match_concatenation() {
        let joined = hash_h(b"hello world");
        assert_eq!(hash_h_parts(&[b"hello".as_slice(), b" ", b"world"]), joined);
        assert_eq!(hash_h_parts(&[b"hello world".as_slice(), b""]), joined);
    }

    #[test]
    fn prf_is_a_prefix_stream() {
        let seed = [7u8; SYMBYTES];
        let mut short = [0u8; 64];
        let mut long = [0u8; 192];
        prf(&seed, 3, &mut short);
        prf(&seed, 3, &mut long);
        assert_eq!(short, long[..64]);

        let mut other = [0u8; 64];
        prf(&seed, 4, &mut other);
        assert_ne!(short, other);
    }

    #[test]
    fn xof_indices_are_ordered() {
        let seed = [1u8; SYMBYTES];
        let mut a = [0u8; 168];
        let mut b = [0u8; 168];
        xof_absorb(&seed, 0, 1).read(&mut a);
        xof_absorb(&seed, 1, 0).read(&mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn rkprf_depends_on_key_and_ciphertext() {
        let ct = [0xAAu8; 40];
        let base = rkprf(&[0u8; SYMBYTES], &ct);
        assert_ne!(base, rkprf(&[1u8; SYMBYTES], &ct));
        assert_ne!(base, rkprf(&[0u8; SYMBYTES], &ct[..39]));
        assert_eq!(base, rkprf(&[0u8; SYMBYTES], &ct));
    }
}
