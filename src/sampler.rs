//! Seeded polynomial samplers.
//!
//! Every sampler takes its seed explicitly, so identical seeds reproduce
//! identical polynomials. [`fill_random`] and [`fresh_seed`] are the only entry
//! points that touch a random source.

use lattice_hash::XofReader;
use lattice_math::{
    sample::{self, cbd_buf_bytes, check_eta},
    Polynomial, Ring, Vector, SYMBYTES,
};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::Error;

/// Uniform polynomial from the SHAKE-128 stream of `seed ‖ x ‖ y`.
#[must_use]
pub fn sample_uniform(ring: &Ring, seed: &[u8; SYMBYTES], x: u8, y: u8) -> Polynomial {
    let mut xof = lattice_hash::xof_absorb(seed, x, y);
    sample::reject_uniform(ring, |buf| xof.read(buf))
}

/// `CBD_eta` polynomial from the SHAKE-256 stream of `seed ‖ nonce`.
pub fn sample_cbd(
    ring: &Ring,
    eta: usize,
    seed: &[u8; SYMBYTES],
    nonce: u8,
) -> Result<Polynomial, Error> {
    check_eta(eta)?;
    let mut buf = Zeroizing::new(vec![0u8; cbd_buf_bytes(eta, ring.degree())]);
    lattice_hash::prf(seed, nonce, &mut buf);
    Ok(sample::cbd(ring, eta, &buf)?)
}

/// `k` CBD polynomials with consecutive nonces starting at `first_nonce`.
pub fn sample_cbd_vector(
    ring: &Ring,
    eta: usize,
    seed: &[u8; SYMBYTES],
    first_nonce: u8,
    k: usize,
) -> Result<Vector, Error> {
    (0..k)
        .map(|i| sample_cbd(ring, eta, seed, first_nonce.wrapping_add(i as u8)))
        .collect::<Result<Vec<_>, _>>()
        .map(Vector::from)
}

/// Fill `buf` from `rng`, surfacing a source failure as
/// [`Error::RandomnessUnavailable`].
pub fn fill_random<R: RngCore + CryptoRng>(rng: &mut R, buf: &mut [u8]) -> Result<(), Error> {
    rng.try_fill_bytes(buf).map_err(Error::RandomnessUnavailable)
}

/// A fresh 32-byte seed from `rng`.
pub fn fresh_seed<R: RngCore + CryptoRng>(rng: &mut R) -> Result<[u8; SYMBYTES], Error> {
    let mut seed = [0u8; SYMBYTES];
    fill_random(rng, &mut seed)?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};

    use super::*;

    fn ring() -> Ring {
        Ring::new(256, 3329).unwrap()
    }

    #[test]
    fn uniform_is_seed_determined() {
        let ring = ring();
        let seed = [42u8; SYMBYTES];
        let a = sample_uniform(&ring, &seed, 0, 1);
        assert_eq!(a, sample_uniform(&ring, &seed, 0, 1));
        assert_ne!(a, sample_uniform(&ring, &seed, 1, 0));
        assert_ne!(a, sample_uniform(&ring, &[43u8; SYMBYTES], 0, 1));
        assert!(ring.contains(&a));
    }

    #[test]
    fn cbd_is_seed_determined_and_bounded() {
        let ring = ring();
        let seed = [9u8; SYMBYTES];
        for eta in 1..=8 {
            let p = sample_cbd(&ring, eta, &seed, 0).unwrap();
            assert_eq!(p, sample_cbd(&ring, eta, &seed, 0).unwrap());
            let bound = eta as i32;
            assert!(p
                .coeffs()
                .iter()
                .all(|&c| (-bound..=bound).contains(&ring.reducer().centered(c))));
        }
        assert!(matches!(
            sample_cbd(&ring, 0, &seed, 0),
            Err(Error::InvalidParameter(lattice_math::Error::InvalidEta(0)))
        ));
    }

    #[test]
    fn cbd_vector_uses_consecutive_nonces() {
        let ring = ring();
        let seed = [3u8; SYMBYTES];
        let v = sample_cbd_vector(&ring, 2, &seed, 4, 3).unwrap();
        assert_eq!(v.rank(), 3);
        for (i, p) in v.polys().iter().enumerate() {
            assert_eq!(p, &sample_cbd(&ring, 2, &seed, 4 + i as u8).unwrap());
        }
    }

    #[test]
    fn fresh_seeds_follow_the_rng() {
        let mut a = ChaCha20Rng::seed_from_u64(7);
        let mut b = ChaCha20Rng::seed_from_u64(7);
        let s1 = fresh_seed(&mut a).unwrap();
        assert_eq!(s1, fresh_seed(&mut b).unwrap());
        assert_ne!(s1, fresh_seed(&mut a).unwrap());
    }
}
