//! Inner public-key encryption scheme. Not exposed directly; called by
//! [`crate::kem`].

use lattice_math::{
    compress,
    encode::{message_to_poly, poly_to_message},
    Ring, Vector, SYMBYTES,
};
use zeroize::{Zeroize, Zeroizing};

use crate::{
    matrix::expand_matrix,
    sampler::{sample_cbd, sample_cbd_vector},
    Ciphertext, Error, Message, Parameters, PublicKey,
};

/// Deterministic key generation from the 32-byte seed `d`.
///
/// `(rho, sigma) = G(d ‖ k)`; `s` and `e` take PRF nonces `0..k` and `k..2k`
/// under `sigma`.
pub(crate) fn generate(
    params: &Parameters,
    ring: &Ring,
    d: &[u8; SYMBYTES],
) -> Result<(PublicKey, Vector), Error> {
    let k = params.k;

    let mut g_input = Zeroizing::new([0u8; SYMBYTES + 1]);
    g_input[..SYMBYTES].copy_from_slice(d);
    g_input[SYMBYTES] = k as u8;
    let (rho, sigma) = lattice_hash::hash_g(&*g_input);
    let sigma = Zeroizing::new(sigma);

    let a = expand_matrix(ring, &rho, k);
    let s = sample_cbd_vector(ring, params.eta1, &sigma, 0, k)?;
    let mut e = sample_cbd_vector(ring, params.eta2, &sigma, k as u8, k)?;

    let t = a.mul_vector(ring, &s).add(ring, &e);
    e.zeroize();

    let pk = PublicKey {
        ring: *ring,
        seed: rho,
        t,
    };
    Ok((pk, s))
}

/// Deterministic encryption of `m` under `pk` with randomness `coins`.
///
/// `r`, `e1` and `e2` take PRF nonces `0..k`, `k..2k` and `2k`.
pub(crate) fn encrypt(
    params: &Parameters,
    ring: &Ring,
    pk: &PublicKey,
    m: &Message,
    coins: &[u8; SYMBYTES],
) -> Result<Ciphertext, Error> {
    let k = params.k;

    let a = expand_matrix(ring, &pk.seed, k);
    let mut r = sample_cbd_vector(ring, params.eta1, coins, 0, k)?;
    let mut e1 = sample_cbd_vector(ring, params.eta2, coins, k as u8, k)?;
    let mut e2 = sample_cbd(ring, params.eta2, coins, (2 * k) as u8)?;
    let mut mu = message_to_poly(ring, m.as_bytes())?;

    let u = a.transpose_mul_vector(ring, &r).add(ring, &e1);
    let v = ring.add(&ring.add(&pk.t.dot(ring, &r), &e2), &mu);

    r.zeroize();
    e1.zeroize();
    e2.zeroize();
    mu.zeroize();

    Ok(Ciphertext {
        u: u.polys()
            .iter()
            .map(|p| compress::compress(ring, p, params.du))
            .collect::<Result<_, _>>()?,
        v: compress::compress(ring, &v, params.dv)?,
    })
}

/// Recover the message: `w = v - s · u`, each coefficient rounded to the
/// nearer of `0` and `floor(q / 2)`.
pub(crate) fn decrypt(ring: &Ring, s: &Vector, ct: &Ciphertext) -> Message {
    let (u, v) = ct.decompress(ring);
    let mut su = s.dot(ring, &u);
    let mut w = ring.sub(&v, &su);
    let m = Message::from_decoded(poly_to_message(ring, &w));
    su.zeroize();
    w.zeroize();
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_then_decrypt_recovers_message() {
        let params = Parameters::ML_KEM_512;
        let ring = params.validate().unwrap();
        let (pk, s) = generate(&params, &ring, &[0x11; SYMBYTES]).unwrap();
        let msg: Vec<u8> = (0..32u8).map(|i| i.wrapping_mul(97)).collect();
        let m = Message::from_bytes(&params, &msg).unwrap();

        let ct = encrypt(&params, &ring, &pk, &m, &[0x22; SYMBYTES]).unwrap();
        assert_eq!(decrypt(&ring, &s, &ct), m);
    }

    #[test]
    fn keygen_is_deterministic_and_sized() {
        let params = Parameters::ML_KEM_768;
        let ring = params.validate().unwrap();
        let (pk1, s1) = generate(&params, &ring, &[7; SYMBYTES]).unwrap();
        let (pk2, s2) = generate(&params, &ring, &[7; SYMBYTES]).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(s1, s2);
        assert_eq!(pk1.t.rank(), 3);
        assert!(pk1.t.is_in(&ring));

        let (pk3, _) = generate(&params, &ring, &[8; SYMBYTES]).unwrap();
        assert_ne!(pk1.seed, pk3.seed);
    }

    #[test]
    fn secret_is_small() {
        let params = Parameters::ML_KEM_512;
        let ring = params.validate().unwrap();
        let (_, s) = generate(&params, &ring, &[3; SYMBYTES]).unwrap();
        for p in s.polys() {
            for &c in p.coeffs() {
                assert!(ring.reducer().centered(c).abs() <= params.eta1 as i32);
            }
        }
    }
}
