//! The IND-CCA key encapsulation mechanism.
//!
//! Decapsulation re-encrypts the recovered message and compares the result with
//! the received ciphertext in constant time. A mismatch is never reported: the
//! caller gets `J(z, ct)` instead of the real secret, computed and selected
//! without a branch on the outcome.

use lattice_math::{Ring, SYMBYTES};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    ct::{ciphertexts_equal, select_secret},
    pke,
    sampler::fill_random,
    Ciphertext, Error, Message, Parameters, PrivateKey, PublicKey, SharedSecret,
};

/// Deterministic key generation from 64 bytes of randomness `(d ‖ z)`.
///
/// `d` seeds the inner key pair; `z` is kept as the implicit-rejection seed.
pub fn keypair_derand(
    params: &Parameters,
    coins: &[u8; 2 * SYMBYTES],
) -> Result<(PublicKey, PrivateKey), Error> {
    let ring = params.validate()?;
    debug!(k = params.k, n = params.n, q = params.q, "generating key pair");

    let (d, z) = coins.split_at(SYMBYTES);
    let mut d_arr = Zeroizing::new([0u8; SYMBYTES]);
    d_arr.copy_from_slice(d);

    let (pk, s) = pke::generate(params, &ring, &d_arr)?;
    let mut sk = PrivateKey {
        s,
        z: [0u8; SYMBYTES],
    };
    sk.z.copy_from_slice(z);
    Ok((pk, sk))
}

/// Randomized key generation.
pub fn keypair<R: RngCore + CryptoRng>(
    params: &Parameters,
    rng: &mut R,
) -> Result<(PublicKey, PrivateKey), Error> {
    params.validate()?;
    let mut coins = Zeroizing::new([0u8; 2 * SYMBYTES]);
    fill_random(rng, &mut coins[..])?;
    keypair_derand(params, &coins)
}

/// Deterministic encapsulation of a caller-chosen message.
///
/// The encryption coins are `H(H(pk) ‖ m)` and the shared secret is
/// `H(m ‖ ct)`, so the same message and key always give the same output.
pub fn encapsulate_derand(
    params: &Parameters,
    pk: &PublicKey,
    m: &Message,
) -> Result<(Ciphertext, SharedSecret), Error> {
    let ring = params.validate()?;
    pk.check_shape(params, &ring)?;
    check_message(params, m)?;
    debug!(k = params.k, n = params.n, q = params.q, "encapsulating");

    let pk_hash = lattice_hash::hash_h(&pk.to_bytes());
    let ct = reencrypt(params, &ring, pk, &pk_hash, m)?;
    let ss = shared_secret(m, &ct.to_bytes());
    Ok((ct, ss))
}

/// Randomized encapsulation: a fresh `n`-bit message from `rng`.
pub fn encapsulate<R: RngCore + CryptoRng>(
    params: &Parameters,
    pk: &PublicKey,
    rng: &mut R,
) -> Result<(Ciphertext, SharedSecret), Error> {
    params.validate()?;
    let m = Message::random(params, rng)?;
    encapsulate_derand(params, pk, &m)
}

/// Decapsulation with implicit rejection.
///
/// Errors only when `ct`, `sk` or `pk` do not have the shape `params`
/// describes; those are public properties of the inputs.
pub fn decapsulate(
    params: &Parameters,
    ct: &Ciphertext,
    sk: &PrivateKey,
    pk: &PublicKey,
) -> Result<SharedSecret, Error> {
    let ring = params.validate()?;
    pk.check_shape(params, &ring)?;
    sk.check_shape(params, &ring)?;
    ct.check_shape(params, &ring)?;
    debug!(k = params.k, n = params.n, q = params.q, "decapsulating");

    let m_prime = pke::decrypt(&ring, &sk.s, ct);
    let pk_hash = lattice_hash::hash_h(&pk.to_bytes());
    let ct_prime = reencrypt(params, &ring, pk, &pk_hash, &m_prime)?;

    let ct_bytes = ct.to_bytes();
    let accept = shared_secret(&m_prime, &ct_bytes);
    let reject = Zeroizing::new(lattice_hash::rkprf(&sk.z, &ct_bytes));
    let ok = ciphertexts_equal(ct, &ct_prime);

    Ok(SharedSecret::from(select_secret(accept.as_bytes(), &reject, ok)))
}

fn check_message(params: &Parameters, m: &Message) -> Result<(), Error> {
    let expected = params.message_bytes();
    if m.as_bytes().len() == expected {
        Ok(())
    } else {
        Err(Error::ShapeMismatch("message length does not match parameters"))
    }
}

/// Encrypt `m` with coins `H(H(pk) ‖ m)`.
fn reencrypt(
    params: &Parameters,
    ring: &Ring,
    pk: &PublicKey,
    pk_hash: &[u8; SYMBYTES],
    m: &Message,
) -> Result<Ciphertext, Error> {
    let coins = Zeroizing::new(lattice_hash::hash_h_parts(&[pk_hash.as_slice(), m.as_bytes()]));
    pke::encrypt(params, ring, pk, m, &coins)
}

fn shared_secret(m: &Message, ct_bytes: &[u8]) -> SharedSecret {
    SharedSecret::from(lattice_hash::hash_h_parts(&[m.as_bytes(), ct_bytes]))
}
