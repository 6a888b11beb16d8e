//! Key, ciphertext, message and shared-secret types.
//!
//! Secret types implement `ZeroizeOnDrop` and keep their contents out of
//! `Debug` output. Private keys have no byte encoding.

use lattice_math::{
    compress::{self, Compressed},
    encode::{pack_bits, packed_len, unpack_bits},
    Polynomial, Ring, Vector, SYMBYTES,
};
use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{sampler::fill_random, Error, Parameters};

/// Unpack one fixed-width chunk, reporting a short chunk as a length error.
fn unpack(bytes: &[u8], width: u32, count: usize) -> Result<Vec<u32>, Error> {
    unpack_bits(bytes, width, count).map_err(|_| Error::InvalidLength {
        expected: packed_len(count, width),
        actual: bytes.len(),
    })
}

fn check_len(expected: usize, bytes: &[u8]) -> Result<(), Error> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            expected,
            actual: bytes.len(),
        })
    }
}

/// Encapsulation key: the matrix seed and `t = A·s + e`.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) ring: Ring,
    pub(crate) seed: [u8; SYMBYTES],
    pub(crate) t: Vector,
}

impl PublicKey {
    /// Seed from which the public matrix is expanded.
    #[inline]
    #[must_use]
    pub fn seed(&self) -> &[u8; SYMBYTES] {
        &self.seed
    }

    /// `t` packed at `ceil(log2 q)` bits per coefficient, then the seed.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let bits = self.ring.coeff_bits();
        let mut out =
            Vec::with_capacity(self.t.rank() * packed_len(self.ring.degree(), bits) + SYMBYTES);
        for p in self.t.polys() {
            pack_bits(p.coeffs().iter().copied(), bits, &mut out);
        }
        out.extend_from_slice(&self.seed);
        out
    }

    /// Decode a public key, rejecting any coefficient not below `q`.
    pub fn from_bytes(params: &Parameters, bytes: &[u8]) -> Result<Self, Error> {
        let ring = params.validate()?;
        check_len(params.public_key_bytes(), bytes)?;

        let bits = ring.coeff_bits();
        let poly_bytes = packed_len(ring.degree(), bits);
        let (t_bytes, seed_bytes) = bytes.split_at(params.k * poly_bytes);

        let t = t_bytes
            .chunks_exact(poly_bytes)
            .map(|chunk| {
                let coeffs = unpack(chunk, bits, ring.degree())?;
                if coeffs.iter().any(|&c| c >= ring.modulus()) {
                    return Err(Error::InvalidKey);
                }
                Ok(ring.from_coeffs(&coeffs)?)
            })
            .collect::<Result<Vector, Error>>()?;

        let mut seed = [0u8; SYMBYTES];
        seed.copy_from_slice(seed_bytes);
        Ok(Self { ring, seed, t })
    }

    pub(crate) fn check_shape(&self, params: &Parameters, ring: &Ring) -> Result<(), Error> {
        if self.ring != *ring || self.t.rank() != params.k || !self.t.is_in(ring) {
            return Err(Error::ShapeMismatch("public key does not match parameters"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("k", &self.t.rank())
            .field("n", &self.ring.degree())
            .field("q", &self.ring.modulus())
            .finish_non_exhaustive()
    }
}

/// Decapsulation key: the secret vector `s` and the implicit-rejection seed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    pub(crate) s: Vector,
    pub(crate) z: [u8; SYMBYTES],
}

impl PrivateKey {
    pub(crate) fn check_shape(&self, params: &Parameters, ring: &Ring) -> Result<(), Error> {
        if self.s.rank() != params.k || !self.s.is_in(ring) {
            return Err(Error::ShapeMismatch("private key does not match parameters"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("k", &self.s.rank())
            .finish_non_exhaustive()
    }
}

/// Compressed ciphertext `(u, v)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    pub(crate) u: Vec<Compressed>,
    pub(crate) v: Compressed,
}

impl Ciphertext {
    #[inline]
    #[must_use]
    pub fn u(&self) -> &[Compressed] {
        &self.u
    }

    #[inline]
    #[must_use]
    pub fn v(&self) -> &Compressed {
        &self.v
    }

    /// `u` packed at `du` bits per coefficient, then `v` at `dv` bits.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for c in self.u.iter().chain(core::iter::once(&self.v)) {
            pack_bits(c.coeffs().iter().map(|&y| y as u32), c.width(), &mut out);
        }
        out
    }

    pub fn from_bytes(params: &Parameters, bytes: &[u8]) -> Result<Self, Error> {
        let ring = params.validate()?;
        check_len(params.ciphertext_bytes(), bytes)?;

        let n = ring.degree();
        let u_bytes = packed_len(n, params.du);
        let (u_part, v_part) = bytes.split_at(params.k * u_bytes);

        let decode = |chunk: &[u8], d: u32| -> Result<Compressed, Error> {
            let coeffs = unpack(chunk, d, n)?.into_iter().map(|y| y as u16).collect();
            Ok(Compressed::from_coeffs(d, coeffs)?)
        };
        let u = u_part
            .chunks_exact(u_bytes)
            .map(|chunk| decode(chunk, params.du))
            .collect::<Result<Vec<_>, _>>()?;
        let v = decode(v_part, params.dv)?;
        Ok(Self { u, v })
    }

    pub(crate) fn check_shape(&self, params: &Parameters, ring: &Ring) -> Result<(), Error> {
        let n = ring.degree();
        let u_ok = self.u.len() == params.k
            && self
                .u
                .iter()
                .all(|c| c.width() == params.du && c.len() == n);
        if !u_ok || self.v.width() != params.dv || self.v.len() != n {
            return Err(Error::ShapeMismatch("ciphertext does not match parameters"));
        }
        Ok(())
    }

    /// Decompress into `(u, v)` over `ring`.
    pub(crate) fn decompress(&self, ring: &Ring) -> (Vector, Polynomial) {
        let u = self
            .u
            .iter()
            .map(|c| compress::decompress(ring, c))
            .collect();
        (u, compress::decompress(ring, &self.v))
    }
}

/// An `n`-bit message, `n / 8` bytes, bit `i` at `byte[i / 8] >> (i % 8)`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Message(Vec<u8>);

impl Message {
    /// Wrap `bytes` as a message for `params`.
    pub fn from_bytes(params: &Parameters, bytes: &[u8]) -> Result<Self, Error> {
        check_len(params.message_bytes(), bytes)?;
        Ok(Self(bytes.to_vec()))
    }

    pub(crate) fn random<R: RngCore + CryptoRng>(
        params: &Parameters,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let mut bytes = vec![0u8; params.message_bytes()];
        fill_random(rng, &mut bytes)?;
        Ok(Self(bytes))
    }

    pub(crate) fn from_decoded(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for Message {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Message")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// 32-byte shared secret. Equality is constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SYMBYTES],
}

impl SharedSecret {
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SYMBYTES] {
        &self.bytes
    }
}

impl From<[u8; SYMBYTES]> for SharedSecret {
    #[inline]
    fn from(bytes: [u8; SYMBYTES]) -> Self {
        Self { bytes }
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for SharedSecret {}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pk(params: &Parameters) -> PublicKey {
        let ring = params.validate().unwrap();
        let t = (0..params.k)
            .map(|i| {
                let coeffs: Vec<u32> = (0..ring.degree() as u32)
                    .map(|j| (j * 31 + i as u32 * 7) % ring.modulus())
                    .collect();
                ring.from_coeffs(&coeffs).unwrap()
            })
            .collect();
        PublicKey {
            ring,
            seed: [0xA7; SYMBYTES],
            t,
        }
    }

    #[test]
    fn public_key_bytes_roundtrip() {
        let params = Parameters::ML_KEM_768;
        let pk = sample_pk(&params);
        let bytes = pk.to_bytes();
        assert_eq!(bytes.len(), params.public_key_bytes());
        assert_eq!(&bytes[bytes.len() - SYMBYTES..], &[0xA7; SYMBYTES]);
        assert_eq!(PublicKey::from_bytes(&params, &bytes).unwrap(), pk);
    }

    #[test]
    fn public_key_rejects_unreduced_coefficient() {
        let params = Parameters::ML_KEM_512;
        let mut bytes = sample_pk(&params).to_bytes();
        // First 12-bit coefficient becomes 0xFFF >= q.
        bytes[0] = 0xFF;
        bytes[1] |= 0x0F;
        assert!(matches!(
            PublicKey::from_bytes(&params, &bytes),
            Err(Error::InvalidKey)
        ));
    }

    #[test]
    fn lengths_are_checked() {
        let params = Parameters::ML_KEM_512;
        assert!(matches!(
            PublicKey::from_bytes(&params, &[0u8; 799]),
            Err(Error::InvalidLength {
                expected: 800,
                actual: 799
            })
        ));
        assert!(matches!(
            Ciphertext::from_bytes(&params, &[0u8; 769]),
            Err(Error::InvalidLength {
                expected: 768,
                actual: 769
            })
        ));
        assert!(matches!(
            Message::from_bytes(&params, &[0u8; 16]),
            Err(Error::InvalidLength {
                expected: 32,
                actual: 16
            })
        ));
    }

    #[test]
    fn ciphertext_bytes_roundtrip() {
        let params = Parameters::ML_KEM_1024;
        let bytes: Vec<u8> = (0..params.ciphertext_bytes())
            .map(|i| (i * 151 + 7) as u8)
            .collect();
        let ct = Ciphertext::from_bytes(&params, &bytes).unwrap();
        assert_eq!(ct.u().len(), 4);
        assert_eq!(ct.v().width(), 5);
        assert_eq!(ct.to_bytes(), bytes);
        let ring = params.validate().unwrap();
        assert!(ct.check_shape(&params, &ring).is_ok());
        assert!(ct.check_shape(&Parameters::ML_KEM_768, &ring).is_err());
    }

    #[test]
    fn secrets_are_redacted() {
        let ss = SharedSecret::from([0x42; SYMBYTES]);
        assert!(!format!("{ss:?}").contains("42"));
        let msg = Message::from_bytes(&Parameters::ML_KEM_768, &[0x99; 32]).unwrap();
        assert!(!format!("{msg:?}").contains("153"));
    }

    #[test]
    fn shared_secret_equality() {
        let a = SharedSecret::from([1; SYMBYTES]);
        let mut raw = [1; SYMBYTES];
        assert_eq!(a, SharedSecret::from(raw));
        raw[31] = 2;
        assert_ne!(a, SharedSecret::from(raw));
    }
}
