//! Runtime parameter sets.
//!
//! A [`Parameters`] value fixes the module rank, ring, noise widths and
//! compression widths for every key and ciphertext derived from it. Values are
//! plain data (and `serde` friendly); [`Parameters::validate`] is the single
//! gate that turns them into a usable [`Ring`].

use lattice_math::{
    compress::check_width, encode::packed_len, sample::check_eta, Ring, SYMBYTES,
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Smallest ring degree accepted for the KEM; messages are `n / 8` bytes.
pub const MIN_KEM_DEGREE: usize = 8;

/// Largest module rank; keeps every PRF nonce within one byte.
pub const MAX_RANK: usize = 8;

/// Shape of one KEM instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameters {
    /// Module rank.
    pub k: usize,
    /// Ring degree, a power of two.
    pub n: usize,
    /// Prime modulus.
    pub q: u32,
    /// CBD width for the secret `s` and encryption randomness `r`.
    pub eta1: usize,
    /// CBD width for the error terms `e`, `e1`, `e2`.
    pub eta2: usize,
    /// Compression width of `u`.
    pub du: u32,
    /// Compression width of `v`.
    pub dv: u32,
}

impl Parameters {
    /// ML-KEM-512 (k = 2, NIST security category 1).
    pub const ML_KEM_512: Self = Self {
        k: 2,
        n: 256,
        q: 3329,
        eta1: 3,
        eta2: 2,
        du: 10,
        dv: 4,
    };

    /// ML-KEM-768 (k = 3, NIST security category 3).
    pub const ML_KEM_768: Self = Self {
        k: 3,
        n: 256,
        q: 3329,
        eta1: 2,
        eta2: 2,
        du: 10,
        dv: 4,
    };

    /// ML-KEM-1024 (k = 4, NIST security category 5).
    pub const ML_KEM_1024: Self = Self {
        k: 4,
        n: 256,
        q: 3329,
        eta1: 2,
        eta2: 2,
        du: 11,
        dv: 5,
    };

    /// Look up a named preset, e.g. `"ML-KEM-768"`. Case-insensitive; the
    /// `ML-KEM-` prefix may be omitted.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        let level = name
            .get(..7)
            .filter(|prefix| prefix.eq_ignore_ascii_case("ml-kem-"))
            .map_or(name, |_| &name[7..]);
        match level {
            "512" => Some(Self::ML_KEM_512),
            "768" => Some(Self::ML_KEM_768),
            "1024" => Some(Self::ML_KEM_1024),
            _ => None,
        }
    }

    /// Check every structural constraint and build the ring.
    ///
    /// Nothing is clamped: the first violated constraint is reported.
    pub fn validate(&self) -> Result<Ring, Error> {
        if self.n < MIN_KEM_DEGREE {
            return Err(lattice_math::Error::InvalidDegree(self.n).into());
        }
        let ring = Ring::new(self.n, self.q)?;
        if self.k == 0 || self.k > MAX_RANK {
            return Err(lattice_math::Error::InvalidRank(self.k).into());
        }
        check_eta(self.eta1)?;
        check_eta(self.eta2)?;
        for d in [self.du, self.dv] {
            // One-bit ciphertext components leave no room for the noise.
            if d < 2 {
                return Err(lattice_math::Error::InvalidWidth { d, q: self.q }.into());
            }
            check_width(d, self.q)?;
        }
        Ok(ring)
    }

    /// Bits per public-key coefficient: `ceil(log2 q)`.
    #[inline]
    #[must_use]
    pub const fn coeff_bits(&self) -> u32 {
        u32::BITS - self.q.saturating_sub(1).leading_zeros()
    }

    /// Encoded message length, `n / 8`.
    #[inline]
    #[must_use]
    pub const fn message_bytes(&self) -> usize {
        self.n.div_ceil(8)
    }

    /// Encoded public-key length: `t` packed at [`Self::coeff_bits`] plus the seed.
    #[inline]
    #[must_use]
    pub const fn public_key_bytes(&self) -> usize {
        self.k * packed_len(self.n, self.coeff_bits()) + SYMBYTES
    }

    /// Encoded ciphertext length: `u` at `du` bits plus `v` at `dv` bits.
    #[inline]
    #[must_use]
    pub const fn ciphertext_bytes(&self) -> usize {
        self.k * packed_len(self.n, self.du) + packed_len(self.n, self.dv)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::ML_KEM_768
    }
}
