//! `lattice-math` -- Core mathematical primitives for module-lattice KEMs.
//!
//! Exact integer arithmetic over `R_q = Z_q[X]/(X^n+1)` for a runtime-chosen
//! degree `n` and prime modulus `q`. Sub-modules cover modular reduction,
//! polynomial and polynomial-vector arithmetic, lossy compression, bit-level
//! encoding, and deterministic sampling from caller-supplied keystreams.

#![deny(unsafe_code)]
#![allow(clippy::cast_lossless, clippy::cast_possible_truncation, clippy::many_single_char_names)]

pub mod compress;
pub mod encode;
pub mod poly;
pub mod polyvec;
pub mod reduce;
pub mod ring;
pub mod sample;

pub use compress::Compressed;
pub use poly::Polynomial;
pub use polyvec::{Matrix, Vector};
pub use reduce::Modulus;
pub use ring::Ring;

/// Size in bytes of hashes, seeds, and shared secrets.
pub const SYMBYTES: usize = 32;

/// Structural errors raised when a ring, width, or encoding is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The modulus is not a prime number.
    #[error("modulus {0} is not prime")]
    ModulusNotPrime(u32),
    /// The modulus lies outside `[3, 2^16)`.
    #[error("modulus {0} is outside the supported range [3, 65536)")]
    ModulusOutOfRange(u32),
    /// The ring degree is not a supported power of two.
    #[error("ring degree {0} is not a supported power of two")]
    InvalidDegree(usize),
    /// The module rank is outside the supported range.
    #[error("module rank {0} is outside the supported range 1..=8")]
    InvalidRank(usize),
    /// The centered-binomial width is outside the supported range.
    #[error("noise width {0} is outside the supported range 1..=8")]
    InvalidEta(usize),
    /// The compression width cannot represent a lossy map for this modulus.
    #[error("compression width {d} is unsupported for modulus {q}")]
    InvalidWidth {
        /// Requested width in bits.
        d: u32,
        /// Ring modulus.
        q: u32,
    },
    /// A coefficient does not fit the range its encoding allows.
    #[error("coefficient {value} is not below {bound}")]
    CoefficientOutOfRange {
        /// Offending value.
        value: u32,
        /// Exclusive upper bound.
        bound: u32,
    },
    /// An input buffer or coefficient list has the wrong length.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected element count.
        expected: usize,
        /// Actual element count received.
        actual: usize,
    },
}
