//! `lattice-kem` -- module-lattice key encapsulation over `Z_q[X]/(X^n+1)`.
//!
//! Keys and ciphertexts are sized at runtime by a [`Parameters`] value. The
//! three ML-KEM (FIPS 203) parameter sets are provided as presets; any other
//! prime modulus, power-of-two degree and rank that passes
//! [`Parameters::validate`] works the same way.
//!
//! ```
//! use lattice_kem::{decapsulate, encapsulate, keypair, Parameters};
//! use rand_core::OsRng;
//!
//! let params = Parameters::ML_KEM_768;
//! let (pk, sk) = keypair(&params, &mut OsRng)?;
//! let (ct, sent) = encapsulate(&params, &pk, &mut OsRng)?;
//! let received = decapsulate(&params, &ct, &sk, &pk)?;
//! assert_eq!(sent, received);
//! # Ok::<(), lattice_kem::Error>(())
//! ```

#![deny(unsafe_code)]

mod ct;
pub mod kem;
pub mod matrix;
pub mod params;
mod pke;
pub mod sampler;
pub mod types;

pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
pub use lattice_hash as hash;
pub use lattice_math as math;
pub use params::Parameters;
pub use types::{Ciphertext, Message, PrivateKey, PublicKey, SharedSecret};

/// Errors returned by key generation, encapsulation and decoding.
///
/// Decapsulation never reports a ciphertext mismatch: a rejected ciphertext
/// yields a pseudorandom [`SharedSecret`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The parameter set violates a structural constraint.
    #[error("invalid parameters: {0}")]
    InvalidParameter(#[from] lattice_math::Error),
    /// The random source failed. Not retried.
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(#[source] rand_core::Error),
    /// Input byte slice has the wrong length for this parameter set.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// Key bytes failed validation (a coefficient is not below `q`).
    #[error("invalid key")]
    InvalidKey,
    /// A key or ciphertext was built for a different parameter set.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(&'static str),
}
