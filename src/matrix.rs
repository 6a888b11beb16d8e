//! Public matrix expansion.
//!
//! `A` is never stored: key generation and encapsulation both re-derive it
//! from the 32-byte seed carried in the public key.

use lattice_math::{Matrix, Ring, SYMBYTES};
use tracing::trace;

use crate::sampler::sample_uniform;

/// Expand `seed` into the `k x k` matrix `A`, with `A[i][j]` drawn from
/// `XOF(seed ‖ j ‖ i)`.
#[must_use]
pub fn expand_matrix(ring: &Ring, seed: &[u8; SYMBYTES], k: usize) -> Matrix {
    trace!(k, n = ring.degree(), q = ring.modulus(), "expanding public matrix");
    Matrix::from_fn(k, |i, j| sample_uniform(ring, seed, j as u8, i as u8))
}
