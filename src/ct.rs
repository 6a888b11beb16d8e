//! Constant-time ciphertext comparison and secret selection. No
//! secret-dependent branching.

use lattice_math::SYMBYTES;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::Ciphertext;

/// Compare two ciphertexts coefficient by coefficient.
///
/// Every coefficient is visited whatever the position of the first
/// difference. Shapes are public, so a shape difference may short-circuit.
pub(crate) fn ciphertexts_equal(a: &Ciphertext, b: &Ciphertext) -> Choice {
    if a.u.len() != b.u.len() {
        return Choice::from(0);
    }
    a.u.iter()
        .chain(core::iter::once(&a.v))
        .zip(b.u.iter().chain(core::iter::once(&b.v)))
        .fold(Choice::from(1), |acc, (x, y)| {
            let same_width = Choice::from(u8::from(x.width() == y.width()));
            acc & same_width & x.coeffs().ct_eq(y.coeffs())
        })
}

/// `accept` when `ok` is set, otherwise `reject`.
pub(crate) fn select_secret(
    accept: &[u8; SYMBYTES],
    reject: &[u8; SYMBYTES],
    ok: Choice,
) -> [u8; SYMBYTES] {
    core::array::from_fn(|i| u8::conditional_select(&reject[i], &accept[i], ok))
}
