//! Polynomial value type.
//!
//! `Polynomial` owns its `n` coefficients; arithmetic lives on [`crate::Ring`],
//! which knows the modulus the coefficients are reduced by.

use zeroize::Zeroize;

/// Element of `R_q` in coefficient form, lowest degree first.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Polynomial(pub(crate) Vec<u32>);

impl Polynomial {
    #[inline]
    #[must_use]
    pub fn coeffs(&self) -> &[u32] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u32]> for Polynomial {
    #[inline]
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polynomial")
            .field("n", &self.0.len())
            .field("coeffs[..4]", &&self.0[..self.0.len().min(4)])
            .finish_non_exhaustive()
    }
}
