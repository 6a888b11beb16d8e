//! Lossy compression between `Z_q` and `Z_{2^d}`.
//!
//! Both directions are integer-only with rounding, so results are identical on
//! every platform. Division by `q` goes through the Barrett reciprocal in
//! [`Modulus`], so secret coefficients never reach a hardware divider.

use crate::{reduce::Modulus, Error, Polynomial, Ring};

/// Widest supported compression; compressed coefficients are stored as `u16`.
pub const MAX_WIDTH: u32 = 16;

/// Check that `d` gives a genuinely lossy map for modulus `q`: `1 <= d`,
/// `2^d < q`, and `d <= 16`.
pub const fn check_width(d: u32, q: u32) -> Result<(), Error> {
    if d >= 1 && d <= MAX_WIDTH && (1u64 << d) < q as u64 {
        Ok(())
    } else {
        Err(Error::InvalidWidth { d, q })
    }
}

/// `round(x * 2^d / q) mod 2^d`, for `x` in `[0, q)` and `d` in `1..=16`.
#[inline]
#[must_use]
pub const fn compress_coeff(x: u32, d: u32, m: &Modulus) -> u16 {
    let t = m.div_round((x as u64) << d);
    (t & ((1u64 << d) - 1)) as u16
}

/// `round(y * q / 2^d) mod q`, for `y` in `[0, 2^d)` and `d` in `1..=16`.
#[inline]
#[must_use]
pub const fn decompress_coeff(y: u16, d: u32, m: &Modulus) -> u32 {
    // At most q, so one conditional subtraction finishes the reduction.
    let t = ((y as u64) * m.value() as u64 + (1u64 << (d - 1))) >> d;
    m.csubq(t)
}

/// A polynomial compressed to `d` bits per coefficient.
#[derive(Clone, PartialEq, Eq)]
pub struct Compressed {
    d: u32,
    coeffs: Vec<u16>,
}

impl Compressed {
    /// Wrap already-compressed coefficients, checking each fits in `d` bits.
    pub fn from_coeffs(d: u32, coeffs: Vec<u16>) -> Result<Self, Error> {
        if d == 0 || d > MAX_WIDTH {
            return Err(Error::InvalidWidth {
                d,
                q: crate::ring::MAX_MODULUS,
            });
        }
        if let Some(&bad) = coeffs.iter().find(|&&c| (c as u32) >> d != 0) {
            return Err(Error::CoefficientOutOfRange {
                value: bad as u32,
                bound: 1 << d,
            });
        }
        Ok(Self { d, coeffs })
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.d
    }

    #[inline]
    #[must_use]
    pub fn coeffs(&self) -> &[u16] {
        &self.coeffs
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }
}

impl core::fmt::Debug for Compressed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Compressed")
            .field("d", &self.d)
            .field("n", &self.coeffs.len())
            .finish_non_exhaustive()
    }
}

/// Compress every coefficient of `p` to `d` bits.
///
/// Fails with [`Error::InvalidWidth`] unless `1 <= d <= 16` and `2^d < q`.
pub fn compress(ring: &Ring, p: &Polynomial, d: u32) -> Result<Compressed, Error> {
    check_width(d, ring.modulus())?;
    let m = ring.reducer();
    Ok(Compressed {
        d,
        coeffs: p.0.iter().map(|&x| compress_coeff(x, d, m)).collect(),
    })
}

/// Expand a compressed polynomial back into `R_q`.
#[must_use]
pub fn decompress(ring: &Ring, c: &Compressed) -> Polynomial {
    let m = ring.reducer();
    Polynomial(
        c.coeffs
            .iter()
            .map(|&y| decompress_coeff(y, c.d, m))
            .collect(),
    )
}
