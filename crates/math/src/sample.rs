//! Deterministic sampling: centered-binomial noise and rejection-uniform.
//!
//! Both samplers consume caller-supplied keystream bytes; nothing here touches
//! an ambient random source.

use crate::{Error, Polynomial, Ring};

/// SHAKE-128 output rate in bytes (one Keccak-f[1600] squeeze).
pub const SHAKE128_RATE: usize = 168;

/// Supported centered-binomial widths.
pub const MAX_ETA: usize = 8;

/// Check that `eta` is a supported CBD width.
pub const fn check_eta(eta: usize) -> Result<(), Error> {
    if eta >= 1 && eta <= MAX_ETA {
        Ok(())
    } else {
        Err(Error::InvalidEta(eta))
    }
}

/// Keystream bytes consumed by [`cbd`] for one polynomial: `2 * eta` bits per
/// coefficient.
#[inline]
#[must_use]
pub const fn cbd_buf_bytes(eta: usize, n: usize) -> usize {
    (2 * eta * n).div_ceil(8)
}

/// Centered binomial distribution `CBD_eta`.
///
/// Bits are read LSB-first; coefficient `i` is
/// `sum_{j<eta} b[2*i*eta + j] - sum_{j<eta} b[2*i*eta + eta + j]`.
pub fn cbd(ring: &Ring, eta: usize, buf: &[u8]) -> Result<Polynomial, Error> {
    check_eta(eta)?;
    let n = ring.degree();
    let needed = cbd_buf_bytes(eta, n);
    if buf.len() < needed {
        return Err(Error::LengthMismatch {
            expected: needed,
            actual: buf.len(),
        });
    }

    let bit = |pos: usize| ((buf[pos / 8] >> (pos % 8)) & 1) as i32;
    let m = ring.reducer();
    let coeffs = (0..n)
        .map(|i| {
            let base = 2 * i * eta;
            let a: i32 = (0..eta).map(|j| bit(base + j)).sum();
            let b: i32 = (0..eta).map(|j| bit(base + eta + j)).sum();
            m.from_signed(a - b)
        })
        .collect();
    Ok(Polynomial(coeffs))
}

/// Rejection-sample `n` uniform coefficients in `[0, q)`.
///
/// The keystream is pulled in [`SHAKE128_RATE`]-byte blocks through `fill` and
/// read as LSB-first `ceil(log2 q)`-bit candidates; candidates `>= q` are
/// dropped, so no value is biased by a modular fold. For `q = 3329` this is the
/// 12-bit layout of FIPS 203 `SampleNTT`.
pub fn reject_uniform(ring: &Ring, mut fill: impl FnMut(&mut [u8])) -> Polynomial {
    let n = ring.degree();
    let q = ring.modulus();
    let width = ring.coeff_bits();
    let mask = (1u32 << width) - 1;

    let mut coeffs = Vec::with_capacity(n);
    let mut buf = [0u8; SHAKE128_RATE];
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;

    while coeffs.len() < n {
        fill(&mut buf);
        for &byte in &buf {
            acc |= (byte as u32) << acc_bits;
            acc_bits += 8;
            while acc_bits >= width && coeffs.len() < n {
                let candidate = acc & mask;
                acc >>= width;
                acc_bits -= width;
                if candidate < q {
                    coeffs.push(candidate);
                }
            }
            if coeffs.len() == n {
                break;
            }
        }
    }
    Polynomial(coeffs)
}
