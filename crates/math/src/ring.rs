//! The quotient ring `R_q = Z_q[X]/(X^n+1)`.
//!
//! A [`Ring`] is a small `Copy` context carrying the degree and the reduction
//! constants. Every polynomial operation goes through it, so results are always
//! reduced into `[0, q)`.
//!
//! Arithmetic panics on operands whose length is not `n`. The coefficient range
//! is only checked in debug builds.

use crate::{reduce::Modulus, Error, Polynomial};

/// Largest supported ring degree.
pub const MAX_DEGREE: usize = 4096;

/// Exclusive upper bound on the modulus; coefficients fit in 16 bits.
pub const MAX_MODULUS: u32 = 1 << 16;

/// Degree and modulus of `Z_q[X]/(X^n+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    n: usize,
    modulus: Modulus,
}

impl Ring {
    /// Validate `n` and `q` and build the ring context.
    ///
    /// `n` must be a power of two in `[1, 4096]` and `q` a prime in `[3, 2^16)`.
    pub fn new(n: usize, q: u32) -> Result<Self, Error> {
        if !n.is_power_of_two() || n > MAX_DEGREE {
            return Err(Error::InvalidDegree(n));
        }
        if !(3..MAX_MODULUS).contains(&q) {
            return Err(Error::ModulusOutOfRange(q));
        }
        if !crate::reduce::is_prime(q) {
            return Err(Error::ModulusNotPrime(q));
        }
        Ok(Self {
            n,
            modulus: Modulus::new(q),
        })
    }

    #[inline]
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub const fn modulus(&self) -> u32 {
        self.modulus.value()
    }

    #[inline]
    #[must_use]
    pub const fn reducer(&self) -> &Modulus {
        &self.modulus
    }

    /// Bits needed to hold any coefficient in `[0, q)`: `ceil(log2 q)`.
    #[inline]
    #[must_use]
    pub const fn coeff_bits(&self) -> u32 {
        u32::BITS - (self.modulus.value() - 1).leading_zeros()
    }

    #[inline]
    #[must_use]
    pub fn zero(&self) -> Polynomial {
        Polynomial(vec![0; self.n])
    }

    /// Build a polynomial from `n` coefficients, reducing each mod `q`.
    pub fn from_coeffs(&self, coeffs: &[u32]) -> Result<Polynomial, Error> {
        self.check_len(coeffs.len())?;
        Ok(Polynomial(
            coeffs
                .iter()
                .map(|&c| self.modulus.reduce(c as u64))
                .collect(),
        ))
    }

    /// Build a polynomial from `n` signed coefficients, reducing each mod `q`.
    pub fn from_signed(&self, coeffs: &[i32]) -> Result<Polynomial, Error> {
        self.check_len(coeffs.len())?;
        Ok(Polynomial(
            coeffs
                .iter()
                .map(|&c| self.modulus.from_signed(c))
                .collect(),
        ))
    }

    /// Whether `p` has exactly `n` coefficients, all in `[0, q)`.
    #[must_use]
    pub fn contains(&self, p: &Polynomial) -> bool {
        p.0.len() == self.n && p.0.iter().all(|&c| c < self.modulus())
    }

    /// Coefficient-wise `a + b mod q`.
    #[must_use]
    pub fn add(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        self.check_operand(a);
        self.check_operand(b);
        Polynomial(
            a.0.iter()
                .zip(&b.0)
                .map(|(&x, &y)| self.modulus.add(x, y))
                .collect(),
        )
    }

    /// Coefficient-wise `-a mod q`.
    #[must_use]
    pub fn neg(&self, a: &Polynomial) -> Polynomial {
        self.check_operand(a);
        Polynomial(a.0.iter().map(|&x| self.modulus.neg(x)).collect())
    }

    /// `a - b`, computed as `a + (-b)` so every step stays inside the ring.
    #[must_use]
    pub fn sub(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        self.add(a, &self.neg(b))
    }

    /// Negacyclic product `a * b mod (X^n + 1)`.
    ///
    /// The full convolution has `2n - 1` coefficients; the upper half folds back
    /// with `X^n = -1`, so `c[n + i]` is *subtracted* from `c[i]`.
    #[must_use]
    pub fn multiply(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        self.check_operand(a);
        self.check_operand(b);
        let n = self.n;
        let m = &self.modulus;

        // Each product is below 2^32 and there are at most n <= 2^12 terms per
        // slot, so the u64 accumulators never overflow.
        let mut wide = vec![0u64; 2 * n - 1];
        for (i, &x) in a.0.iter().enumerate() {
            for (j, &y) in b.0.iter().enumerate() {
                wide[i + j] += x as u64 * y as u64;
            }
        }

        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let low = m.reduce(wide[i]);
            let high = if i + n < wide.len() {
                m.reduce(wide[i + n])
            } else {
                0
            };
            out.push(m.add(low, m.neg(high)));
        }
        Polynomial(out)
    }

    fn check_len(&self, len: usize) -> Result<(), Error> {
        if len == self.n {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                expected: self.n,
                actual: len,
            })
        }
    }

    #[inline]
    fn check_operand(&self, p: &Polynomial) {
        assert_eq!(p.0.len(), self.n, "polynomial degree does not match the ring");
        debug_assert!(self.contains(p), "polynomial is not an element of this ring");
    }
}
