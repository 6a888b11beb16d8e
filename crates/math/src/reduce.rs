//! Barrett modular reduction for a runtime prime modulus `q < 2^16`.

/// A modulus `q` together with its precomputed Barrett constant `floor(2^64 / q)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulus {
    q: u32,
    barrett: u64,
}

impl Modulus {
    /// Precompute the reduction constant. `q` must be odd and at least 3.
    #[inline]
    #[must_use]
    pub(crate) const fn new(q: u32) -> Self {
        Self {
            q,
            barrett: u64::MAX / q as u64,
        }
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.q
    }

    /// Barrett reduction: `x mod q` for any `x < 2^48`.
    ///
    /// The quotient estimate is at most one short, so a single conditional
    /// subtraction brings the remainder into `[0, q)`.
    #[inline]
    #[must_use]
    pub const fn reduce(&self, x: u64) -> u32 {
        let t = self.estimate(x);
        self.csubq(x - t * self.q as u64)
    }

    /// `floor(x / q)` for any `x < 2^48`, without a division instruction.
    ///
    /// The Barrett estimate is corrected by one branch-free increment, so the
    /// running time does not depend on `x`.
    #[inline]
    #[must_use]
    pub const fn quotient(&self, x: u64) -> u64 {
        let t = self.estimate(x);
        let r = x - t * self.q as u64;
        // 1 when r >= q, 0 otherwise.
        let carry = (r.wrapping_sub(self.q as u64) >> 63) ^ 1;
        t + carry
    }

    /// `round(num / q)` with ties rounded up, for `num < 2^47`.
    #[inline]
    #[must_use]
    pub const fn div_round(&self, num: u64) -> u64 {
        self.quotient(num + (self.q / 2) as u64)
    }

    /// Barrett quotient estimate: `floor(x / q)` or one less.
    #[inline]
    const fn estimate(&self, x: u64) -> u64 {
        ((x as u128 * self.barrett as u128) >> 64) as u64
    }

    /// `a + b mod q` for `a, b < q`.
    #[inline]
    #[must_use]
    pub const fn add(&self, a: u32, b: u32) -> u32 {
        self.csubq(a as u64 + b as u64)
    }

    /// `-a mod q` for `a < q`.
    #[inline]
    #[must_use]
    pub const fn neg(&self, a: u32) -> u32 {
        self.csubq((self.q - a) as u64)
    }

    /// `a * b mod q` for `a, b < q`.
    #[inline]
    #[must_use]
    pub const fn mul(&self, a: u32, b: u32) -> u32 {
        self.reduce(a as u64 * b as u64)
    }

    /// Map a signed value into `[0, q)`.
    ///
    /// Reduces `|a|` and negates under a sign mask, so noise samples never
    /// reach a division or a sign-dependent branch.
    #[inline]
    #[must_use]
    pub const fn from_signed(&self, a: i32) -> u32 {
        let magnitude = self.reduce(a.unsigned_abs() as u64);
        let negated = self.neg(magnitude);
        // All ones when a < 0.
        let mask = (a >> 31) as u32;
        magnitude ^ ((magnitude ^ negated) & mask)
    }

    /// Centered representative of `a` in `(-q/2, q/2]`.
    #[inline]
    #[must_use]
    pub const fn centered(&self, a: u32) -> i32 {
        if a > self.q / 2 {
            a as i32 - self.q as i32
        } else {
            a as i32
        }
    }

    /// Branch-free conditional subtraction: maps `[0, 2q)` to `[0, q)`.
    #[inline]
    pub(crate) const fn csubq(&self, r: u64) -> u32 {
        let s = r.wrapping_sub(self.q as u64);
        let mask = 0u64.wrapping_sub(s >> 63);
        s.wrapping_add(self.q as u64 & mask) as u32
    }
}

/// Deterministic primality test by trial division (moduli are below 2^16).
#[must_use]
pub const fn is_prime(q: u32) -> bool {
    if q < 2 {
        return false;
    }
    if q % 2 == 0 {
        return q == 2;
    }
    let mut d = 3;
    while (d as u64) * (d as u64) <= q as u64 {
        if q % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
