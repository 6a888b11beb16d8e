//! Vectors and square matrices of ring elements.
//!
//! With the `parallel` feature, row-wise work (matrix construction and
//! matrix-vector products) runs on the rayon pool. Each row is independent and
//! reduced exactly, so the result does not depend on scheduling.

use zeroize::Zeroize;

use crate::{Polynomial, Ring};

/// A vector of `k` polynomials.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Vector {
    pub(crate) polys: Vec<Polynomial>,
}

impl Vector {
    #[must_use]
    pub fn zero(ring: &Ring, k: usize) -> Self {
        Self {
            polys: vec![ring.zero(); k],
        }
    }

    #[inline]
    #[must_use]
    pub fn rank(&self) -> usize {
        self.polys.len()
    }

    #[inline]
    #[must_use]
    pub fn polys(&self) -> &[Polynomial] {
        &self.polys
    }

    /// Component-wise sum.
    ///
    /// # Panics
    ///
    /// If the ranks differ.
    #[must_use]
    pub fn add(&self, ring: &Ring, other: &Self) -> Self {
        assert_eq!(self.rank(), other.rank(), "vector rank mismatch");
        self.polys
            .iter()
            .zip(&other.polys)
            .map(|(a, b)| ring.add(a, b))
            .collect()
    }

    /// Inner product `sum_i self[i] * other[i]`.
    ///
    /// # Panics
    ///
    /// If the ranks differ.
    #[must_use]
    pub fn dot(&self, ring: &Ring, other: &Self) -> Polynomial {
        assert_eq!(self.rank(), other.rank(), "vector rank mismatch");
        self.polys
            .iter()
            .zip(&other.polys)
            .fold(ring.zero(), |acc, (a, b)| ring.add(&acc, &ring.multiply(a, b)))
    }

    /// Whether every component is an element of `ring`.
    #[must_use]
    pub fn is_in(&self, ring: &Ring) -> bool {
        self.polys.iter().all(|p| ring.contains(p))
    }
}

impl From<Vec<Polynomial>> for Vector {
    #[inline]
    fn from(polys: Vec<Polynomial>) -> Self {
        Self { polys }
    }
}

impl FromIterator<Polynomial> for Vector {
    fn from_iter<I: IntoIterator<Item = Polynomial>>(iter: I) -> Self {
        Self {
            polys: iter.into_iter().collect(),
        }
    }
}

impl core::fmt::Debug for Vector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Vector")
            .field("rank", &self.polys.len())
            .finish_non_exhaustive()
    }
}

/// A `k x k` matrix of polynomials, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Matrix {
    k: usize,
    entries: Vec<Polynomial>,
}

impl Matrix {
    /// Build the matrix entry by entry; `f(i, j)` yields row `i`, column `j`.
    #[must_use]
    pub fn from_fn<F>(k: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> Polynomial + Send + Sync,
    {
        let entries = map_indices(k * k, |idx| f(idx / k, idx % k));
        Self { k, entries }
    }

    #[inline]
    #[must_use]
    pub fn rank(&self) -> usize {
        self.k
    }

    /// Entry at row `i`, column `j`.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> &Polynomial {
        &self.entries[i * self.k + j]
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let k = self.k;
        let entries = (0..k * k)
            .map(|idx| self.get(idx % k, idx / k).clone())
            .collect();
        Self { k, entries }
    }

    /// `A * v`: row `i` is `sum_j A[i][j] * v[j]`.
    #[must_use]
    pub fn mul_vector(&self, ring: &Ring, v: &Vector) -> Vector {
        assert_eq!(self.k, v.rank(), "matrix and vector rank mismatch");
        let rows = map_indices(self.k, |i| {
            (0..self.k).fold(ring.zero(), |acc, j| {
                ring.add(&acc, &ring.multiply(self.get(i, j), &v.polys[j]))
            })
        });
        Vector::from(rows)
    }

    /// `A^T * v` without materialising the transpose: row `i` is
    /// `sum_j A[j][i] * v[j]`.
    #[must_use]
    pub fn transpose_mul_vector(&self, ring: &Ring, v: &Vector) -> Vector {
        assert_eq!(self.k, v.rank(), "matrix and vector rank mismatch");
        let rows = map_indices(self.k, |i| {
            (0..self.k).fold(ring.zero(), |acc, j| {
                ring.add(&acc, &ring.multiply(self.get(j, i), &v.polys[j]))
            })
        });
        Vector::from(rows)
    }
}

impl core::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Matrix")
            .field("k", &self.k)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "parallel")]
fn map_indices<F>(count: usize, f: F) -> Vec<Polynomial>
where
    F: Fn(usize) -> Polynomial + Send + Sync,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_indices<F>(count: usize, f: F) -> Vec<Polynomial>
where
    F: Fn(usize) -> Polynomial + Send + Sync,
{
    (0..count).map(f).collect()
}
