use std::ops::{Index, IndexMut};

use rand::{
    distributions::{Distribution, Uniform},
    CryptoRng, Rng,
};
use serde::{Deserialize, Serialize};

use crate::{random::DiscreteGaussian, reduce::RingReduce};

/// A polynomial in coefficient representation, `Σ data[i] * X^i`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polynomial {
    data: Vec<u64>,
}

impl From<Vec<u64>> for Polynomial {
    #[inline]
    fn from(data: Vec<u64>) -> Self {
        Self { data }
    }
}

impl Index<usize> for Polynomial {
    type Output = u64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Polynomial {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl Polynomial {
    /// Creates a new [`Polynomial`].
    #[inline]
    pub fn new(data: Vec<u64>) -> Self {
        Self { data }
    }

    /// Creates a zero [`Polynomial`] with `coeff_count` coefficients.
    #[inline]
    pub fn zero(coeff_count: usize) -> Self {
        Self {
            data: vec![0; coeff_count],
        }
    }

    /// Lifts small signed coefficients into `[0, modulus)`.
    #[inline]
    pub fn from_signed<M: RingReduce>(values: &[i8], modulus: M) -> Self {
        Self {
            data: values
                .iter()
                .map(|&v| modulus.reduce_i64(v as i64))
                .collect(),
        }
    }

    /// Returns the coefficient count of this [`Polynomial`].
    #[inline]
    pub fn coeff_count(&self) -> usize {
        self.data.len()
    }

    /// Returns a slice of the coefficients.
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.data
    }

    /// Returns a mutable slice of the coefficients.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.data
    }

    /// Consumes the polynomial and returns its coefficients.
    #[inline]
    pub fn into_vec(self) -> Vec<u64> {
        self.data
    }

    /// Returns an iterator over the coefficients.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.data.iter()
    }

    /// Sets every coefficient to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.data.fill(0);
    }

    /// Performs `self = self + rhs`.
    #[inline]
    pub fn add_assign_reduce<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| modulus.reduce_add_assign(a, b));
    }

    /// Performs `self = self - rhs`.
    #[inline]
    pub fn sub_assign_reduce<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| modulus.reduce_sub_assign(a, b));
    }

    /// Performs `self = -self`.
    #[inline]
    pub fn neg_assign_reduce<M: RingReduce>(&mut self, modulus: M) {
        self.data
            .iter_mut()
            .for_each(|a| modulus.reduce_neg_assign(a));
    }

    /// Multiplies `self` by the monic monomial `X^degree` in `Z[X]/(X^N+1)`,
    /// `degree < 2N`.
    pub fn mul_monomial_inplace<M: RingReduce>(&mut self, degree: usize, modulus: M) {
        let n = self.coeff_count();
        debug_assert!(degree < n << 1);
        let neg = |v: &mut u64| modulus.reduce_neg_assign(v);

        if degree < n {
            self.data.rotate_right(degree);
            self.data[..degree].iter_mut().for_each(neg);
        } else {
            let r = degree - n;
            self.data.rotate_right(r);
            self.data[r..].iter_mut().for_each(neg);
        }
    }

    /// Generates a [`Polynomial`] with coefficients uniformly distributed in `[0, modulus)`.
    #[inline]
    pub fn random_uniform<R>(coeff_count: usize, modulus: u64, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        Self {
            data: Uniform::new(0, modulus)
                .sample_iter(&mut *rng)
                .take(coeff_count)
                .collect(),
        }
    }

    /// Generates a [`Polynomial`] with discrete gaussian coefficients lifted into `[0, modulus)`.
    #[inline]
    pub fn random_gaussian<M, R>(
        coeff_count: usize,
        gaussian: &DiscreteGaussian,
        modulus: M,
        rng: &mut R,
    ) -> Self
    where
        M: RingReduce,
        R: Rng + CryptoRng,
    {
        Self {
            data: (0..coeff_count)
                .map(|_| gaussian.sample_reduce(modulus, rng))
                .collect(),
        }
    }
}
