use rand::{
    distributions::{Distribution, Uniform},
    CryptoRng, Rng,
};
use serde::{Deserialize, Serialize};

use crate::reduce::RingReduce;

/// A polynomial in NTT representation, the values at the `2N`-th primitive roots
/// in bit-reversed order.
///
/// Multiplication is component-wise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NttPolynomial {
    data: Vec<u64>,
}

impl From<Vec<u64>> for NttPolynomial {
    #[inline]
    fn from(data: Vec<u64>) -> Self {
        Self { data }
    }
}

impl NttPolynomial {
    /// Creates a new [`NttPolynomial`].
    #[inline]
    pub fn new(data: Vec<u64>) -> Self {
        Self { data }
    }

    /// Creates a zero [`NttPolynomial`].
    #[inline]
    pub fn zero(coeff_count: usize) -> Self {
        Self {
            data: vec![0; coeff_count],
        }
    }

    /// Returns the coefficient count of this [`NttPolynomial`].
    #[inline]
    pub fn coeff_count(&self) -> usize {
        self.data.len()
    }

    /// Returns a slice of the values.
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.data
    }

    /// Returns a mutable slice of the values.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.data
    }

    /// Consumes the polynomial and returns its values.
    #[inline]
    pub fn into_vec(self) -> Vec<u64> {
        self.data
    }

    /// Sets every value to zero.
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
            .zip(rhs.as_slice())
            .for_each(|(a, &b)| modulus.reduce_add_assign(a, b));
    }

    /// Performs `self = self - rhs`.
    #[inline]
    pub fn sub_assign_reduce<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.as_slice())
            .for_each(|(a, &b)| modulus.reduce_sub_assign(a, b));
    }

    /// Performs component-wise `self = self * rhs`.
    #[inline]
    pub fn mul_assign_reduce<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.as_slice())
            .for_each(|(a, &b)| modulus.reduce_mul_assign(a, b));
    }

    /// Performs component-wise `self = self + a * b`.
    #[inline]
    pub fn add_mul_assign_reduce<M: RingReduce>(&mut self, a: &Self, b: &Self, modulus: M) {
        debug_assert_eq!(self.coeff_count(), a.coeff_count());
        debug_assert_eq!(self.coeff_count(), b.coeff_count());
        self.data
            .iter_mut()
            .zip(a.as_slice().iter().zip(b.as_slice()))
            .for_each(|(c, (&x, &y))| *c = modulus.reduce_mul_add(x, y, *c));
    }

    /// Multiplies every value by the scalar `scalar`.
    #[inline]
    pub fn mul_scalar_assign_reduce<M: RingReduce>(&mut self, scalar: u64, modulus: M) {
        self.data
            .iter_mut()
            .for_each(|a| modulus.reduce_mul_assign(a, scalar));
    }

    /// Generates a [`NttPolynomial`] with values uniformly distributed in `[0, modulus)`.
    ///
    /// Uniform values are uniform in both representations.
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
}
