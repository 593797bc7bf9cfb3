use algebra::RingReduce;
use serde::{Deserialize, Serialize};

/// Represents a cryptographic structure based on the Learning with Errors (LWE) problem.
///
/// The phase of the ciphertext under secret `s` is `b - <a, s>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lwe {
    /// A vector of elements, representing the public vector part of the LWE instance.
    a: Vec<u64>,
    /// The value which is computed as the dot product of `a` with a secret vector,
    /// plus message and some noise.
    b: u64,
}

impl From<(Vec<u64>, u64)> for Lwe {
    /// Converts a tuple `(a, b)` into an instance of `Self`.
    #[inline]
    fn from((a, b): (Vec<u64>, u64)) -> Self {
        Self { a, b }
    }
}

impl Lwe {
    /// Creates a new [`Lwe`].
    #[inline]
    pub fn new(a: Vec<u64>, b: u64) -> Self {
        Self { a, b }
    }

    /// Creates a zero [`Lwe`] with the given dimension.
    #[inline]
    pub fn zero(dimension: usize) -> Self {
        Self {
            a: vec![0; dimension],
            b: 0,
        }
    }

    /// Creates a noiseless [`Lwe`] `(0, b)`, decryptable under every key.
    #[inline]
    pub fn trivial(dimension: usize, b: u64) -> Self {
        Self {
            a: vec![0; dimension],
            b,
        }
    }

    /// Returns a reference to the `a` of this [`Lwe`].
    #[inline]
    pub fn a(&self) -> &[u64] {
        self.a.as_ref()
    }

    /// Returns a mutable reference to the `a` of this [`Lwe`].
    #[inline]
    pub fn a_mut(&mut self) -> &mut Vec<u64> {
        &mut self.a
    }

    /// Returns the `b` of this [`Lwe`].
    #[inline]
    pub fn b(&self) -> u64 {
        self.b
    }

    /// Returns a mutable reference to the `b` of this [`Lwe`].
    #[inline]
    pub fn b_mut(&mut self) -> &mut u64 {
        &mut self.b
    }

    /// Returns the dimension of this [`Lwe`].
    #[inline]
    pub fn dimension(&self) -> usize {
        self.a.len()
    }

    /// Perform component-wise addition of two [`Lwe`].
    #[inline]
    pub fn add_reduce_component_wise_ref<M: RingReduce>(&self, rhs: &Self, modulus: M) -> Self {
        let mut result = self.clone();
        result.add_reduce_inplace_component_wise(rhs, modulus);
        result
    }

    /// Performs `self = self + rhs`.
    #[inline]
    pub fn add_reduce_inplace_component_wise<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        debug_assert_eq!(self.a.len(), rhs.a.len());
        self.a
            .iter_mut()
            .zip(rhs.a())
            .for_each(|(x, &y)| modulus.reduce_add_assign(x, y));
        modulus.reduce_add_assign(&mut self.b, rhs.b);
    }

    /// Performs `self = self - rhs`.
    #[inline]
    pub fn sub_reduce_inplace_component_wise<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        debug_assert_eq!(self.a.len(), rhs.a.len());
        self.a
            .iter_mut()
            .zip(rhs.a())
            .for_each(|(x, &y)| modulus.reduce_sub_assign(x, y));
        modulus.reduce_sub_assign(&mut self.b, rhs.b);
    }

    /// Performs `self = -self`.
    #[inline]
    pub fn neg_reduce_inplace<M: RingReduce>(&mut self, modulus: M) {
        self.a
            .iter_mut()
            .for_each(|x| modulus.reduce_neg_assign(x));
        modulus.reduce_neg_assign(&mut self.b);
    }

    /// Performs `self = scalar * self`.
    #[inline]
    pub fn mul_scalar_reduce_inplace<M: RingReduce>(&mut self, scalar: u64, modulus: M) {
        self.a
            .iter_mut()
            .for_each(|x| modulus.reduce_mul_assign(x, scalar));
        modulus.reduce_mul_assign(&mut self.b, scalar);
    }

    /// Returns the phase `b - <a, s>` for the secret `s` given in `[0, modulus)`.
    #[inline]
    pub fn phase<M: RingReduce>(&self, secret: &[u64], modulus: M) -> u64 {
        debug_assert_eq!(self.a.len(), secret.len());
        modulus.reduce_sub(self.b, modulus.reduce_dot_product(&self.a, secret))
    }
}

#[cfg(test)]
mod tests {
    use algebra::PowOf2Modulus;

    use super::*;

    #[test]
    fn test_lwe_linear() {
        let m = PowOf2Modulus::new(1 << 10).unwrap();
        let s = vec![1, 0, 1023, 1];
        let x = Lwe::new(vec![5, 6, 7, 8], 100);
        let y = Lwe::new(vec![1000, 2, 3, 4], 7);

        let mut sum = x.add_reduce_component_wise_ref(&y, m);
        assert_eq!(sum.phase(&s, m), m.reduce_add(x.phase(&s, m), y.phase(&s, m)));

        sum.sub_reduce_inplace_component_wise(&y, m);
        assert_eq!(sum, x);

        let mut neg = x.clone();
        neg.neg_reduce_inplace(m);
        assert_eq!(neg.phase(&s, m), m.reduce_neg(x.phase(&s, m)));

        let mut triple = x.clone();
        triple.mul_scalar_reduce_inplace(3, m);
        assert_eq!(triple.phase(&s, m), m.reduce_mul(x.phase(&s, m), 3));

        assert_eq!(Lwe::trivial(4, 256).phase(&s, m), 256);
    }
}
