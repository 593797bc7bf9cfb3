//! This module mainly defines and implements
//! the functions, structures and methods
//! of the negacyclic number theory transform.

mod table;

pub use table::NttTable;

use crate::polynomial::{NttPolynomial, Polynomial};

/// An abstract layer for ntt table.
pub trait NumberTheoryTransform {
    /// Perform a fast number theory transform.
    ///
    /// This function transforms a polynomial to a ntt polynomial.
    ///
    /// # Arguments
    ///
    /// * `poly` - inputs in normal order, outputs in bit-reversed order
    #[inline]
    fn transform(&self, poly: &Polynomial) -> NttPolynomial {
        self.transform_inplace(poly.clone())
    }

    /// Perform a fast number theory transform in place.
    ///
    /// # Arguments
    ///
    /// * `poly` - inputs in normal order, outputs in bit-reversed order
    #[inline]
    fn transform_inplace(&self, poly: Polynomial) -> NttPolynomial {
        let mut values = poly.into_vec();
        self.transform_slice(&mut values);
        NttPolynomial::new(values)
    }

    /// Perform a fast inverse number theory transform.
    ///
    /// This function transforms a ntt polynomial to a polynomial.
    ///
    /// # Arguments
    ///
    /// * `values` - inputs in bit-reversed order, outputs in normal order
    #[inline]
    fn inverse_transform(&self, values: &NttPolynomial) -> Polynomial {
        self.inverse_transform_inplace(values.clone())
    }

    /// Perform a fast inverse number theory transform in place.
    ///
    /// # Arguments
    ///
    /// * `values` - inputs in bit-reversed order, outputs in normal order
    #[inline]
    fn inverse_transform_inplace(&self, values: NttPolynomial) -> Polynomial {
        let mut coeffs = values.into_vec();
        self.inverse_transform_slice(&mut coeffs);
        Polynomial::new(coeffs)
    }

    /// Perform a fast number theory transform on a slice in place.
    fn transform_slice(&self, poly: &mut [u64]);

    /// Perform a fast inverse number theory transform on a slice in place.
    fn inverse_transform_slice(&self, values: &mut [u64]);

    /// Perform a fast number theory transform for **monomial** `coeff*X^degree`,
    /// `degree < 2N`, writing the result into `values`.
    fn transform_monomial(&self, coeff: u64, degree: usize, values: &mut [u64]);
}
