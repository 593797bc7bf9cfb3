//! Gadget decomposition of integers and polynomials in an arbitrary basis.

use serde::{Deserialize, Serialize};

use crate::{polynomial::Polynomial, reduce::RingReduce, AlgebraError};

/// Returns the least `d` with `basis^d >= modulus`.
#[inline]
pub fn digit_count(modulus: u64, basis: u64) -> usize {
    debug_assert!(basis >= 2);
    let mut count = 0;
    let mut power = 1u128;
    while power < modulus as u128 {
        power *= basis as u128;
        count += 1;
    }
    count
}

/// The basis for exact signed decomposition modulo `modulus`.
///
/// A value `x` is first mapped to its centered representative and then
/// written as `Σ d_l * basis^l` with `d_l` in `[-⌊basis/2⌋, ⌈basis/2⌉-1]`.
/// A carry left after the last digit is folded into the last digit, so
/// the recomposition is always exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedBasis {
    modulus: u64,
    basis: u64,
    digit_count: usize,
    /// `basis^l (mod modulus)`
    powers: Vec<u64>,
}

impl SignedBasis {
    /// Creates a new [`SignedBasis`].
    pub fn new<M: RingReduce>(modulus: M, basis: u64) -> Result<Self, AlgebraError> {
        if basis < 2 {
            return Err(AlgebraError::BasisErr(basis));
        }
        let q = modulus.modulus_value();
        let digit_count = digit_count(q, basis);

        let base = modulus.reduce(basis);
        let powers = std::iter::successors(Some(1 % q), |&p| Some(modulus.reduce_mul(p, base)))
            .take(digit_count)
            .collect();

        Ok(Self {
            modulus: q,
            basis,
            digit_count,
            powers,
        })
    }

    /// Returns the modulus of this [`SignedBasis`].
    #[inline]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Returns the basis of this [`SignedBasis`].
    #[inline]
    pub fn basis(&self) -> u64 {
        self.basis
    }

    /// Returns the digit count of this [`SignedBasis`], `⌈log_basis(modulus)⌉`.
    #[inline]
    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    /// Returns the gadget vector `(basis^l mod modulus)_l`.
    #[inline]
    pub fn powers(&self) -> &[u64] {
        &self.powers
    }

    /// Decomposes `value < modulus` into signed digits.
    pub fn decompose_value(&self, value: u64, digits: &mut [i64]) {
        debug_assert_eq!(digits.len(), self.digit_count);
        debug_assert!(value < self.modulus);

        let basis = self.basis as i64;
        let half = (basis - 1) / 2;

        let mut rest = if value > self.modulus >> 1 {
            value as i64 - self.modulus as i64
        } else {
            value as i64
        };

        for d in digits.iter_mut() {
            let mut digit = rest.rem_euclid(basis);
            if digit > half {
                digit -= basis;
            }
            *d = digit;
            rest = (rest - digit) / basis;
        }

        if rest != 0 {
            if let Some(last) = digits.last_mut() {
                *last += rest * basis;
            }
        }
    }

    /// Decomposes every coefficient of `poly`, writing digit `l` of
    /// coefficient `i` into `destination[l][i]`, lifted into `[0, modulus)`.
    pub fn decompose_poly<M: RingReduce>(
        &self,
        poly: &Polynomial,
        modulus: M,
        destination: &mut [Polynomial],
    ) {
        debug_assert_eq!(destination.len(), self.digit_count);
        let mut digits = vec![0i64; self.digit_count];
        for (i, &c) in poly.iter().enumerate() {
            self.decompose_value(c, &mut digits);
            for (dest, &d) in destination.iter_mut().zip(digits.iter()) {
                dest[i] = modulus.reduce_i64(d);
            }
        }
    }
}

/// The basis for plain unsigned decomposition of values below `modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedBasis {
    basis: u64,
    digit_count: usize,
}

impl UnsignedBasis {
    /// Creates a new [`UnsignedBasis`].
    #[inline]
    pub fn new(modulus: u64, basis: u64) -> Result<Self, AlgebraError> {
        if basis < 2 {
            return Err(AlgebraError::BasisErr(basis));
        }
        Ok(Self {
            basis,
            digit_count: digit_count(modulus, basis),
        })
    }

    /// Returns the basis of this [`UnsignedBasis`].
    #[inline]
    pub fn basis(&self) -> u64 {
        self.basis
    }

    /// Returns the digit count of this [`UnsignedBasis`].
    #[inline]
    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    /// Returns the digits of `value`, least significant first.
    #[inline]
    pub fn decompose(self, value: u64) -> impl Iterator<Item = u64> {
        let basis = self.basis;
        let mut rest = value;
        (0..self.digit_count).map(move |_| {
            let digit = rest % basis;
            rest /= basis;
            digit
        })
    }
}
