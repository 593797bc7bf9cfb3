use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{reduce::RingReduce, AlgebraError};

/// A modulus, using barrett reduction algorithm.
///
/// The struct stores the modulus number and some precomputed
/// data. Here, `k` is the bit count of the modulus and
/// the ratio `µ` = ⌊2^(2k)/value⌋.
///
/// It's efficient if many reductions are performed with a single modulus.
/// The modulus must lie in `[2, 2^62)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct BarrettModulus {
    /// the value to indicate the modulus
    value: u64,
    /// ratio `µ` = ⌊2^(2k)/value⌋
    ratio: u64,
    /// `k`, the bit count of `value`
    bit_count: u32,
}

impl Display for BarrettModulus {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<u64> for BarrettModulus {
    type Error = AlgebraError;

    #[inline]
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BarrettModulus> for u64 {
    #[inline]
    fn from(modulus: BarrettModulus) -> Self {
        modulus.value
    }
}

impl BarrettModulus {
    /// Creates a [`BarrettModulus`] instance.
    pub fn new(value: u64) -> Result<Self, AlgebraError> {
        if !(2..(1 << 62)).contains(&value) {
            return Err(AlgebraError::ModulusOutOfRange(value));
        }
        let bit_count = u64::BITS - value.leading_zeros();
        let ratio = ((1u128 << (2 * bit_count)) / value as u128) as u64;
        Ok(Self {
            value,
            ratio,
            bit_count,
        })
    }

    /// Returns the value of this [`BarrettModulus`].
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Returns the ratio of this [`BarrettModulus`].
    #[inline]
    pub const fn ratio(&self) -> u64 {
        self.ratio
    }

    /// Returns the bit count of this [`BarrettModulus`].
    #[inline]
    pub const fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Calculates `value (mod modulus)` for `value < 2^(2k)`.
    ///
    /// Algorithm 14.42 of the Handbook of Applied Cryptography with base 2.
    #[inline]
    pub fn reduce_wide(&self, value: u128) -> u64 {
        debug_assert!(value < 1u128 << (2 * self.bit_count));
        let q1 = value >> (self.bit_count - 1);
        let q3 = (q1 * self.ratio as u128) >> (self.bit_count + 1);
        let mut r = (value - q3 * self.value as u128) as u64;
        while r >= self.value {
            r -= self.value;
        }
        r
    }

    /// Calculates `base^exp (mod modulus)`.
    pub fn pow(&self, base: u64, mut exp: u64) -> u64 {
        let mut base = self.reduce(base);
        let mut result = 1 % self.value;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.reduce_mul(result, base);
            }
            base = self.reduce_mul(base, base);
            exp >>= 1;
        }
        result
    }

    /// Calculates the inverse of `value` through Fermat's little theorem.
    ///
    /// Only meaningful when the modulus is prime and `value` is not zero.
    #[inline]
    pub fn inv(&self, value: u64) -> u64 {
        self.pow(value, self.value - 2)
    }
}

impl RingReduce for BarrettModulus {
    #[inline]
    fn modulus_value(&self) -> u64 {
        self.value
    }

    #[inline]
    fn reduce(&self, value: u64) -> u64 {
        if self.bit_count >= 32 || value < 1 << (2 * self.bit_count) {
            self.reduce_wide(value as u128)
        } else {
            value % self.value
        }
    }

    #[inline]
    fn reduce_mul(&self, a: u64, b: u64) -> u64 {
        self.reduce_wide(a as u128 * b as u128)
    }
}
