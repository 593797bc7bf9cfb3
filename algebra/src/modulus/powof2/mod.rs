use serde::{Deserialize, Serialize};

use crate::{reduce::RingReduce, AlgebraError};

/// A power of two modulus `2^k`, reducing by masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PowOf2Modulus {
    /// `2^k - 1`
    mask: u64,
}

impl TryFrom<u64> for PowOf2Modulus {
    type Error = AlgebraError;

    #[inline]
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PowOf2Modulus> for u64 {
    #[inline]
    fn from(modulus: PowOf2Modulus) -> Self {
        modulus.value()
    }
}

impl PowOf2Modulus {
    /// Creates a [`PowOf2Modulus`] from the modulus value `2^k`, `1 <= k <= 62`.
    #[inline]
    pub fn new(value: u64) -> Result<Self, AlgebraError> {
        if !value.is_power_of_two() || !(2..=(1 << 62)).contains(&value) {
            return Err(AlgebraError::ModulusOutOfRange(value));
        }
        Ok(Self { mask: value - 1 })
    }

    /// Returns the modulus value of this [`PowOf2Modulus`].
    #[inline]
    pub const fn value(&self) -> u64 {
        self.mask + 1
    }

    /// Returns the mask of this [`PowOf2Modulus`].
    #[inline]
    pub const fn mask(&self) -> u64 {
        self.mask
    }

    /// Returns `k` where the modulus is `2^k`.
    #[inline]
    pub const fn log_modulus(&self) -> u32 {
        self.mask.count_ones()
    }
}

impl RingReduce for PowOf2Modulus {
    #[inline]
    fn modulus_value(&self) -> u64 {
        self.value()
    }

    #[inline]
    fn reduce(&self, value: u64) -> u64 {
        value & self.mask
    }

    #[inline]
    fn reduce_mul(&self, a: u64, b: u64) -> u64 {
        a.wrapping_mul(b) & self.mask
    }

    #[inline]
    fn reduce_add(&self, a: u64, b: u64) -> u64 {
        a.wrapping_add(b) & self.mask
    }

    #[inline]
    fn reduce_sub(&self, a: u64, b: u64) -> u64 {
        a.wrapping_sub(b) & self.mask
    }

    #[inline]
    fn reduce_neg(&self, a: u64) -> u64 {
        a.wrapping_neg() & self.mask
    }

    #[inline]
    fn reduce_i64(&self, value: i64) -> u64 {
        (value as u64) & self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow_of_2_modulus() {
        let m = PowOf2Modulus::new(512).unwrap();
        assert_eq!(m.log_modulus(), 9);
        assert_eq!(m.reduce_sub(3, 5), 510);
        assert_eq!(m.reduce_neg(1), 511);
        assert_eq!(m.reduce_i64(-3), 509);
        assert_eq!(m.reduce_mul(300, 2), 88);
        assert_eq!(m.centered(510), -2);
        assert!(PowOf2Modulus::new(100).is_err());
        assert!(PowOf2Modulus::new(1).is_err());
    }
}
