/// A number used for fast modular multiplication.
///
/// This is efficient if many operations are multiplied by
/// the same number and then reduced with the same modulus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShoupFactor {
    /// value
    value: u64,

    /// quotient `⌊value * 2^64 / modulus⌋`
    quotient: u64,
}

impl ShoupFactor {
    /// Constructs a [`ShoupFactor`].
    ///
    /// * `value` must be less than `modulus`, and `modulus` less than `2^63`.
    #[inline]
    pub fn new(value: u64, modulus: u64) -> Self {
        debug_assert!(value < modulus);
        Self {
            value,
            quotient: (((value as u128) << 64) / modulus as u128) as u64,
        }
    }

    /// Returns the value of this [`ShoupFactor`].
    #[inline]
    pub const fn value(self) -> u64 {
        self.value
    }

    /// Returns the quotient of this [`ShoupFactor`].
    #[inline]
    pub const fn quotient(self) -> u64 {
        self.quotient
    }

    /// Calculates `rhs * self.value (mod modulus)`.
    #[inline]
    pub fn mul_reduce(self, rhs: u64, modulus: u64) -> u64 {
        let hi = ((rhs as u128 * self.quotient as u128) >> 64) as u64;
        let r = self
            .value
            .wrapping_mul(rhs)
            .wrapping_sub(hi.wrapping_mul(modulus));
        if r >= modulus {
            r - modulus
        } else {
            r
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};

    use super::*;

    #[test]
    fn test_shoup_mul() {
        let mut rng = thread_rng();
        let modulus = (1u64 << 61) - 1;
        for _ in 0..1000 {
            let w = rng.gen_range(0..modulus);
            let x = rng.gen_range(0..modulus);
            let factor = ShoupFactor::new(w, modulus);
            let expected = ((w as u128 * x as u128) % modulus as u128) as u64;
            assert_eq!(factor.mul_reduce(x, modulus), expected);
        }
    }
}
