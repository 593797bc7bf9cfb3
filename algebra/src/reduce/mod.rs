//! Modular reduction operations shared by every modulus type.

/// Modular arithmetic on `u64` values which are already reduced into `[0, modulus)`.
///
/// Implementors only need to provide the modulus value, a plain reduction and a
/// modular multiplication; the additive operations have default implementations
/// which are valid for every modulus below `2^63`.
pub trait RingReduce: Copy + Send + Sync {
    /// Returns the value of the modulus.
    fn modulus_value(&self) -> u64;

    /// Calculates `value (mod modulus)` for an arbitrary `value`.
    fn reduce(&self, value: u64) -> u64;

    /// Calculates `a * b (mod modulus)`.
    fn reduce_mul(&self, a: u64, b: u64) -> u64;

    /// Calculates `a + b (mod modulus)`.
    #[inline]
    fn reduce_add(&self, a: u64, b: u64) -> u64 {
        let m = self.modulus_value();
        let r = a + b;
        if r >= m {
            r - m
        } else {
            r
        }
    }

    /// Calculates `a - b (mod modulus)`.
    #[inline]
    fn reduce_sub(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a + self.modulus_value() - b
        }
    }

    /// Calculates `-a (mod modulus)`.
    #[inline]
    fn reduce_neg(&self, a: u64) -> u64 {
        if a == 0 {
            0
        } else {
            self.modulus_value() - a
        }
    }

    /// Calculates `a * b + c (mod modulus)`.
    #[inline]
    fn reduce_mul_add(&self, a: u64, b: u64, c: u64) -> u64 {
        self.reduce_add(self.reduce_mul(a, b), c)
    }

    /// Lifts a signed value into `[0, modulus)`.
    #[inline]
    fn reduce_i64(&self, value: i64) -> u64 {
        if value >= 0 {
            self.reduce(value as u64)
        } else {
            self.reduce_neg(self.reduce(value.unsigned_abs()))
        }
    }

    /// Returns the centered representative of `value` in `(-modulus/2, modulus/2]`.
    #[inline]
    fn centered(&self, value: u64) -> i64 {
        let m = self.modulus_value();
        if value > m >> 1 {
            -((m - value) as i64)
        } else {
            value as i64
        }
    }

    /// Calculates `a = a + b (mod modulus)`.
    #[inline]
    fn reduce_add_assign(&self, a: &mut u64, b: u64) {
        *a = self.reduce_add(*a, b);
    }

    /// Calculates `a = a - b (mod modulus)`.
    #[inline]
    fn reduce_sub_assign(&self, a: &mut u64, b: u64) {
        *a = self.reduce_sub(*a, b);
    }

    /// Calculates `a = -a (mod modulus)`.
    #[inline]
    fn reduce_neg_assign(&self, a: &mut u64) {
        *a = self.reduce_neg(*a);
    }

    /// Calculates `a = a * b (mod modulus)`.
    #[inline]
    fn reduce_mul_assign(&self, a: &mut u64, b: u64) {
        *a = self.reduce_mul(*a, b);
    }

    /// Calculates the dot product `Σ a_i * b_i (mod modulus)`.
    #[inline]
    fn reduce_dot_product(&self, a: &[u64], b: &[u64]) -> u64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .fold(0, |acc, (&x, &y)| self.reduce_mul_add(x, y, acc))
    }
}
