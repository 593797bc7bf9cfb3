//! Defines some algorithms for random values generation.

use rand::{
    distributions::{Distribution, Uniform},
    CryptoRng, Rng,
};
use rand_distr::Normal;

use crate::{reduce::RingReduce, AlgebraError};

/// Sample a ternary vector, each value uniform over `{-1, 0, 1}`.
#[inline]
pub fn sample_ternary_values<R>(length: usize, rng: &mut R) -> Vec<i8>
where
    R: Rng + CryptoRng,
{
    Uniform::new_inclusive(-1i8, 1)
        .sample_iter(rng)
        .take(length)
        .collect()
}

/// Sample a vector whose values are uniform in `[0, modulus)`.
#[inline]
pub fn sample_uniform_values<R>(modulus: u64, length: usize, rng: &mut R) -> Vec<u64>
where
    R: Rng + CryptoRng,
{
    Uniform::new(0, modulus)
        .sample_iter(rng)
        .take(length)
        .collect()
}

/// The rounded gaussian distribution `N(0, std_dev**2)`, tail-cut at `6 * std_dev`.
#[derive(Clone, Copy, Debug)]
pub struct DiscreteGaussian {
    normal: Normal<f64>,
    max_std_dev: f64,
}

impl DiscreteGaussian {
    /// Construct, from the standard deviation `σ`, which must be finite and non-negative.
    #[inline]
    pub fn new(std_dev: f64) -> Result<Self, AlgebraError> {
        if !std_dev.is_finite() || std_dev < 0. {
            return Err(AlgebraError::DistributionErr);
        }
        match Normal::new(0.0, std_dev) {
            Ok(normal) => Ok(Self {
                normal,
                max_std_dev: std_dev * 6.0,
            }),
            Err(_) => Err(AlgebraError::DistributionErr),
        }
    }

    /// Returns the standard deviation (`σ`) of the distribution.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }

    /// Samples a value and lifts it into `[0, modulus)`.
    #[inline]
    pub fn sample_reduce<M, R>(&self, modulus: M, rng: &mut R) -> u64
    where
        M: RingReduce,
        R: Rng + ?Sized,
    {
        modulus.reduce_i64(self.sample(rng))
    }
}

impl Distribution<i64> for DiscreteGaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        loop {
            let value = self.normal.sample(rng);
            if value.abs() <= self.max_std_dev {
                return value.round() as i64;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::thread_rng;

    use crate::modulus::PowOf2Modulus;

    use super::*;

    #[test]
    fn test_ternary() {
        let mut rng = thread_rng();
        let values = sample_ternary_values(3000, &mut rng);
        assert!(values.iter().all(|v| (-1..=1).contains(v)));
        for target in -1..=1 {
            let count = values.iter().filter(|&&v| v == target).count();
            assert!(count > 800, "{target}: {count}");
        }
    }

    #[test]
    fn test_gaussian_bounds() {
        let mut rng = thread_rng();
        let gaussian = DiscreteGaussian::new(3.19).unwrap();
        let modulus = PowOf2Modulus::new(1 << 10).unwrap();
        for _ in 0..2000 {
            let v: i64 = gaussian.sample(&mut rng);
            assert!(v.abs() <= 20);
            let r = gaussian.sample_reduce(modulus, &mut rng);
            assert!(modulus.centered(r).abs() <= 20);
        }
        assert!(DiscreteGaussian::new(-1.0).is_err());
        assert!(DiscreteGaussian::new(f64::NAN).is_err());
    }
}
