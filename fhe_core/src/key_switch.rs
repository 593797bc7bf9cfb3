use std::time::Instant;

use algebra::{decompose::UnsignedBasis, BarrettModulus, RingReduce};
use rand::{CryptoRng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{FHECoreError, LweCiphertext, LweParameters, LweSecretKey};

/// The Key Switching Key.
///
/// This struct stores the key that switches a ciphertext under an input
/// secret key to a [`LweCiphertext`] under an output secret key, both
/// modulo the key switching modulus **qKS**.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweKeySwitchingKey {
    input_dimension: usize,
    /// LWE vector dimension, refers to **n** in the paper.
    output_dimension: usize,
    modulus: BarrettModulus,
    basis: UnsignedBasis,
    /// Key Switching Key data
    ///
    /// k_{i, k, v} encrypts `s_i * v * basis^k`, stored flat in that order.
    ///
    /// i \in \{0, input_dimension-1\}
    /// k \in \{0, dks-1\}
    /// v \in \{1, bks-1\}
    key: Vec<LweCiphertext>,
}

impl LweKeySwitchingKey {
    /// Generates a new [`LweKeySwitchingKey`] from `input` to `output`.
    ///
    /// Every input coordinate draws its own seed from `rng`, so the rows are
    /// generated in parallel.
    pub fn generate<R>(
        input: &LweSecretKey,
        output: &LweSecretKey,
        params: &LweParameters,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let start = Instant::now();

        let modulus = params.key_switching_modulus();
        let basis = params.key_switching_basis();
        let gaussian = params.noise_distribution();
        let basis_value = basis.basis();

        let base = modulus.reduce(basis_value);
        let powers: Vec<u64> = std::iter::successors(Some(1), |&p| Some(modulus.reduce_mul(p, base)))
            .take(basis.digit_count())
            .collect();

        let seeds: Vec<<ChaCha20Rng as SeedableRng>::Seed> =
            (0..input.dimension()).map(|_| rng.gen()).collect();

        let key: Vec<LweCiphertext> = seeds
            .into_par_iter()
            .zip(input.as_slice().par_iter())
            .flat_map_iter(|(seed, &z)| {
                let mut csrng = ChaCha20Rng::from_seed(seed);
                let z = modulus.reduce_i64(z as i64);
                let mut row = Vec::with_capacity(powers.len() * (basis_value as usize - 1));
                for &power in powers.iter() {
                    let scaled = modulus.reduce_mul(z, power);
                    for v in 1..basis_value {
                        let message = modulus.reduce_mul(scaled, modulus.reduce(v));
                        row.push(output.encrypt(message, modulus, gaussian, &mut csrng));
                    }
                }
                row
            })
            .collect();

        debug!(
            input_dimension = input.dimension(),
            output_dimension = output.dimension(),
            elapsed = ?start.elapsed(),
            "generated key switching key"
        );

        Self {
            input_dimension: input.dimension(),
            output_dimension: output.dimension(),
            modulus,
            basis,
            key,
        }
    }

    /// Returns the input dimension of this [`LweKeySwitchingKey`].
    #[inline]
    pub fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    /// Returns the output dimension of this [`LweKeySwitchingKey`].
    #[inline]
    pub fn output_dimension(&self) -> usize {
        self.output_dimension
    }

    /// Returns the modulus of this [`LweKeySwitchingKey`].
    #[inline]
    pub fn modulus(&self) -> BarrettModulus {
        self.modulus
    }

    /// Returns the basis of this [`LweKeySwitchingKey`].
    #[inline]
    pub fn basis(&self) -> UnsignedBasis {
        self.basis
    }

    /// Checks that the table holds one ciphertext of the output dimension
    /// for every input coordinate, digit position and non zero digit.
    pub fn check_shape(&self) -> Result<(), FHECoreError> {
        let expected = self.input_dimension
            * self.basis.digit_count()
            * (self.basis.basis() as usize).saturating_sub(1);
        if self.key.len() != expected {
            return Err(FHECoreError::KeySizeMismatch {
                name: "Key switching key",
                expected,
                found: self.key.len(),
            });
        }
        if let Some(entry) = self
            .key
            .iter()
            .find(|entry| entry.dimension() != self.output_dimension)
        {
            return Err(FHECoreError::DimensionMismatch {
                expected: self.output_dimension,
                found: entry.dimension(),
            });
        }
        Ok(())
    }

    /// Performs key switching operation.
    ///
    /// `ciphertext` must be modulo **qKS** and of the input dimension.
    pub fn key_switch(&self, ciphertext: &LweCiphertext) -> Result<LweCiphertext, FHECoreError> {
        if ciphertext.dimension() != self.input_dimension {
            return Err(FHECoreError::DimensionMismatch {
                expected: self.input_dimension,
                found: ciphertext.dimension(),
            });
        }

        let modulus = self.modulus;
        let row_len = self.basis.digit_count() * (self.basis.basis() as usize - 1);
        let value_count = self.basis.basis() as usize - 1;

        let mut result = LweCiphertext::zero(self.output_dimension);

        ciphertext
            .a()
            .iter()
            .zip(self.key.chunks_exact(row_len))
            .for_each(|(&a_i, row)| {
                self.basis
                    .decompose(modulus.reduce(a_i))
                    .zip(row.chunks_exact(value_count))
                    .for_each(|(d, k_i)| {
                        if d != 0 {
                            result.add_reduce_inplace_component_wise(&k_i[d as usize - 1], modulus);
                        }
                    });
            });

        result.neg_reduce_inplace(modulus);
        modulus.reduce_add_assign(result.b_mut(), modulus.reduce(ciphertext.b()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use algebra::random::DiscreteGaussian;
    use rand::thread_rng;

    use super::*;

    #[test]
    fn test_key_switch() {
        let mut rng = thread_rng();
        let params = LweParameters::new(32, 512, 1 << 14, 1 << 5, 3.19).unwrap();
        let modulus = params.key_switching_modulus();
        let gaussian = DiscreteGaussian::new(3.19).unwrap();

        let input = LweSecretKey::generate(128, &mut rng);
        let output = LweSecretKey::generate(32, &mut rng);
        let ksk = LweKeySwitchingKey::generate(&input, &output, &params, &mut rng);

        for message in [0u64, 1 << 12, 1 << 13, 3 << 12] {
            let c = input.encrypt(message, modulus, &gaussian, &mut rng);
            let switched = ksk.key_switch(&c).unwrap();
            assert_eq!(switched.dimension(), 32);

            let phase = output.phase(&switched, modulus);
            let err = modulus.centered(modulus.reduce_sub(phase, message));
            assert!(err.abs() < 1 << 10, "{err}");
        }

        assert_eq!(ksk.check_shape(), Ok(()));

        assert_eq!(
            ksk.key_switch(&LweCiphertext::zero(31)),
            Err(FHECoreError::DimensionMismatch {
                expected: 128,
                found: 31
            })
        );
    }

    #[test]
    fn test_check_shape() {
        let mut rng = thread_rng();
        let params = LweParameters::new(8, 64, 1 << 10, 1 << 5, 3.19).unwrap();
        let input = LweSecretKey::generate(16, &mut rng);
        let output = LweSecretKey::generate(8, &mut rng);
        let ksk = LweKeySwitchingKey::generate(&input, &output, &params, &mut rng);
        let full = ksk.key.len();
        assert_eq!(full, 16 * 2 * 31);

        let mut short = ksk.clone();
        short.key.truncate(full / 2);
        assert_eq!(
            short.check_shape(),
            Err(FHECoreError::KeySizeMismatch {
                name: "Key switching key",
                expected: full,
                found: full / 2
            })
        );

        let mut narrow = ksk;
        narrow.key[7] = LweCiphertext::zero(5);
        assert_eq!(
            narrow.check_shape(),
            Err(FHECoreError::DimensionMismatch {
                expected: 8,
                found: 5
            })
        );
    }
}
