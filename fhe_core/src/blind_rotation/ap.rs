use std::time::Instant;

use algebra::{decompose::UnsignedBasis, RingReduce};
use lattice::{DecomposeSpace, NttRgsw, Rlwe};
use rand::{CryptoRng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    utils::Pool, BlindRotate, BootstrapMethod, FHECoreError, LweSecretKey, RingGswParameters,
};

/// The FHEW blind rotation key.
///
/// For every LWE coordinate `s_i`, every digit position `k` of the refreshing
/// basis `baseR` and every non zero digit `v`, the key holds
/// `RGSW(X^{(s_i * v * baseR^k mod q) * 2N/q})`, stored flat in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApBlindRotationKey {
    lwe_dimension: usize,
    refresh_basis: UnsignedBasis,
    key: Vec<NttRgsw>,
    #[serde(skip)]
    space: Pool<DecomposeSpace>,
}

impl ApBlindRotationKey {
    /// Generates the [`ApBlindRotationKey`].
    pub fn generate<R>(
        lwe_secret_key: &LweSecretKey,
        ring_secret_key: &LweSecretKey,
        params: &RingGswParameters,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let start = Instant::now();

        let ntt_table = params.ntt_table();
        let ring_secret = ring_secret_key.to_ntt(ntt_table);
        let gadget_basis = params.gadget_basis();
        let gaussian = params.noise_distribution();
        let factor = params.rotation_factor();

        let q = params.lwe_modulus();
        let refresh_basis = params.refresh_basis();
        let basis_value = refresh_basis.basis();

        let base = q.reduce(basis_value);
        let powers: Vec<u64> = std::iter::successors(Some(1), |&p| Some(q.reduce_mul(p, base)))
            .take(refresh_basis.digit_count())
            .collect();

        let seeds: Vec<<ChaCha20Rng as SeedableRng>::Seed> =
            (0..lwe_secret_key.dimension()).map(|_| rng.gen()).collect();

        let key: Vec<NttRgsw> = seeds
            .into_par_iter()
            .zip(lwe_secret_key.as_slice().par_iter())
            .flat_map_iter(|(seed, &s)| {
                let mut csrng = ChaCha20Rng::from_seed(seed);
                let s = q.reduce_i64(s as i64);
                let mut row = Vec::with_capacity(powers.len() * (basis_value as usize - 1));
                for &power in powers.iter() {
                    let scaled = q.reduce_mul(s, power);
                    for v in 1..basis_value {
                        let exponent = q.reduce_mul(scaled, q.reduce(v)) as usize * factor;
                        row.push(NttRgsw::generate_monomial(
                            &ring_secret,
                            1,
                            exponent,
                            gadget_basis,
                            gaussian,
                            ntt_table,
                            &mut csrng,
                        ));
                    }
                }
                row
            })
            .collect();

        debug!(
            lwe_dimension = lwe_secret_key.dimension(),
            rgsw_count = key.len(),
            elapsed = ?start.elapsed(),
            "generated AP blind rotation key"
        );

        Self {
            lwe_dimension: lwe_secret_key.dimension(),
            refresh_basis,
            key,
            space: Pool::new(),
        }
    }

    /// Returns the refreshing basis of this [`ApBlindRotationKey`].
    #[inline]
    pub fn refresh_basis(&self) -> UnsignedBasis {
        self.refresh_basis
    }

    /// Checks the table size against the header and every entry against `params`.
    pub fn check_shape(&self, params: &RingGswParameters) -> Result<(), FHECoreError> {
        let expected = self.lwe_dimension
            * self.refresh_basis.digit_count()
            * (self.refresh_basis.basis() as usize).saturating_sub(1);
        if self.key.len() != expected {
            return Err(FHECoreError::KeySizeMismatch {
                name: "AP blind rotation key",
                expected,
                found: self.key.len(),
            });
        }

        let dimension = params.dimension();
        let digit_count = params.gadget_basis().digit_count();
        match self
            .key
            .iter()
            .position(|rgsw| !rgsw.has_shape(dimension, digit_count))
        {
            Some(index) => Err(FHECoreError::KeyEntryShapeMismatch {
                name: "AP blind rotation key",
                index,
                dimension,
                digit_count,
            }),
            None => Ok(()),
        }
    }
}

impl BlindRotate for ApBlindRotationKey {
    #[inline]
    fn method(&self) -> BootstrapMethod {
        BootstrapMethod::Ap
    }

    #[inline]
    fn lwe_dimension(&self) -> usize {
        self.lwe_dimension
    }

    #[inline]
    fn ring_dimension(&self) -> usize {
        self.key.first().map_or(0, NttRgsw::dimension)
    }

    #[inline]
    fn gadget_digit_count(&self) -> usize {
        self.key.first().map_or(0, NttRgsw::digit_count)
    }

    fn blind_rotate(&self, acc: Rlwe, a: &[u64], params: &RingGswParameters) -> Rlwe {
        debug_assert_eq!(a.len(), self.lwe_dimension);

        let ntt_table = params.ntt_table();
        let gadget_basis = params.gadget_basis();
        let q = params.lwe_modulus();

        let value_count = self.refresh_basis.basis() as usize - 1;
        let row_len = self.refresh_basis.digit_count() * value_count;

        let mut space = self
            .space
            .get_or_else(|| DecomposeSpace::new(params.dimension(), gadget_basis.digit_count()));

        let result = a
            .iter()
            .zip(self.key.chunks_exact(row_len))
            .fold(acc, |acc, (&a_i, row)| {
                let minus_a_i = q.reduce_neg(q.reduce(a_i));
                self.refresh_basis
                    .decompose(minus_a_i)
                    .zip(row.chunks_exact(value_count))
                    .fold(acc, |acc, (d, k_i)| {
                        if d == 0 {
                            acc
                        } else {
                            acc.mul_ntt_rgsw(&k_i[d as usize - 1], gadget_basis, ntt_table, &mut space)
                        }
                    })
            });

        self.space.store(space);

        result
    }
}

#[cfg(test)]
mod tests {
    use crate::blind_rotation::tests::{check_blind_rotation, small_params};

    use super::*;

    #[test]
    fn test_ap_blind_rotation() {
        check_blind_rotation(BootstrapMethod::Ap);
    }

    #[test]
    fn test_ap_check_shape() {
        let mut rng = rand::thread_rng();
        let (lwe, params) = small_params(BootstrapMethod::Ap);
        let lwe_sk = LweSecretKey::generate(lwe.dimension(), &mut rng);
        let ring_sk = LweSecretKey::generate(params.dimension(), &mut rng);
        let key = ApBlindRotationKey::generate(&lwe_sk, &ring_sk, &params, &mut rng);
        assert_eq!(key.check_shape(&params), Ok(()));

        let full = key.key.len();
        let mut short = key.clone();
        short.key.pop();
        assert_eq!(
            short.check_shape(&params),
            Err(FHECoreError::KeySizeMismatch {
                name: "AP blind rotation key",
                expected: full,
                found: full - 1
            })
        );

        // same n and q, twice the ring dimension
        let modulus = algebra::arith::ntt_prime(27, 256).unwrap();
        let wider =
            RingGswParameters::new(&lwe, 128, modulus, 1 << 9, 8, BootstrapMethod::Ap).unwrap();
        assert!(matches!(
            key.check_shape(&wider),
            Err(FHECoreError::KeyEntryShapeMismatch { index: 0, .. })
        ));
    }
}
