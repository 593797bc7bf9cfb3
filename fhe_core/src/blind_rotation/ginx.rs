use std::time::Instant;

use algebra::{NttPolynomial, NumberTheoryTransform};
use lattice::{DecomposeSpace, NttRgsw, NttRlwe, Rlwe};
use rand::{CryptoRng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    utils::Pool, BlindRotate, BootstrapMethod, FHECoreError, LweSecretKey, RingGswParameters,
};

/// The TFHE blind rotation key for ternary secrets.
///
/// Coordinate `s_i` maps to the pair `(RGSW([s_i == 1]), RGSW([s_i == -1]))`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GinxBlindRotationKey {
    key: Vec<(NttRgsw, NttRgsw)>,
    #[serde(skip)]
    space: Pool<BlindRotateSpace>,
}

#[derive(Debug)]
struct BlindRotateSpace {
    decompose_space: DecomposeSpace,
    plus: NttRlwe,
    minus: NttRlwe,
    monomial: NttPolynomial,
}

impl BlindRotateSpace {
    #[inline]
    fn new(dimension: usize, digit_count: usize) -> Self {
        Self {
            decompose_space: DecomposeSpace::new(dimension, digit_count),
            plus: NttRlwe::zero(dimension),
            minus: NttRlwe::zero(dimension),
            monomial: NttPolynomial::zero(dimension),
        }
    }
}

impl GinxBlindRotationKey {
    /// Generates the [`GinxBlindRotationKey`].
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

        let seeds: Vec<<ChaCha20Rng as SeedableRng>::Seed> =
            (0..lwe_secret_key.dimension()).map(|_| rng.gen()).collect();

        let key: Vec<(NttRgsw, NttRgsw)> = seeds
            .into_par_iter()
            .zip(lwe_secret_key.as_slice().par_iter())
            .map(|(seed, &s)| {
                let mut csrng = ChaCha20Rng::from_seed(seed);
                let (plus, minus) = match s {
                    1 => (1, 0),
                    -1 => (0, 1),
                    _ => (0, 0),
                };
                let mut generate = |coeff| {
                    NttRgsw::generate_monomial(
                        &ring_secret,
                        coeff,
                        0,
                        gadget_basis,
                        gaussian,
                        ntt_table,
                        &mut csrng,
                    )
                };
                let plus = generate(plus);
                let minus = generate(minus);
                (plus, minus)
            })
            .collect();

        debug!(
            lwe_dimension = lwe_secret_key.dimension(),
            elapsed = ?start.elapsed(),
            "generated GINX blind rotation key"
        );

        Self {
            key,
            space: Pool::new(),
        }
    }

    /// Checks every ring-GSW pair against the ring dimension and gadget of `params`.
    pub fn check_shape(&self, params: &RingGswParameters) -> Result<(), FHECoreError> {
        let dimension = params.dimension();
        let digit_count = params.gadget_basis().digit_count();
        match self.key.iter().position(|(plus, minus)| {
            !plus.has_shape(dimension, digit_count) || !minus.has_shape(dimension, digit_count)
        }) {
            Some(index) => Err(FHECoreError::KeyEntryShapeMismatch {
                name: "GINX blind rotation key",
                index,
                dimension,
                digit_count,
            }),
            None => Ok(()),
        }
    }
}

impl BlindRotate for GinxBlindRotationKey {
    #[inline]
    fn method(&self) -> BootstrapMethod {
        BootstrapMethod::Ginx
    }

    #[inline]
    fn lwe_dimension(&self) -> usize {
        self.key.len()
    }

    #[inline]
    fn ring_dimension(&self) -> usize {
        self.key.first().map_or(0, |(plus, _)| plus.dimension())
    }

    #[inline]
    fn gadget_digit_count(&self) -> usize {
        self.key.first().map_or(0, |(plus, _)| plus.digit_count())
    }

    fn blind_rotate(&self, acc: Rlwe, a: &[u64], params: &RingGswParameters) -> Rlwe {
        debug_assert_eq!(a.len(), self.key.len());

        let ntt_table = params.ntt_table();
        let modulus = params.modulus();
        let gadget_basis = params.gadget_basis();
        let dimension = params.dimension();
        let factor = params.rotation_factor();
        let q = params.lwe_modulus().value();

        let mut space = self
            .space
            .get_or_else(|| BlindRotateSpace::new(dimension, gadget_basis.digit_count()));

        let result = self
            .key
            .iter()
            .zip(a)
            .fold(acc, |mut acc, ((plus_key, minus_key), &a_i)| {
                let a_i = a_i % q;
                if a_i == 0 {
                    return acc;
                }
                let alpha = a_i as usize * factor;

                acc.decompose_ntt(gadget_basis, ntt_table, &mut space.decompose_space);
                let digits = space.decompose_space.ntt_digits();

                // plus = ACC * RGSW(s_i == 1)
                plus_key.mul_decomposed(digits, modulus, &mut space.plus);
                // minus = ACC * RGSW(s_i == -1) * X^{alpha}
                minus_key.mul_decomposed(digits, modulus, &mut space.minus);
                ntt_table.transform_monomial(1, alpha, space.monomial.as_mut_slice());
                space
                    .minus
                    .mul_ntt_polynomial_assign(&space.monomial, modulus);

                // delta = (plus - minus) * (X^{-alpha} - 1)
                space.plus.sub_assign_element_wise(&space.minus, modulus);
                let mut delta = space.plus.to_rlwe(ntt_table);
                delta.mul_monomial_sub_one_inplace((dimension << 1) - alpha, modulus);

                acc.add_assign_element_wise(&delta, modulus);
                acc
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
    fn test_ginx_blind_rotation() {
        check_blind_rotation(BootstrapMethod::Ginx);
    }

    #[test]
    fn test_ginx_check_shape() {
        let mut rng = rand::thread_rng();
        let (lwe, params) = small_params(BootstrapMethod::Ginx);
        let lwe_sk = LweSecretKey::generate(lwe.dimension(), &mut rng);
        let ring_sk = LweSecretKey::generate(params.dimension(), &mut rng);
        let key = GinxBlindRotationKey::generate(&lwe_sk, &ring_sk, &params, &mut rng);
        assert_eq!(key.check_shape(&params), Ok(()));

        let mut mixed = key.clone();
        let ring_modulus = algebra::arith::ntt_prime(27, 256).unwrap();
        let wider =
            RingGswParameters::new(&lwe, 128, ring_modulus, 1 << 9, 8, BootstrapMethod::Ginx)
                .unwrap();
        let wider_sk = LweSecretKey::generate(wider.dimension(), &mut rng);
        let other = GinxBlindRotationKey::generate(&lwe_sk, &wider_sk, &wider, &mut rng);
        mixed.key[3].1 = other.key[3].1.clone();
        assert_eq!(
            mixed.check_shape(&params),
            Err(FHECoreError::KeyEntryShapeMismatch {
                name: "GINX blind rotation key",
                index: 3,
                dimension: params.dimension(),
                digit_count: params.gadget_basis().digit_count(),
            })
        );
    }
}
