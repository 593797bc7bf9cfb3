mod ap;
mod ginx;

pub use ap::ApBlindRotationKey;
pub use ginx::GinxBlindRotationKey;

use lattice::Rlwe;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::{FHECoreError, LweSecretKey, RingGswParameters};

/// The blind rotation algorithm used by bootstrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootstrapMethod {
    /// Alperin-Sheriff and Peikert, the FHEW accumulator.
    Ap,
    /// Gama, Izabachene, Nguyen and Xie, the TFHE accumulator.
    #[default]
    Ginx,
}

/// Rotates an accumulator by the inner product of an LWE mask with the secret key.
pub trait BlindRotate {
    /// Returns the bootstrapping method of this key.
    fn method(&self) -> BootstrapMethod;

    /// Returns the LWE dimension **n** this key was generated for.
    fn lwe_dimension(&self) -> usize;

    /// Returns the ring dimension **N** of the ring-GSW ciphertexts.
    fn ring_dimension(&self) -> usize;

    /// Returns the gadget digit count of the ring-GSW ciphertexts.
    fn gadget_digit_count(&self) -> usize;

    /// Returns `acc * X^{-<a, s> * 2N/q}`, every `a_i` in `[0, q)`.
    fn blind_rotate(&self, acc: Rlwe, a: &[u64], params: &RingGswParameters) -> Rlwe;
}

/// Blind rotation key.
///
/// In FHE, bootstrapping is a technique used to refresh the ciphertexts
/// during the homomorphic computation. The blind rotation key holds
/// ring-GSW encryptions of the LWE secret key under the ring secret, so the
/// rotation by `-<a, s>` can be performed homomorphically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BlindRotationKey {
    /// FHEW accumulator key.
    Ap(ApBlindRotationKey),
    /// TFHE accumulator key.
    Ginx(GinxBlindRotationKey),
}

impl BlindRotationKey {
    /// Generates the [`BlindRotationKey`] for the method selected by `params`.
    pub fn generate<R>(
        lwe_secret_key: &LweSecretKey,
        ring_secret_key: &LweSecretKey,
        params: &RingGswParameters,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        match params.method() {
            BootstrapMethod::Ap => BlindRotationKey::Ap(ApBlindRotationKey::generate(
                lwe_secret_key,
                ring_secret_key,
                params,
                rng,
            )),
            BootstrapMethod::Ginx => BlindRotationKey::Ginx(GinxBlindRotationKey::generate(
                lwe_secret_key,
                ring_secret_key,
                params,
                rng,
            )),
        }
    }

    /// Checks that every entry has the ring dimension and gadget digit count of
    /// `params`, and that the table size matches the key's own header.
    pub fn check_shape(&self, params: &RingGswParameters) -> Result<(), FHECoreError> {
        match self {
            BlindRotationKey::Ap(key) => key.check_shape(params),
            BlindRotationKey::Ginx(key) => key.check_shape(params),
        }
    }
}

impl BlindRotate for BlindRotationKey {
    #[inline]
    fn method(&self) -> BootstrapMethod {
        match self {
            BlindRotationKey::Ap(key) => key.method(),
            BlindRotationKey::Ginx(key) => key.method(),
        }
    }

    #[inline]
    fn lwe_dimension(&self) -> usize {
        match self {
            BlindRotationKey::Ap(key) => key.lwe_dimension(),
            BlindRotationKey::Ginx(key) => key.lwe_dimension(),
        }
    }

    #[inline]
    fn ring_dimension(&self) -> usize {
        match self {
            BlindRotationKey::Ap(key) => key.ring_dimension(),
            BlindRotationKey::Ginx(key) => key.ring_dimension(),
        }
    }

    #[inline]
    fn gadget_digit_count(&self) -> usize {
        match self {
            BlindRotationKey::Ap(key) => key.gadget_digit_count(),
            BlindRotationKey::Ginx(key) => key.gadget_digit_count(),
        }
    }

    #[inline]
    fn blind_rotate(&self, acc: Rlwe, a: &[u64], params: &RingGswParameters) -> Rlwe {
        match self {
            BlindRotationKey::Ap(key) => key.blind_rotate(acc, a, params),
            BlindRotationKey::Ginx(key) => key.blind_rotate(acc, a, params),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use algebra::{arith::ntt_prime, random::DiscreteGaussian, RingReduce};
    use rand::thread_rng;

    use crate::{extract_accumulator, init_accumulator, LweParameters};

    use super::*;

    /// Small parameters: `N = 64`, `q = 128`, `n = 16`.
    pub(crate) fn small_params(method: BootstrapMethod) -> (LweParameters, RingGswParameters) {
        let lwe = LweParameters::new(16, 128, 1 << 14, 1 << 5, 3.19).unwrap();
        let ring_modulus = ntt_prime(27, 128).unwrap();
        let ring = RingGswParameters::new(&lwe, 64, ring_modulus, 1 << 9, 8, method).unwrap();
        (lwe, ring)
    }

    pub(crate) fn check_blind_rotation(method: BootstrapMethod) {
        let mut rng = thread_rng();
        let (lwe, params) = small_params(method);
        let q = lwe.cipher_modulus();
        let big_q = params.modulus_value();
        let ring_modulus = params.modulus();

        let lwe_sk = LweSecretKey::generate(lwe.dimension(), &mut rng);
        let ring_sk = LweSecretKey::generate(params.dimension(), &mut rng);
        let key = BlindRotationKey::generate(&lwe_sk, &ring_sk, &params, &mut rng);
        assert_eq!(key.method(), method);
        assert_eq!(key.lwe_dimension(), lwe.dimension());
        assert_eq!(key.ring_dimension(), params.dimension());
        assert_eq!(key.gadget_digit_count(), params.gadget_basis().digit_count());

        let ring_secret = ring_sk.lifted(ring_modulus);
        let threshold = 5 * q.value() / 8;
        let noiseless = DiscreteGaussian::new(0.0).unwrap();

        for b in [0u64, 16, 32, 48, 64, 80, 96, 112] {
            let c = lwe_sk.encrypt(b, q, &noiseless, &mut rng);
            let phase = lwe_sk.phase(&c, q);
            assert_eq!(phase, b);

            let acc = init_accumulator(c.b(), threshold, &params);
            let acc = key.blind_rotate(acc, c.a(), &params);
            let out = extract_accumulator(&acc, &params);

            let expected = if q.reduce_sub(phase, threshold) < q.value() >> 1 {
                0
            } else {
                big_q / 4
            };
            let err = ring_modulus.centered(
                ring_modulus.reduce_sub(out.phase(&ring_secret, ring_modulus), expected),
            );
            assert!(err.abs() < (big_q / 16) as i64, "{method:?} b {b}: {err}");
        }
    }
}
