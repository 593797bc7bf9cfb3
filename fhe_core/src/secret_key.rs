use algebra::{
    random::{sample_ternary_values, sample_uniform_values, DiscreteGaussian},
    NttPolynomial, NttTable, NumberTheoryTransform, Polynomial, RingReduce,
};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::LweCiphertext;

/// A ternary LWE secret key, each coordinate in `{-1, 0, 1}`.
///
/// The same type serves as the `n` dimensional key of user ciphertexts and as
/// the `N` dimensional key whose coefficients form the ring secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweSecretKey {
    data: Vec<i8>,
}

impl LweSecretKey {
    /// Creates a new [`LweSecretKey`] from raw coordinates.
    #[inline]
    pub fn new(data: Vec<i8>) -> Self {
        debug_assert!(data.iter().all(|v| (-1..=1).contains(v)));
        Self { data }
    }

    /// Samples a uniform ternary key of the given dimension.
    #[inline]
    pub fn generate<R>(dimension: usize, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        Self {
            data: sample_ternary_values(dimension, rng),
        }
    }

    /// Returns the dimension of this [`LweSecretKey`].
    #[inline]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Returns the coordinates of this [`LweSecretKey`].
    #[inline]
    pub fn as_slice(&self) -> &[i8] {
        &self.data
    }

    /// Lifts the coordinates into `[0, modulus)`.
    #[inline]
    pub fn lifted<M: RingReduce>(&self, modulus: M) -> Vec<u64> {
        self.data
            .iter()
            .map(|&v| modulus.reduce_i64(v as i64))
            .collect()
    }

    /// Returns the ring secret `z(X) = Σ s_i X^i` in NTT form.
    #[inline]
    pub fn to_ntt(&self, table: &NttTable) -> NttPolynomial {
        table.transform_inplace(Polynomial::from_signed(&self.data, table.modulus()))
    }

    /// Encrypts the already scaled value `scaled` as `(a, <a, s> + scaled + e)`.
    pub fn encrypt<M, R>(
        &self,
        scaled: u64,
        modulus: M,
        gaussian: &DiscreteGaussian,
        rng: &mut R,
    ) -> LweCiphertext
    where
        M: RingReduce,
        R: Rng + CryptoRng,
    {
        let a = sample_uniform_values(modulus.modulus_value(), self.dimension(), rng);

        let b = self.data.iter().zip(a.iter()).fold(
            modulus.reduce_add(scaled, gaussian.sample_reduce(modulus, rng)),
            |acc, (&s, &a)| match s {
                1 => modulus.reduce_add(acc, a),
                -1 => modulus.reduce_sub(acc, a),
                _ => acc,
            },
        );

        LweCiphertext::new(a, b)
    }

    /// Returns the phase `b - <a, s>` of `cipher_text`.
    #[inline]
    pub fn phase<M: RingReduce>(&self, cipher_text: &LweCiphertext, modulus: M) -> u64 {
        debug_assert_eq!(cipher_text.dimension(), self.dimension());
        self.data
            .iter()
            .zip(cipher_text.a())
            .fold(cipher_text.b(), |acc, (&s, &a)| match s {
                1 => modulus.reduce_sub(acc, a),
                -1 => modulus.reduce_add(acc, a),
                _ => acc,
            })
    }
}
