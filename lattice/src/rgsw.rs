use algebra::{
    decompose::SignedBasis, random::DiscreteGaussian, BarrettModulus, NttPolynomial, NttTable,
    NumberTheoryTransform,
};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::{NttGadgetRlwe, NttRlwe};

/// Represents a ciphertext in the Ring-GSW homomorphic encryption scheme, kept in NTT form.
///
/// For message `μ` and gadget powers `g_l`:
/// * `minus_s_m[l]` has phase `-g_l * μ * z + e`, realised as `(a + g_l*μ, a*z + e)`;
/// * `m[l]` has phase `g_l * μ + e`, realised as `(a, a*z + e + g_l*μ)`.
///
/// Multiplying an [`crate::Rlwe`] of phase `φ` by this ciphertext yields phase `μ * φ` plus
/// a noise bounded by the decomposition basis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NttRgsw {
    /// The rows scaled by `-z`.
    minus_s_m: NttGadgetRlwe,
    /// The rows scaled by `1`.
    m: NttGadgetRlwe,
}

impl NttRgsw {
    /// Creates a new [`NttRgsw`].
    #[inline]
    pub fn new(minus_s_m: NttGadgetRlwe, m: NttGadgetRlwe) -> Self {
        debug_assert_eq!(minus_s_m.len(), m.len());
        Self { minus_s_m, m }
    }

    /// Returns a reference to the `minus_s_m` of this [`NttRgsw`].
    #[inline]
    pub fn minus_s_m(&self) -> &NttGadgetRlwe {
        &self.minus_s_m
    }

    /// Returns a reference to the `m` of this [`NttRgsw`].
    #[inline]
    pub fn m(&self) -> &NttGadgetRlwe {
        &self.m
    }

    /// Returns the digit count of this [`NttRgsw`].
    #[inline]
    pub fn digit_count(&self) -> usize {
        self.m.len()
    }

    /// Returns the polynomial dimension of this [`NttRgsw`].
    #[inline]
    pub fn dimension(&self) -> usize {
        self.m
            .data()
            .first()
            .map_or(0, |row| row.a().coeff_count())
    }

    /// Returns true if both halves have `digit_count` rows of dimension `dimension`.
    #[inline]
    pub fn has_shape(&self, dimension: usize, digit_count: usize) -> bool {
        self.minus_s_m.has_shape(dimension, digit_count) && self.m.has_shape(dimension, digit_count)
    }

    /// Encrypts the monomial `coeff * X^degree`, `degree < 2N`.
    ///
    /// `coeff == 0` produces an encryption of zero.
    pub fn generate_monomial<R>(
        secret: &NttPolynomial,
        coeff: u64,
        degree: usize,
        basis: &SignedBasis,
        gaussian: &DiscreteGaussian,
        table: &NttTable,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let modulus = table.modulus();

        let message = if coeff == 0 {
            None
        } else {
            let mut values = vec![0; table.dimension()];
            table.transform_monomial(coeff, degree, &mut values);
            Some(NttPolynomial::new(values))
        };

        let minus_s_m = NttGadgetRlwe::generate_with(
            secret,
            message.as_ref(),
            basis,
            gaussian,
            table,
            rng,
            |row, scaled| row.a_mut().add_assign_reduce(scaled, modulus),
        );
        let m = NttGadgetRlwe::generate_with(
            secret,
            message.as_ref(),
            basis,
            gaussian,
            table,
            rng,
            |row, scaled| row.b_mut().add_assign_reduce(scaled, modulus),
        );

        Self { minus_s_m, m }
    }

    /// Accumulates `Σ_l A_l * minus_s_m[l] + B_l * m[l]` into `destination`,
    /// where `digits = [A_0, .., A_{d-1}, B_0, .., B_{d-1}]` are NTT form digits.
    pub fn mul_decomposed(
        &self,
        digits: &[NttPolynomial],
        modulus: BarrettModulus,
        destination: &mut NttRlwe,
    ) {
        debug_assert_eq!(digits.len(), self.digit_count() << 1);
        destination.set_zero();

        let rows = self.minus_s_m.iter().chain(self.m.iter());
        for (digit, row) in digits.iter().zip(rows) {
            destination
                .a_mut()
                .add_mul_assign_reduce(digit, row.a(), modulus);
            destination
                .b_mut()
                .add_mul_assign_reduce(digit, row.b(), modulus);
        }
    }
}

#[cfg(test)]
mod tests {
    use algebra::{
        arith::ntt_prime, random::sample_ternary_values, Polynomial, RingReduce,
    };
    use rand::thread_rng;

    use crate::{DecomposeSpace, Rlwe};

    use super::*;

    #[test]
    fn test_external_product_rotates_phase() {
        let mut rng = thread_rng();
        let n = 64;
        let q = ntt_prime(27, 2 * n as u64).unwrap();
        let modulus = BarrettModulus::new(q).unwrap();
        let table = NttTable::new(modulus, 6).unwrap();
        let basis = SignedBasis::new(modulus, 1 << 9).unwrap();
        let gaussian = DiscreteGaussian::new(3.19).unwrap();

        let sk = sample_ternary_values(n, &mut rng);
        let sk_ntt = table.transform(&Polynomial::from_signed(&sk, modulus));

        // rlwe with phase ≈ q/8 * X^0
        let mut rlwe = NttRlwe::generate_random_zero_sample(&sk_ntt, &gaussian, &table, &mut rng)
            .to_rlwe(&table);
        rlwe.b_mut()[0] = modulus.reduce_add(rlwe.b()[0], q / 8);

        let mut space = DecomposeSpace::new(n, basis.digit_count());

        for degree in [0usize, 3, 64, 100] {
            let rgsw = NttRgsw::generate_monomial(
                &sk_ntt, 1, degree, &basis, &gaussian, &table, &mut rng,
            );
            let product: Rlwe = rlwe.mul_ntt_rgsw(&rgsw, &basis, &table, &mut space);
            let phase = product.phase(&sk_ntt, &table);

            let (index, expected) = if degree < n {
                (degree, q / 8)
            } else {
                (degree - n, q - q / 8)
            };
            for (i, &c) in phase.iter().enumerate() {
                let target = if i == index { expected } else { 0 };
                let err = modulus.centered(modulus.reduce_sub(c, target));
                assert!(err.abs() < (q / 64) as i64, "degree {degree}, index {i}: {err}");
            }
        }

        let zero = NttRgsw::generate_monomial(&sk_ntt, 0, 0, &basis, &gaussian, &table, &mut rng);
        let product = rlwe.mul_ntt_rgsw(&zero, &basis, &table, &mut space);
        let phase = product.phase(&sk_ntt, &table);
        assert!(phase
            .iter()
            .all(|&c| modulus.centered(c).abs() < (q / 64) as i64));
    }

    #[test]
    fn test_shape() {
        let mut rng = thread_rng();
        let n = 32;
        let q = ntt_prime(27, 2 * n as u64).unwrap();
        let modulus = BarrettModulus::new(q).unwrap();
        let table = NttTable::new(modulus, 5).unwrap();
        let basis = SignedBasis::new(modulus, 1 << 9).unwrap();
        let gaussian = DiscreteGaussian::new(3.19).unwrap();
        let sk = sample_ternary_values(n, &mut rng);
        let sk_ntt = table.transform(&Polynomial::from_signed(&sk, modulus));

        let rgsw = NttRgsw::generate_monomial(&sk_ntt, 1, 5, &basis, &gaussian, &table, &mut rng);
        let digits = basis.digit_count();
        assert!(rgsw.has_shape(n, digits));
        assert!(!rgsw.has_shape(2 * n, digits));
        assert!(!rgsw.has_shape(n, digits + 1));

        let truncate = |gadget: &NttGadgetRlwe| {
            let mut rows = gadget.data().to_vec();
            rows.pop();
            NttGadgetRlwe::new(rows)
        };
        let short = NttRgsw::new(truncate(rgsw.minus_s_m()), truncate(rgsw.m()));
        assert!(!short.has_shape(n, digits));

        let mut rows = rgsw.m().data().to_vec();
        rows[0] = NttRlwe::zero(n / 2);
        let narrow = NttRgsw::new(rgsw.minus_s_m().clone(), NttGadgetRlwe::new(rows));
        assert!(!narrow.has_shape(n, digits));
    }
}
