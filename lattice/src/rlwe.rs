use algebra::{
    decompose::SignedBasis, random::DiscreteGaussian, BarrettModulus, NttPolynomial, NttTable,
    NumberTheoryTransform, Polynomial, RingReduce,
};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::{Lwe, NttRgsw};

/// A cryptographic structure for Ring Learning with Errors (RLWE) in coefficient form.
///
/// The phase under the ring secret `z` is `b(X) - a(X) * z(X)` in `Z_Q[X]/(X^N+1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rlwe {
    a: Polynomial,
    b: Polynomial,
}

impl Rlwe {
    /// Creates a new [`Rlwe`].
    #[inline]
    pub fn new(a: Polynomial, b: Polynomial) -> Self {
        debug_assert_eq!(a.coeff_count(), b.coeff_count());
        Self { a, b }
    }

    /// Creates a zero [`Rlwe`].
    #[inline]
    pub fn zero(dimension: usize) -> Self {
        Self {
            a: Polynomial::zero(dimension),
            b: Polynomial::zero(dimension),
        }
    }

    /// Returns a reference to the `a` of this [`Rlwe`].
    #[inline]
    pub fn a(&self) -> &Polynomial {
        &self.a
    }

    /// Returns a reference to the `b` of this [`Rlwe`].
    #[inline]
    pub fn b(&self) -> &Polynomial {
        &self.b
    }

    /// Returns a mutable reference to the `a` of this [`Rlwe`].
    #[inline]
    pub fn a_mut(&mut self) -> &mut Polynomial {
        &mut self.a
    }

    /// Returns a mutable reference to the `b` of this [`Rlwe`].
    #[inline]
    pub fn b_mut(&mut self) -> &mut Polynomial {
        &mut self.b
    }

    /// Returns the polynomial dimension of this [`Rlwe`].
    #[inline]
    pub fn dimension(&self) -> usize {
        self.a.coeff_count()
    }

    /// Performs `self = self + rhs`.
    #[inline]
    pub fn add_assign_element_wise<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        self.a.add_assign_reduce(&rhs.a, modulus);
        self.b.add_assign_reduce(&rhs.b, modulus);
    }

    /// Performs `self = self - rhs`.
    #[inline]
    pub fn sub_assign_element_wise<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        self.a.sub_assign_reduce(&rhs.a, modulus);
        self.b.sub_assign_reduce(&rhs.b, modulus);
    }

    /// Performs `self = self * X^degree`, `degree < 2N`.
    #[inline]
    pub fn mul_monomial_inplace<M: RingReduce>(&mut self, degree: usize, modulus: M) {
        self.a.mul_monomial_inplace(degree, modulus);
        self.b.mul_monomial_inplace(degree, modulus);
    }

    /// Performs `self = self * (X^degree - 1)`, `degree < 2N`.
    #[inline]
    pub fn mul_monomial_sub_one_inplace<M: RingReduce>(&mut self, degree: usize, modulus: M) {
        let original = self.clone();
        self.mul_monomial_inplace(degree, modulus);
        self.sub_assign_element_wise(&original, modulus);
    }

    /// Extracts the constant coefficient as a [`Lwe`] under the secret vector
    /// formed by the coefficients of `z`.
    ///
    /// `a'_0 = a_0`, `a'_k = -a_{N-k}`, `b' = b_0`.
    pub fn extract_lwe<M: RingReduce>(&self, modulus: M) -> Lwe {
        let n = self.dimension();
        let a = self.a.as_slice();
        let mut extracted = Vec::with_capacity(n);
        extracted.push(a[0]);
        extracted.extend(a[1..].iter().rev().map(|&v| modulus.reduce_neg(v)));
        Lwe::new(extracted, self.b[0])
    }

    /// Converts this [`Rlwe`] into NTT form.
    #[inline]
    pub fn to_ntt_rlwe(&self, table: &NttTable) -> NttRlwe {
        NttRlwe::new(table.transform(&self.a), table.transform(&self.b))
    }

    /// Returns the phase `b - a * z` for the secret `z` given in NTT form.
    pub fn phase(&self, secret: &NttPolynomial, table: &NttTable) -> Polynomial {
        let modulus = table.modulus();
        let mut a = table.transform(&self.a);
        a.mul_assign_reduce(secret, modulus);
        let mut phase = self.b.clone();
        phase.sub_assign_reduce(&table.inverse_transform_inplace(a), modulus);
        phase
    }

    /// Decomposes `a` and `b` with `basis` and transforms every digit into NTT form.
    ///
    /// The digits of `a` are stored first, then the digits of `b`.
    pub fn decompose_ntt(&self, basis: &SignedBasis, table: &NttTable, space: &mut DecomposeSpace) {
        let modulus = table.modulus();
        let digit_count = basis.digit_count();
        let (digits_a, digits_b) = space.ntt_digits.split_at_mut(digit_count);

        for (poly, ntt_digits) in [(&self.a, digits_a), (&self.b, digits_b)] {
            basis.decompose_poly(poly, modulus, &mut space.digits);
            for (digit, ntt_digit) in space.digits.iter().zip(ntt_digits.iter_mut()) {
                ntt_digit.as_mut_slice().copy_from_slice(digit.as_slice());
                table.transform_slice(ntt_digit.as_mut_slice());
            }
        }
    }

    /// Performs the external product `self ⊡ rgsw`, returning the result in coefficient form.
    pub fn mul_ntt_rgsw(
        &self,
        rgsw: &NttRgsw,
        basis: &SignedBasis,
        table: &NttTable,
        space: &mut DecomposeSpace,
    ) -> Rlwe {
        self.decompose_ntt(basis, table, space);
        let mut product = NttRlwe::zero(self.dimension());
        rgsw.mul_decomposed(space.ntt_digits(), table.modulus(), &mut product);
        product.to_rlwe(table)
    }
}

/// Scratch space reused by gadget decompositions of [`Rlwe`] ciphertexts.
#[derive(Debug, Clone)]
pub struct DecomposeSpace {
    digits: Vec<Polynomial>,
    ntt_digits: Vec<NttPolynomial>,
}

impl DecomposeSpace {
    /// Creates a new [`DecomposeSpace`] for `digit_count` digits of dimension `dimension`.
    #[inline]
    pub fn new(dimension: usize, digit_count: usize) -> Self {
        Self {
            digits: vec![Polynomial::zero(dimension); digit_count],
            ntt_digits: vec![NttPolynomial::zero(dimension); digit_count << 1],
        }
    }

    /// Returns the NTT digits of the last decomposition.
    #[inline]
    pub fn ntt_digits(&self) -> &[NttPolynomial] {
        &self.ntt_digits
    }
}

/// A cryptographic structure for Ring Learning with Errors (RLWE) in NTT form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NttRlwe {
    a: NttPolynomial,
    b: NttPolynomial,
}

impl NttRlwe {
    /// Creates a new [`NttRlwe`].
    #[inline]
    pub fn new(a: NttPolynomial, b: NttPolynomial) -> Self {
        debug_assert_eq!(a.coeff_count(), b.coeff_count());
        Self { a, b }
    }

    /// Creates a zero [`NttRlwe`].
    #[inline]
    pub fn zero(dimension: usize) -> Self {
        Self {
            a: NttPolynomial::zero(dimension),
            b: NttPolynomial::zero(dimension),
        }
    }

    /// Returns a reference to the `a` of this [`NttRlwe`].
    #[inline]
    pub fn a(&self) -> &NttPolynomial {
        &self.a
    }

    /// Returns a reference to the `b` of this [`NttRlwe`].
    #[inline]
    pub fn b(&self) -> &NttPolynomial {
        &self.b
    }

    /// Returns a mutable reference to the `a` of this [`NttRlwe`].
    #[inline]
    pub fn a_mut(&mut self) -> &mut NttPolynomial {
        &mut self.a
    }

    /// Returns a mutable reference to the `b` of this [`NttRlwe`].
    #[inline]
    pub fn b_mut(&mut self) -> &mut NttPolynomial {
        &mut self.b
    }

    /// Sets both parts to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.a.set_zero();
        self.b.set_zero();
    }

    /// Performs `self = self + rhs`.
    #[inline]
    pub fn add_assign_element_wise<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        self.a.add_assign_reduce(&rhs.a, modulus);
        self.b.add_assign_reduce(&rhs.b, modulus);
    }

    /// Performs `self = self - rhs`.
    #[inline]
    pub fn sub_assign_element_wise<M: RingReduce>(&mut self, rhs: &Self, modulus: M) {
        self.a.sub_assign_reduce(&rhs.a, modulus);
        self.b.sub_assign_reduce(&rhs.b, modulus);
    }

    /// Multiplies both parts by the ntt polynomial `poly`.
    #[inline]
    pub fn mul_ntt_polynomial_assign<M: RingReduce>(&mut self, poly: &NttPolynomial, modulus: M) {
        self.a.mul_assign_reduce(poly, modulus);
        self.b.mul_assign_reduce(poly, modulus);
    }

    /// Converts this [`NttRlwe`] back into coefficient form.
    #[inline]
    pub fn to_rlwe(&self, table: &NttTable) -> Rlwe {
        Rlwe::new(
            table.inverse_transform(&self.a),
            table.inverse_transform(&self.b),
        )
    }

    /// Generates an encryption of zero `(a, a*z + e)` under the NTT form secret `z`.
    pub fn generate_random_zero_sample<R>(
        secret: &NttPolynomial,
        gaussian: &DiscreteGaussian,
        table: &NttTable,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let modulus: BarrettModulus = table.modulus();
        let dimension = table.dimension();

        let a = NttPolynomial::random_uniform(dimension, modulus.value(), rng);
        let mut b = table.transform_inplace(Polynomial::random_gaussian(
            dimension, gaussian, modulus, rng,
        ));
        b.add_mul_assign_reduce(&a, secret, modulus);

        Self { a, b }
    }
}

#[cfg(test)]
mod tests {
    use algebra::{arith::ntt_prime, random::sample_ternary_values};
    use rand::thread_rng;

    use super::*;

    #[test]
    fn test_extract_lwe() {
        let mut rng = thread_rng();
        let n = 32;
        let q = ntt_prime(27, 2 * n as u64).unwrap();
        let modulus = BarrettModulus::new(q).unwrap();
        let table = NttTable::new(modulus, 5).unwrap();

        let sk = sample_ternary_values(n, &mut rng);
        let sk_poly = Polynomial::from_signed(&sk, modulus);
        let sk_ntt = table.transform(&sk_poly);

        let gaussian = DiscreteGaussian::new(3.19).unwrap();
        let mut rlwe = NttRlwe::generate_random_zero_sample(&sk_ntt, &gaussian, &table, &mut rng)
            .to_rlwe(&table);
        rlwe.b_mut()[0] = modulus.reduce_add(rlwe.b()[0], q / 4);

        let phase = rlwe.phase(&sk_ntt, &table);
        let lwe = rlwe.extract_lwe(modulus);
        assert_eq!(lwe.phase(sk_poly.as_slice(), modulus), phase[0]);
        assert!(modulus.centered(modulus.reduce_sub(phase[0], q / 4)).abs() <= 20);
    }
}
