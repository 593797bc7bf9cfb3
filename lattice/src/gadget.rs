use algebra::{decompose::SignedBasis, random::DiscreteGaussian, NttPolynomial, NttTable};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::NttRlwe;

/// A vector of [`NttRlwe`], one row per gadget power `basis^l`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NttGadgetRlwe {
    data: Vec<NttRlwe>,
}

impl NttGadgetRlwe {
    /// Creates a new [`NttGadgetRlwe`].
    #[inline]
    pub fn new(data: Vec<NttRlwe>) -> Self {
        Self { data }
    }

    /// Returns a reference to the rows of this [`NttGadgetRlwe`].
    #[inline]
    pub fn data(&self) -> &[NttRlwe] {
        &self.data
    }

    /// Returns an iterator over the rows of this [`NttGadgetRlwe`].
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, NttRlwe> {
        self.data.iter()
    }

    /// Returns the row count of this [`NttGadgetRlwe`].
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this [`NttGadgetRlwe`] has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if there are `digit_count` rows whose polynomials all have `dimension` coefficients.
    #[inline]
    pub fn has_shape(&self, dimension: usize, digit_count: usize) -> bool {
        self.data.len() == digit_count
            && self
                .data
                .iter()
                .all(|row| row.a().coeff_count() == dimension && row.b().coeff_count() == dimension)
    }

    /// Generates rows of encryptions of zero, then lets `place` add
    /// `basis^l * message` onto row `l`.
    pub(crate) fn generate_with<R, P>(
        secret: &NttPolynomial,
        message: Option<&NttPolynomial>,
        basis: &SignedBasis,
        gaussian: &DiscreteGaussian,
        table: &NttTable,
        rng: &mut R,
        mut place: P,
    ) -> Self
    where
        R: Rng + CryptoRng,
        P: FnMut(&mut NttRlwe, &NttPolynomial),
    {
        let modulus = table.modulus();
        let data = basis
            .powers()
            .iter()
            .map(|&power| {
                let mut row = NttRlwe::generate_random_zero_sample(secret, gaussian, table, rng);
                if let Some(message) = message {
                    let mut scaled = message.clone();
                    scaled.mul_scalar_assign_reduce(power, modulus);
                    place(&mut row, &scaled);
                }
                row
            })
            .collect();
        Self { data }
    }
}
