//! The parameters of the boolean fully homomorphic encryption scheme.

use fhe_core::{BootstrapMethod, LweParameters, RingGswParameters};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::FHEError;

mod constants;

pub use constants::BinFheParamSet;


/// The raw numbers of a parameter set.
///
/// This type is used for the catalog and for manual configuration,
/// [`BinFheParams::new`] checks it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstParameters {
    /// **LWE** vector dimension, refers to **n** in the paper.
    pub lwe_dimension: usize,
    /// **Ring** polynomial dimension, refers to **N** in the paper.
    pub ring_dimension: usize,
    /// **LWE** cipher modulus, refers to **q** in the paper.
    pub lwe_modulus: u64,
    /// **Ring** polynomial modulus, refers to **Q** in the paper.
    pub ring_modulus: u64,
    /// Modulus of the key switching, refers to **qKS**.
    pub key_switching_modulus: u64,
    /// The noise error's standard deviation.
    pub noise_standard_deviation: f64,
    /// Decompose basis for **qKS** used for key switching.
    pub key_switching_basis: u64,
    /// Decompose basis for **Q** used for the blind rotation accumulator.
    pub gadget_basis: u64,
    /// Decompose basis for **q** used by AP blind rotation keys.
    pub refresh_basis: u64,
}

/// Checked parameters of the boolean fully homomorphic encryption scheme.
///
/// Every derived value is computed once here. The type is immutable and cheap to clone,
/// the NTT table is shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ParamsRecord", into = "ParamsRecord")]
pub struct BinFheParams {
    raw: ConstParameters,
    lwe: LweParameters,
    ring: RingGswParameters,
}

/// The persisted form of [`BinFheParams`]: the raw numbers and the method.
#[derive(Serialize, Deserialize)]
pub(crate) struct ParamsRecord {
    pub(crate) parameters: ConstParameters,
    pub(crate) method: BootstrapMethod,
}

impl TryFrom<ParamsRecord> for BinFheParams {
    type Error = FHEError;

    #[inline]
    fn try_from(record: ParamsRecord) -> Result<Self, Self::Error> {
        Self::new(record.parameters, record.method)
    }
}

impl From<BinFheParams> for ParamsRecord {
    #[inline]
    fn from(params: BinFheParams) -> Self {
        Self {
            parameters: params.raw,
            method: params.method(),
        }
    }
}

impl PartialEq for BinFheParams {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.method() == other.method()
    }
}

impl BinFheParams {
    /// Creates a new [`BinFheParams`] after checking every value.
    pub fn new(raw: ConstParameters, method: BootstrapMethod) -> Result<Self, FHEError> {
        let lwe = LweParameters::new(
            raw.lwe_dimension,
            raw.lwe_modulus,
            raw.key_switching_modulus,
            raw.key_switching_basis,
            raw.noise_standard_deviation,
        )?;
        let ring = RingGswParameters::new(
            &lwe,
            raw.ring_dimension,
            raw.ring_modulus,
            raw.gadget_basis,
            raw.refresh_basis,
            method,
        )?;

        debug!(
            n = raw.lwe_dimension,
            N = raw.ring_dimension,
            q = raw.lwe_modulus,
            Q = raw.ring_modulus,
            qks = raw.key_switching_modulus,
            gadget_digits = ring.gadget_basis().digit_count(),
            key_switching_digits = lwe.key_switching_basis().digit_count(),
            refresh_digits = ring.refresh_basis().digit_count(),
            ?method,
            "parameters checked"
        );

        Ok(Self { raw, lwe, ring })
    }

    /// Returns the raw numbers of this [`BinFheParams`].
    #[inline]
    pub fn const_parameters(&self) -> &ConstParameters {
        &self.raw
    }

    /// Returns the LWE parameters.
    #[inline]
    pub fn lwe(&self) -> &LweParameters {
        &self.lwe
    }

    /// Returns the ring-GSW parameters.
    #[inline]
    pub fn ring(&self) -> &RingGswParameters {
        &self.ring
    }

    /// Returns the bootstrapping method.
    #[inline]
    pub fn method(&self) -> BootstrapMethod {
        self.ring.method()
    }

    /// Returns the LWE dimension, refers to **n** in the paper.
    #[inline]
    pub fn lwe_dimension(&self) -> usize {
        self.raw.lwe_dimension
    }

    /// Returns the ring dimension, refers to **N** in the paper.
    #[inline]
    pub fn ring_dimension(&self) -> usize {
        self.raw.ring_dimension
    }

    /// Returns the LWE cipher modulus, refers to **q** in the paper.
    #[inline]
    pub fn lwe_modulus(&self) -> u64 {
        self.raw.lwe_modulus
    }

    /// Returns the ring modulus, refers to **Q** in the paper.
    #[inline]
    pub fn ring_modulus(&self) -> u64 {
        self.raw.ring_modulus
    }

    /// Returns the key switching modulus, refers to **qKS**.
    #[inline]
    pub fn key_switching_modulus(&self) -> u64 {
        self.raw.key_switching_modulus
    }
}

#[cfg(test)]
mod tests {
    use fhe_core::FHECoreError;

    use super::*;

    #[test]
    fn test_rejects_bad_parameters() {
        let good = *BinFheParamSet::Toy.const_parameters();
        assert!(BinFheParams::new(good, BootstrapMethod::Ginx).is_ok());

        let cases = [
            ConstParameters {
                ring_dimension: 500,
                ..good
            },
            ConstParameters {
                lwe_modulus: 384,
                ..good
            },
            ConstParameters {
                lwe_modulus: 2048,
                ..good
            },
            ConstParameters {
                ring_modulus: good.ring_modulus - 2,
                ..good
            },
            ConstParameters {
                gadget_basis: 1,
                ..good
            },
            ConstParameters {
                key_switching_basis: 0,
                ..good
            },
            ConstParameters {
                noise_standard_deviation: f64::NAN,
                ..good
            },
            ConstParameters {
                lwe_dimension: 0,
                ..good
            },
        ];
        for raw in cases {
            assert!(
                matches!(
                    BinFheParams::new(raw, BootstrapMethod::Ap),
                    Err(FHEError::Parameter(_))
                ),
                "{raw:?}"
            );
        }

        assert!(matches!(
            BinFheParams::new(
                ConstParameters {
                    ring_modulus: 97,
                    ..good
                },
                BootstrapMethod::Ginx
            ),
            Err(FHEError::Parameter(
                FHECoreError::RingModulusAndDimensionNotCompatible { .. }
            ))
        ));
    }

    #[test]
    fn test_catalog_is_valid() {
        for set in BinFheParamSet::ALL {
            let raw = set.const_parameters();
            let params = BinFheParams::new(*raw, BootstrapMethod::Ginx).unwrap();
            assert_eq!(params.ring_modulus() % (2 * params.ring_dimension() as u64), 1);
            assert_eq!(params.method(), BootstrapMethod::Ginx);
        }
    }
}
