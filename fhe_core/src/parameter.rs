use std::sync::Arc;

use algebra::{
    arith::is_prime,
    decompose::{SignedBasis, UnsignedBasis},
    random::DiscreteGaussian,
    BarrettModulus, NttTable, PowOf2Modulus,
};

use crate::{BootstrapMethod, FHECoreError};

/// Parameters of the LWE layer: the user facing ciphertexts and the key switching.
#[derive(Debug, Clone, Copy)]
pub struct LweParameters {
    /// LWE vector dimension, refers to **n** in the paper.
    dimension: usize,
    /// LWE cipher modulus, refers to **q** in the paper.
    cipher_modulus: PowOf2Modulus,
    /// Key switching modulus, refers to **qKS**.
    key_switching_modulus: BarrettModulus,
    /// Unsigned digits of values modulo **qKS**.
    key_switching_basis: UnsignedBasis,
    /// The noise error distribution, shared by fresh encryption and key switching.
    noise_distribution: DiscreteGaussian,
}

impl LweParameters {
    /// Creates a new [`LweParameters`] after checking every value.
    pub fn new(
        dimension: usize,
        cipher_modulus: u64,
        key_switching_modulus: u64,
        key_switching_basis: u64,
        noise_standard_deviation: f64,
    ) -> Result<Self, FHECoreError> {
        if dimension == 0 {
            return Err(FHECoreError::LweDimensionUnValid(dimension));
        }
        if cipher_modulus < 4 || !cipher_modulus.is_power_of_two() {
            return Err(FHECoreError::LweModulusUnValid(cipher_modulus));
        }
        let cipher_modulus = PowOf2Modulus::new(cipher_modulus)
            .map_err(|_| FHECoreError::LweModulusUnValid(cipher_modulus))?;

        let key_switching_modulus = BarrettModulus::new(key_switching_modulus)
            .map_err(|_| FHECoreError::KeySwitchingModulusUnValid(key_switching_modulus))?;

        let key_switching_basis =
            UnsignedBasis::new(key_switching_modulus.value(), key_switching_basis).map_err(
                |_| FHECoreError::BasisUnValid {
                    name: "Key switching basis",
                    basis: key_switching_basis,
                },
            )?;

        let noise_distribution = DiscreteGaussian::new(noise_standard_deviation)
            .map_err(|_| FHECoreError::NoiseUnValid(noise_standard_deviation))?;

        Ok(Self {
            dimension,
            cipher_modulus,
            key_switching_modulus,
            key_switching_basis,
            noise_distribution,
        })
    }

    /// Returns the LWE dimension, refers to **n** in the paper.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the LWE cipher modulus, refers to **q** in the paper.
    #[inline]
    pub fn cipher_modulus(&self) -> PowOf2Modulus {
        self.cipher_modulus
    }

    /// Returns the LWE cipher modulus value.
    #[inline]
    pub fn cipher_modulus_value(&self) -> u64 {
        self.cipher_modulus.value()
    }

    /// Returns the key switching modulus, refers to **qKS**.
    #[inline]
    pub fn key_switching_modulus(&self) -> BarrettModulus {
        self.key_switching_modulus
    }

    /// Returns the key switching basis.
    #[inline]
    pub fn key_switching_basis(&self) -> UnsignedBasis {
        self.key_switching_basis
    }

    /// Returns the noise standard deviation.
    #[inline]
    pub fn noise_standard_deviation(&self) -> f64 {
        self.noise_distribution.std_dev()
    }

    /// Returns the noise distribution.
    #[inline]
    pub fn noise_distribution(&self) -> &DiscreteGaussian {
        &self.noise_distribution
    }
}

/// Parameters of the ring-GSW layer used by bootstrapping.
///
/// Every derived value, including the NTT table, is computed once in [`RingGswParameters::new`].
#[derive(Debug, Clone)]
pub struct RingGswParameters {
    /// Ring dimension, refers to **N** in the paper.
    dimension: usize,
    /// Ring modulus, refers to **Q** in the paper.
    modulus: BarrettModulus,
    /// The LWE modulus **q** the blind rotation reads its input from.
    lwe_modulus: PowOf2Modulus,
    /// Signed gadget basis **baseG** over **Q**.
    gadget_basis: SignedBasis,
    /// Unsigned refreshing basis **baseR** over **q**, used by AP keys.
    refresh_basis: UnsignedBasis,
    /// The accumulator amplitude, `Q/8 + 1`.
    amplitude: u64,
    method: BootstrapMethod,
    noise_distribution: DiscreteGaussian,
    ntt_table: Arc<NttTable>,
}

impl RingGswParameters {
    /// Creates a new [`RingGswParameters`] after checking every value.
    pub fn new(
        lwe: &LweParameters,
        dimension: usize,
        modulus: u64,
        gadget_basis: u64,
        refresh_basis: u64,
        method: BootstrapMethod,
    ) -> Result<Self, FHECoreError> {
        // N = 2^i
        if !dimension.is_power_of_two() || dimension < 2 {
            return Err(FHECoreError::RingDimensionUnValid(dimension));
        }
        let twice_dimension = (dimension as u64) << 1;

        // q | 2N
        let q = lwe.cipher_modulus_value();
        if twice_dimension % q != 0 {
            return Err(FHECoreError::LweModulusRingDimensionNotCompatible {
                lwe_modulus: q,
                ring_dimension: dimension,
            });
        }

        let ring_modulus = BarrettModulus::new(modulus)?;
        if !is_prime(modulus) {
            return Err(FHECoreError::RingModulusNotPrime(modulus));
        }

        // 2N | (Q-1)
        if (modulus - 1) % twice_dimension != 0 {
            return Err(FHECoreError::RingModulusAndDimensionNotCompatible {
                ring_modulus: modulus,
                ring_dimension: dimension,
            });
        }

        let gadget_basis =
            SignedBasis::new(ring_modulus, gadget_basis).map_err(|_| FHECoreError::BasisUnValid {
                name: "Gadget basis",
                basis: gadget_basis,
            })?;
        let refresh_basis =
            UnsignedBasis::new(q, refresh_basis).map_err(|_| FHECoreError::BasisUnValid {
                name: "Refreshing basis",
                basis: refresh_basis,
            })?;

        let ntt_table = NttTable::new(ring_modulus, dimension.trailing_zeros())?;

        Ok(Self {
            dimension,
            modulus: ring_modulus,
            lwe_modulus: lwe.cipher_modulus(),
            gadget_basis,
            refresh_basis,
            amplitude: (modulus >> 3) + 1,
            method,
            noise_distribution: *lwe.noise_distribution(),
            ntt_table: Arc::new(ntt_table),
        })
    }

    /// Returns the ring dimension, refers to **N** in the paper.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the ring modulus, refers to **Q** in the paper.
    #[inline]
    pub fn modulus(&self) -> BarrettModulus {
        self.modulus
    }

    /// Returns the ring modulus value.
    #[inline]
    pub fn modulus_value(&self) -> u64 {
        self.modulus.value()
    }

    /// Returns the LWE modulus **q** read by the blind rotation.
    #[inline]
    pub fn lwe_modulus(&self) -> PowOf2Modulus {
        self.lwe_modulus
    }

    /// Returns `2N/q`, the exponent scaling from `Z_q` to `Z_2N`.
    #[inline]
    pub fn rotation_factor(&self) -> usize {
        (self.dimension << 1) / self.lwe_modulus.value() as usize
    }

    /// Returns the gadget basis.
    #[inline]
    pub fn gadget_basis(&self) -> &SignedBasis {
        &self.gadget_basis
    }

    /// Returns the refreshing basis used by AP keys.
    #[inline]
    pub fn refresh_basis(&self) -> UnsignedBasis {
        self.refresh_basis
    }

    /// Returns the accumulator amplitude `Q/8 + 1`.
    #[inline]
    pub fn amplitude(&self) -> u64 {
        self.amplitude
    }

    /// Returns the bootstrapping method.
    #[inline]
    pub fn method(&self) -> BootstrapMethod {
        self.method
    }

    /// Returns the noise distribution.
    #[inline]
    pub fn noise_distribution(&self) -> &DiscreteGaussian {
        &self.noise_distribution
    }

    /// Returns a reference to the NTT table.
    #[inline]
    pub fn ntt_table(&self) -> &NttTable {
        &self.ntt_table
    }

    /// Returns a shared handle to the NTT table.
    #[inline]
    pub fn ntt_table_arc(&self) -> Arc<NttTable> {
        Arc::clone(&self.ntt_table)
    }
}
