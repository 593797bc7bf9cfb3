//! This module defines some errors that
//! may occur during the execution of the library.

use thiserror::Error;

/// Errors that may occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    /// Error that occurs when the given modulus has no primitive root with the given degree.
    #[error("There is no primitive root with the degree {degree} and the modulus {modulus}!")]
    NoPrimitiveRoot {
        /// The degree for the primitive root
        degree: u64,
        /// The modulus.
        modulus: u64,
    },
    /// Error that occurs when no prime below `2^bits` is congruent to one modulo `order`.
    #[error("There is no {bits} bits prime congruent to 1 modulo {order}!")]
    NoNttPrime {
        /// The bit count of the desired prime.
        bits: u32,
        /// The required order.
        order: u64,
    },
    /// Error that occurs when a modulus is out of the supported range.
    #[error("Modulus {0} is not in the supported range [2, 2^62)!")]
    ModulusOutOfRange(
        /// The rejected modulus.
        u64,
    ),
    /// Error that occurs when a decomposition basis is smaller than two.
    #[error("Decomposition basis {0} is not valid!")]
    BasisErr(
        /// The rejected basis.
        u64,
    ),
    /// Error that occurs when fails to generate the ntt table.
    #[error("Fail to generate the ntt table for modulus {modulus} and dimension {dimension}.")]
    NttTableErr {
        /// The modulus.
        modulus: u64,
        /// The polynomial dimension.
        dimension: usize,
    },
    /// Error that occurs when fails to generate the distribution.
    #[error("Fail to generate the desired distribution.")]
    DistributionErr,
}
