use algebra::AlgebraError;

use crate::BootstrapMethod;

/// Errors that may occur.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FHECoreError {
    /// Error that occurs when the given lwe dimension is not valid.
    #[error("LWE dimension {0} is not valid!")]
    LweDimensionUnValid(
        /// The rejected dimension.
        usize,
    ),
    /// Error that occurs when the given ring dimension is not valid.
    #[error("Ring dimension {0} is not valid!")]
    RingDimensionUnValid(
        /// The rejected dimension.
        usize,
    ),
    /// Error that occurs when the given lwe modulus is not a power of two at least 4.
    #[error("LWE modulus {0} is not valid!")]
    LweModulusUnValid(
        /// The rejected modulus.
        u64,
    ),
    /// Error that occurs when the given lwe modulus
    /// is not compatible with ring dimension.
    #[error("LWE modulus {lwe_modulus} is not compatible with ring dimension {ring_dimension}!")]
    LweModulusRingDimensionNotCompatible {
        /// LWE modulus
        lwe_modulus: u64,
        /// Ring dimension
        ring_dimension: usize,
    },
    /// Error that occurs when the given ring modulus
    /// is not compatible with ring dimension.
    #[error("Ring modulus {ring_modulus} is not compatible with ring dimension {ring_dimension}!")]
    RingModulusAndDimensionNotCompatible {
        /// Ring modulus
        ring_modulus: u64,
        /// Ring dimension
        ring_dimension: usize,
    },
    /// Error that occurs when the ring modulus is not prime.
    #[error("Ring modulus {0} is not a prime!")]
    RingModulusNotPrime(
        /// The rejected modulus.
        u64,
    ),
    /// Error that occurs when the key switching modulus is not valid.
    #[error("Key switching modulus {0} is not valid!")]
    KeySwitchingModulusUnValid(
        /// The rejected modulus.
        u64,
    ),
    /// Error that occurs when a decomposition basis is not valid.
    #[error("{name} {basis} is not valid!")]
    BasisUnValid {
        /// Which basis.
        name: &'static str,
        /// The rejected basis.
        basis: u64,
    },
    /// Error that occurs when the noise standard deviation is not valid.
    #[error("Noise standard deviation {0} is not valid!")]
    NoiseUnValid(
        /// The rejected standard deviation.
        f64,
    ),
    /// Error that occurs when the plaintext modulus does not divide the cipher modulus.
    #[error("Plaintext modulus {plain_modulus} does not partition cipher modulus {cipher_modulus}!")]
    PlainModulusUnValid {
        /// Plaintext modulus
        plain_modulus: u64,
        /// Cipher modulus
        cipher_modulus: u64,
    },
    /// Error that occurs when a message does not fit the plaintext space.
    #[error("Message {message} is out of the plaintext space {plain_modulus}!")]
    MessageOutOfRange {
        /// Message
        message: u64,
        /// Plaintext modulus
        plain_modulus: u64,
    },
    /// Error that occurs when a ciphertext or key has an unexpected dimension.
    #[error("Expected dimension {expected}, found {found}!")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Found dimension
        found: usize,
    },
    /// Error that occurs when a key table does not have the size its header implies.
    #[error("{name} holds {found} entries, expected {expected}!")]
    KeySizeMismatch {
        /// Which key.
        name: &'static str,
        /// Expected entry count
        expected: usize,
        /// Found entry count
        found: usize,
    },
    /// Error that occurs when a ring-GSW entry of a key has the wrong dimension or digit count.
    #[error("{name} entry {index} does not have dimension {dimension} with {digit_count} digits!")]
    KeyEntryShapeMismatch {
        /// Which key.
        name: &'static str,
        /// Index of the first bad entry.
        index: usize,
        /// Expected ring dimension
        dimension: usize,
        /// Expected gadget digit count
        digit_count: usize,
    },
    /// Error that occurs when a key was generated for another bootstrapping method.
    #[error("Expected a {expected:?} key, found a {found:?} key!")]
    MethodMismatch {
        /// Expected method
        expected: BootstrapMethod,
        /// Found method
        found: BootstrapMethod,
    },
    /// Error from the arithmetic layer.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}
