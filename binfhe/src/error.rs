use fhe_core::FHECoreError;
use thiserror::Error;

use crate::ContextState;

/// Errors that may occur.
#[derive(Error, Debug)]
pub enum FHEError {
    /// Error that occurs when parameters, plaintext moduli or key shapes are inconsistent.
    #[error("Parameter error: {0}")]
    Parameter(#[from] FHECoreError),
    /// Error that occurs when an operation is invoked before its required lifecycle stage.
    #[error("{operation} requires the context to be {required:?}, but it is {current:?}!")]
    State {
        /// The rejected operation.
        operation: &'static str,
        /// The least state the operation needs.
        required: ContextState,
        /// The state of the context.
        current: ContextState,
    },
    /// Error that occurs when a persisted object is newer than this library.
    #[error("{object} version {found} is newer than the supported version {supported}!")]
    Version {
        /// The object name found in the header.
        object: String,
        /// The version found in the header.
        found: u32,
        /// The newest version this library reads.
        supported: u32,
    },
    /// Error that occurs when a persisted object is not of the requested type.
    #[error("Expected a serialized {expected}, found {found}!")]
    UnexpectedObject {
        /// The requested object name.
        expected: &'static str,
        /// The object name found in the header.
        found: String,
    },
    /// Error that occurs when bytes cannot be encoded or decoded.
    #[error(transparent)]
    Serialization(#[from] bincode::Error),
}
