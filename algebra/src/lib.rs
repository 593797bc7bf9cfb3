#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! Runtime-modulus integer arithmetic for lattice cryptography.
//!
//! Every value is a `u64` kept in `[0, modulus)`. Moduli are chosen at run time,
//! so one binary serves every parameter set.

mod error;

pub mod arith;
pub mod decompose;
pub mod modulus;
pub mod ntt;
pub mod polynomial;
pub mod random;
pub mod reduce;

pub use error::AlgebraError;
pub use modulus::{BarrettModulus, PowOf2Modulus, ShoupFactor};
pub use ntt::{NttTable, NumberTheoryTransform};
pub use polynomial::{NttPolynomial, Polynomial};
pub use reduce::RingReduce;
