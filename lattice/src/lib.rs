#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! Defines some lattice cryptographic structure.

mod gadget;
mod lwe;
mod rgsw;
mod rlwe;

pub use gadget::NttGadgetRlwe;
pub use lwe::Lwe;
pub use rgsw::NttRgsw;
pub use rlwe::{DecomposeSpace, NttRlwe, Rlwe};
