#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! Boolean fully homomorphic encryption in the FHEW / TFHE family.
//!
//! A [`BinFheContext`] fixes a parameter set, generates keys and evaluates
//! binary gates on encrypted bits, refreshing the noise after every gate.
//!
//! ```no_run
//! use binfhe::{BinFheContext, BinFheParamSet, BinGate, BootstrapMethod, OutputMode};
//!
//! # fn main() -> Result<(), binfhe::FHEError> {
//! let mut ctx = BinFheContext::new();
//! ctx.generate_context(BinFheParamSet::Std128, BootstrapMethod::Ginx)?;
//!
//! let sk = ctx.key_gen()?;
//! ctx.bt_key_gen(&sk)?;
//!
//! let c1 = ctx.encrypt(&sk, true, OutputMode::Fresh)?;
//! let c2 = ctx.encrypt(&sk, false, OutputMode::Fresh)?;
//! let c = ctx.eval_bin_gate(BinGate::Xor, &c1, &c2)?;
//! assert!(ctx.decrypt(&sk, &c)?);
//! # Ok(())
//! # }
//! ```

mod error;

mod parameter;

mod bootstrapping_key;
mod context;
mod gate;
mod serialize;

pub use error::FHEError;

pub use parameter::{BinFheParamSet, BinFheParams, ConstParameters};

pub use bootstrapping_key::BootstrappingKey;
pub use context::{BinFheContext, ContextState, OutputMode, GATE_PLAIN_MODULUS};
pub use gate::BinGate;
pub use serialize::{Serializable, SERIALIZATION_VERSION};

pub use fhe_core::{
    BlindRotationKey, BootstrapMethod, LweCiphertext, LweKeySwitchingKey, LweSecretKey,
};
