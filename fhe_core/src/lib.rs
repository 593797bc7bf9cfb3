#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! Implementations of FHE core operations: LWE encryption, key switching,
//! modulus switching and ring-GSW blind rotation.

mod accumulator;
mod blind_rotation;
mod error;
mod key_switch;
mod modulus_switch;
mod parameter;
mod plaintext;
mod secret_key;
mod utils;

pub use accumulator::{extract_accumulator, init_accumulator};
pub use blind_rotation::{
    ApBlindRotationKey, BlindRotate, BlindRotationKey, BootstrapMethod, GinxBlindRotationKey,
};
pub use error::FHECoreError;
pub use key_switch::LweKeySwitchingKey;
pub use modulus_switch::{lwe_modulus_switch, modulus_switch_value};
pub use parameter::{LweParameters, RingGswParameters};
pub use plaintext::{check_plain_modulus, decode, encode};
pub use secret_key::LweSecretKey;
pub use utils::Pool;

/// An LWE ciphertext `(a, b)`.
pub type LweCiphertext = lattice::Lwe;
