//! Define arithmetic operations and traits.

mod prim_root;
mod prime;

pub use prim_root::PrimitiveRoot;
pub use prime::{is_prime, ntt_prime};
