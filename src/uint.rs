//! Adapter over `crypto-bigint` fixed-width integers.

mod modulus;
mod public_uint;
mod traits;

pub(crate) use modulus::OddModulus;
pub(crate) use public_uint::PublicUint;
pub use traits::BoxedEncoding;
