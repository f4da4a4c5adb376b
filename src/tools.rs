pub(crate) mod bitvec;
pub(crate) mod hashing;
pub(crate) mod random;
mod secret;

pub(crate) use secret::Secret;
