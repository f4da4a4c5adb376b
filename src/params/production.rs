use crypto_bigint::{modular::MontyForm, nlimbs, Uint};
use sha3::Shake256;

use super::traits::DlnParams;

/// Parameters for production use: 1024-bit safe primes and 2048-bit moduli.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProductionParams;

impl DlnParams for ProductionParams {
    const PRIME_BITS: u32 = 1024;
    type Uint = Uint<{ nlimbs!(2048) }>;
    type UintMod = MontyForm<{ nlimbs!(2048) }>;
    type Digest = Shake256;
}

static_assertions::const_assert!(ProductionParams::SELF_CONSISTENT);
