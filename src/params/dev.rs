//! Parameters intended for testing, scaled down to small integer sizes.

use crypto_bigint::{modular::MontyForm, nlimbs, Uint};
use sha3::Shake256;

use super::traits::DlnParams;

/// DLN parameters **for testing purposes only**.
/// Security is weakened to allow for faster execution.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TestParams;

impl DlnParams for TestParams {
    const PRIME_BITS: u32 = 128;
    type Uint = Uint<{ nlimbs!(256) }>;
    type UintMod = MontyForm<{ nlimbs!(256) }>;
    type Digest = Shake256;
}

static_assertions::const_assert!(TestParams::SELF_CONSISTENT);
