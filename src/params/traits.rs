use core::fmt::Debug;

use crypto_bigint::{
    modular::Retrieve, subtle::CtOption, BitOps, Bounded, Integer, Invert, Monty, PowBoundedExp, Zero,
};
use crypto_primes::RandomPrimeWithRng;
use digest::{ExtendableOutput, Update};
use zeroize::Zeroize;

use crate::uint::BoxedEncoding;

/// Parameters of the DLN proof system: integer sizes and the hash used for challenges.
pub trait DlnParams: 'static + Debug + Clone + Copy + PartialEq + Eq + Send + Sync {
    /// The size of each of the two safe primes making up the modulus $\tilde{N}$.
    const PRIME_BITS: u32;

    /// The size of the modulus $\tilde{N}$ (a product of two safe primes).
    /// Also the required size of a party's Paillier modulus.
    const MODULUS_BITS: u32 = Self::PRIME_BITS * 2;

    /// An integer that fits the modulus.
    type Uint: Integer<Monty = Self::UintMod>
        + Bounded
        + BitOps
        + Zero
        + RandomPrimeWithRng
        + BoxedEncoding
        + Zeroize;

    /// A modulo-residue counterpart of `Uint`.
    type UintMod: Monty<Integer = Self::Uint>
        + PowBoundedExp<Self::Uint>
        + Retrieve<Output = Self::Uint>
        + Invert<Output = CtOption<Self::UintMod>>;

    /// An extendable output function used to derive the challenge bits.
    type Digest: Default + Update + ExtendableOutput;

    /// Returns ``true`` if the integer type is large enough for the modulus size.
    const SELF_CONSISTENT: bool = Self::MODULUS_BITS <= <Self::Uint as Bounded>::BITS;
}
