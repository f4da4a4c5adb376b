//! Local DLN parameters of a party.

use crypto_bigint::{modular::Retrieve, BitOps, CheckedMul, Invert, WrappingMul};
use crypto_primes::RandomPrimeWithRng;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::{
    params::DlnParams,
    tools::{random::random_positive_below, Secret},
    uint::OddModulus,
    zk::GenerationError,
};

/// A modulus $\tilde{N} = (2p + 1)(2q + 1)$ with two generators of its quadratic residue subgroup,
/// $h_2 = h_1^\alpha$, $h_1 = h_2^\beta$.
#[derive(Debug, Clone)]
pub struct LocalPreParams<P: DlnParams> {
    ntilde: P::Uint,
    h1: P::Uint,
    h2: P::Uint,
    alpha: Secret<P::Uint>,
    beta: Secret<P::Uint>,
    p: Secret<P::Uint>,
    q: Secret<P::Uint>,
}

impl<P: DlnParams> LocalPreParams<P> {
    /// Generates new parameters.
    ///
    /// Finding two safe primes of `P::PRIME_BITS` bits is slow for production sizes.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Self, GenerationError> {
        let (safe_p, safe_q) = loop {
            let safe_p = P::Uint::generate_safe_prime_with_rng(rng, P::PRIME_BITS);
            let safe_q = P::Uint::generate_safe_prime_with_rng(rng, P::PRIME_BITS);
            if safe_p == safe_q {
                continue;
            }
            let Some(ntilde) = Option::<P::Uint>::from(safe_p.checked_mul(&safe_q)) else {
                continue;
            };
            if ntilde.bits_vartime() == P::MODULUS_BITS {
                break (safe_p, safe_q);
            }
        };

        Self::from_safe_primes(rng, safe_p, safe_q)
    }

    /// Picks the generators for the modulus `safe_p * safe_q`.
    fn from_safe_primes(
        rng: &mut impl CryptoRngCore,
        safe_p: P::Uint,
        safe_q: P::Uint,
    ) -> Result<Self, GenerationError> {
        let ntilde =
            Option::<P::Uint>::from(safe_p.checked_mul(&safe_q)).ok_or(GenerationError::InvalidModulus)?;
        let p = Secret::init_with(|| safe_p >> 1u32);
        let q = Secret::init_with(|| safe_q >> 1u32);

        let modulus = OddModulus::new(&ntilde).ok_or(GenerationError::InvalidModulus)?;

        let group_order = Secret::init_with(|| p.expose_secret().wrapping_mul(q.expose_secret()));
        let group_order_modulus =
            OddModulus::new(group_order.expose_secret()).ok_or(GenerationError::ZeroGroupOrder)?;

        // A random square generates the subgroup of quadratic residues (of order `pq`)
        // unless it falls into one of its small subgroups.
        let h1 = loop {
            let mut r = random_positive_below(rng, &ntilde)?;
            let r_mod = modulus.to_montgomery(&r);
            r.zeroize();
            let h1 = (r_mod.clone() * &r_mod).retrieve();
            if h1.bits_vartime() > 1 {
                break h1;
            }
        };
        let h1_mod = modulus.to_montgomery(&h1);

        let (alpha, beta, h2) = loop {
            let alpha = random_positive_below(rng, group_order.expose_secret())?;
            let alpha = Secret::init_with(|| alpha);
            let inverse = group_order_modulus.to_montgomery(alpha.expose_secret()).invert();
            let Some(beta) = Option::<P::UintMod>::from(inverse) else {
                continue;
            };
            let beta = Secret::init_with(|| beta.retrieve());
            let h2 = modulus.pow_bounded(&h1_mod, alpha.expose_secret(), P::MODULUS_BITS);
            if h2 != h1 {
                break (alpha, beta, h2);
            }
        };

        Ok(Self {
            ntilde,
            h1,
            h2,
            alpha,
            beta,
            p,
            q,
        })
    }

    /// The modulus $\tilde{N}$.
    pub fn ntilde(&self) -> &P::Uint {
        &self.ntilde
    }

    /// A random quadratic residue modulo $\tilde{N}$.
    pub fn h1(&self) -> &P::Uint {
        &self.h1
    }

    /// $h_1^\alpha \mod \tilde{N}$.
    pub fn h2(&self) -> &P::Uint {
        &self.h2
    }

    /// $\log_{h_1} h_2$.
    pub(crate) fn alpha(&self) -> &P::Uint {
        self.alpha.expose_secret()
    }

    /// $\log_{h_2} h_1$.
    pub(crate) fn beta(&self) -> &P::Uint {
        self.beta.expose_secret()
    }

    pub(crate) fn p(&self) -> &P::Uint {
        self.p.expose_secret()
    }

    pub(crate) fn q(&self) -> &P::Uint {
        self.q.expose_secret()
    }
}
