//! Discrete logarithm proof over a safe prime product ($\Pi^{dln}$).
//!
//! Given $\tilde{N} = (2p + 1)(2q + 1)$ for primes $p$, $q$, and $h_1$, $h_2$
//! in the subgroup of quadratic residues modulo $\tilde{N}$ (of order $pq$),
//! prove knowledge of $x$ such that $h_2 = h_1^x \mod \tilde{N}$.
//!
//! The proof consists of [`ITERATIONS`] parallel repetitions of a Schnorr-like protocol
//! with a one-bit challenge, made non-interactive with the Fiat-Shamir transform.
//! A cheating prover succeeds with probability $2^{-\mathrm{ITERATIONS}}$.

mod codec;

use crypto_bigint::{modular::Retrieve, BitOps, Bounded, CheckedMul, NonZero, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::{
    params::DlnParams,
    tools::{
        bitvec::BitVec,
        hashing::{Chain, Hasher},
        random::{random_positive_below, SamplingError},
    },
    uint::OddModulus,
};

pub use codec::{DlnProofDecodingError, DlnProofWire};

const HASH_TAG: &[u8] = b"P_dln";

/// The number of repetitions in a proof, and the number of challenge bits.
pub const ITERATIONS: usize = 128;

/// An error that can occur when creating a proof.
#[derive(Debug, displaydoc::Display)]
pub enum GenerationError {
    /// The modulus is zero or even.
    InvalidModulus,
    /// The group order `p * q` is zero.
    ZeroGroupOrder,
    /// The group order `p * q` does not fit into the integer type with a bit to spare.
    GroupOrderTooLarge,
    /// Failed to sample a random value: {0}
    Sampling(SamplingError),
}

impl From<SamplingError> for GenerationError {
    fn from(source: SamplingError) -> Self {
        Self::Sampling(source)
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sampling(error) => Some(error),
            _ => None,
        }
    }
}

/// Challenge bits, one per repetition.
struct DlnChallenge(BitVec);

impl DlnChallenge {
    fn new<P: DlnParams>(h1: &P::Uint, h2: &P::Uint, modulus: &P::Uint, commitment: &[P::Uint]) -> Self {
        let hasher = Hasher::<P>::new_with_dst(HASH_TAG).chain(h1).chain(h2).chain(modulus);
        let mut reader = commitment
            .iter()
            .fold(hasher, |hasher, alpha| hasher.chain(alpha))
            .finalize_to_reader();
        Self(BitVec::from_xof_reader(&mut reader, ITERATIONS))
    }
}

/// Proof of knowledge of a discrete logarithm modulo a safe prime product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DlnProof<P: DlnParams> {
    /// Commitments $\alpha_i = h_1^{a_i} \mod \tilde{N}$.
    pub(crate) alpha: Box<[P::Uint; ITERATIONS]>,
    /// Responses $t_i = a_i + c_i x \mod pq$.
    pub(crate) t: Box<[P::Uint; ITERATIONS]>,
}

impl<P: DlnParams> DlnProof<P> {
    /// Creates a proof that `h2 = h1^x mod modulus`,
    /// where `modulus = (2p + 1)(2q + 1)` and `h1` is a quadratic residue.
    ///
    /// The statement itself is not checked: a proof for a false statement
    /// will be created, but will not pass verification.
    pub fn new(
        rng: &mut impl CryptoRngCore,
        h1: &P::Uint,
        h2: &P::Uint,
        x: &P::Uint,
        p: &P::Uint,
        q: &P::Uint,
        modulus: &P::Uint,
    ) -> Result<Self, GenerationError> {
        let modulus = OddModulus::new(modulus).ok_or(GenerationError::InvalidModulus)?;

        let mut group_order = Option::<P::Uint>::from(p.checked_mul(q)).ok_or(GenerationError::GroupOrderTooLarge)?;
        // `a + x` below must not overflow.
        if group_order.bits_vartime() >= <P::Uint as Bounded>::BITS {
            group_order.zeroize();
            return Err(GenerationError::GroupOrderTooLarge);
        }
        if bool::from(group_order.is_zero()) {
            return Err(GenerationError::ZeroGroupOrder);
        }
        let group_order_nz = Option::<NonZero<P::Uint>>::from(NonZero::new(group_order.clone()))
            .ok_or(GenerationError::ZeroGroupOrder)?;

        let mut x = x.clone() % group_order_nz.clone();

        let mut secret = Vec::with_capacity(ITERATIONS);
        for _ in 0..ITERATIONS {
            match random_positive_below(rng, &group_order) {
                Ok(a) => secret.push(a),
                Err(error) => {
                    secret.zeroize();
                    x.zeroize();
                    group_order.zeroize();
                    return Err(error.into());
                }
            }
        }

        let exponent_bits = group_order.bits_vartime();
        let h1_mod = modulus.to_montgomery(h1);
        let alpha = secret
            .iter()
            .map(|a| modulus.pow_bounded(&h1_mod, a, exponent_bits))
            .collect::<Vec<_>>();

        let challenge = DlnChallenge::new::<P>(h1, h2, modulus.modulus(), &alpha);

        let t = secret
            .iter()
            .zip(challenge.0.bits())
            .map(|(a, c)| {
                if *c {
                    // `a` and `x` are both below `group_order`, which has a spare bit.
                    (a.clone() + x.clone()) % group_order_nz.clone()
                } else {
                    a.clone()
                }
            })
            .collect::<Vec<_>>();

        secret.zeroize();
        x.zeroize();
        group_order.zeroize();

        Ok(Self {
            alpha: alpha
                .try_into()
                .expect("one commitment was created per repetition"),
            t: t.try_into().expect("one response was created per repetition"),
        })
    }

    /// Verifies that the prover knows `log_{h1} h2 mod modulus`.
    ///
    /// Never panics: malformed public inputs or proof elements make the proof invalid.
    pub fn verify(&self, h1: &P::Uint, h2: &P::Uint, modulus: &P::Uint) -> bool {
        let Some(modulus) = OddModulus::new(modulus) else {
            return false;
        };

        if !modulus.is_nonzero_residue(h1) || !modulus.is_nonzero_residue(h2) {
            return false;
        }
        if !self.alpha.iter().all(|alpha| modulus.is_nonzero_residue(alpha)) {
            return false;
        }

        let challenge = DlnChallenge::new::<P>(h1, h2, modulus.modulus(), self.alpha.as_slice());

        let h1_mod = modulus.to_montgomery(h1);
        let h2_mod = modulus.to_montgomery(h2);

        for ((c, alpha), t) in challenge.0.bits().iter().zip(self.alpha.iter()).zip(self.t.iter()) {
            let lhs = modulus.pow_vartime(&h1_mod, t);
            let rhs = if *c {
                (modulus.to_montgomery(alpha) * &h2_mod).retrieve()
            } else {
                alpha.clone()
            };
            if lhs != rhs {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use crypto_bigint::{Bounded, U256};
    use rand_core::OsRng;

    use super::{DlnProof, GenerationError, ITERATIONS};
    use crate::{
        dev::TestParams,
        keygen::LocalPreParams,
        tools::random::SamplingError,
    };

    type Params = TestParams;

    struct Statement {
        h1: U256,
        h2: U256,
        ntilde: U256,
    }

    fn prove(pre_params: &LocalPreParams<Params>) -> (DlnProof<Params>, Statement) {
        let proof = DlnProof::<Params>::new(
            &mut OsRng,
            pre_params.h1(),
            pre_params.h2(),
            pre_params.alpha(),
            pre_params.p(),
            pre_params.q(),
            pre_params.ntilde(),
        )
        .unwrap();
        let statement = Statement {
            h1: *pre_params.h1(),
            h2: *pre_params.h2(),
            ntilde: *pre_params.ntilde(),
        };
        (proof, statement)
    }

    #[test]
    fn prove_and_verify() {
        let pre_params = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        let (proof, statement) = prove(&pre_params);
        assert!(proof.verify(&statement.h1, &statement.h2, &statement.ntilde));

        // The inverse statement, proven with the inverse witness
        let proof = DlnProof::<Params>::new(
            &mut OsRng,
            pre_params.h2(),
            pre_params.h1(),
            pre_params.beta(),
            pre_params.p(),
            pre_params.q(),
            pre_params.ntilde(),
        )
        .unwrap();
        assert!(proof.verify(pre_params.h2(), pre_params.h1(), pre_params.ntilde()));
    }

    #[test]
    fn witness_is_reduced_modulo_group_order() {
        let pre_params = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        let group_order = pre_params.p().wrapping_mul(pre_params.q());
        let x = pre_params.alpha().wrapping_add(&group_order);
        let proof = DlnProof::<Params>::new(
            &mut OsRng,
            pre_params.h1(),
            pre_params.h2(),
            &x,
            pre_params.p(),
            pre_params.q(),
            pre_params.ntilde(),
        )
        .unwrap();
        assert!(proof.verify(pre_params.h1(), pre_params.h2(), pre_params.ntilde()));
    }

    #[test]
    fn tampering_with_any_element_is_detected() {
        let pre_params = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        let (proof, statement) = prove(&pre_params);

        // Setting the top bit pushes a commitment out of range, low bits change the values in place
        let top_bit = <U256 as Bounded>::BITS - 1;
        for i in 0..ITERATIONS {
            let bits = if i % 32 == 0 {
                (0..=top_bit).collect::<Vec<_>>()
            } else {
                vec![0, 1, 100, top_bit]
            };
            for bit in bits {
                let flip = U256::ONE << bit;

                let mut tampered = proof.clone();
                tampered.alpha[i] = tampered.alpha[i] ^ flip;
                assert!(!tampered.verify(&statement.h1, &statement.h2, &statement.ntilde));

                let mut tampered = proof.clone();
                tampered.t[i] = tampered.t[i] ^ flip;
                assert!(!tampered.verify(&statement.h1, &statement.h2, &statement.ntilde));
            }
        }
    }

    #[test]
    fn wrong_statement_is_rejected() {
        let pre_params = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        let (proof, statement) = prove(&pre_params);

        // Swapped bases
        assert!(!proof.verify(&statement.h2, &statement.h1, &statement.ntilde));

        // Another group altogether
        let other = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        assert!(!proof.verify(other.h1(), other.h2(), other.ntilde()));
    }

    #[test]
    fn false_statement_does_not_verify() {
        let pre_params = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        // `beta` is not the discrete log of `h2` to base `h1`
        let proof = DlnProof::<Params>::new(
            &mut OsRng,
            pre_params.h1(),
            pre_params.h2(),
            pre_params.beta(),
            pre_params.p(),
            pre_params.q(),
            pre_params.ntilde(),
        )
        .unwrap();
        assert!(!proof.verify(pre_params.h1(), pre_params.h2(), pre_params.ntilde()));
    }

    #[test]
    fn malformed_public_inputs_are_rejected() {
        let pre_params = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        let (proof, statement) = prove(&pre_params);

        assert!(!proof.verify(&statement.h1, &statement.h2, &U256::ZERO));
        assert!(!proof.verify(&statement.h1, &statement.h2, &statement.ntilde.wrapping_add(&U256::ONE)));
        assert!(!proof.verify(&U256::ZERO, &statement.h2, &statement.ntilde));
        assert!(!proof.verify(&statement.h1, &statement.ntilde, &statement.ntilde));
    }

    #[test]
    fn out_of_range_commitments_are_rejected() {
        let pre_params = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        let (proof, statement) = prove(&pre_params);

        let mut tampered = proof.clone();
        tampered.alpha[0] = U256::ZERO;
        assert!(!tampered.verify(&statement.h1, &statement.h2, &statement.ntilde));

        // Congruent to the honest commitment, but not reduced
        let mut tampered = proof.clone();
        tampered.alpha[ITERATIONS - 1] = tampered.alpha[ITERATIONS - 1].wrapping_add(&statement.ntilde);
        assert!(!tampered.verify(&statement.h1, &statement.h2, &statement.ntilde));
    }

    #[test]
    fn generation_errors() {
        let pre_params = LocalPreParams::<Params>::random(&mut OsRng).unwrap();
        let new_proof = |p: &U256, q: &U256, modulus: &U256| {
            DlnProof::<Params>::new(
                &mut OsRng,
                pre_params.h1(),
                pre_params.h2(),
                pre_params.alpha(),
                p,
                q,
                modulus,
            )
        };

        assert!(matches!(
            new_proof(pre_params.p(), pre_params.q(), &U256::ZERO),
            Err(GenerationError::InvalidModulus)
        ));
        assert!(matches!(
            new_proof(pre_params.p(), pre_params.q(), &U256::from_u64(1 << 20)),
            Err(GenerationError::InvalidModulus)
        ));
        assert!(matches!(
            new_proof(&U256::ZERO, pre_params.q(), pre_params.ntilde()),
            Err(GenerationError::ZeroGroupOrder)
        ));
        assert!(matches!(
            new_proof(&U256::MAX, &U256::from_u64(2), pre_params.ntilde()),
            Err(GenerationError::GroupOrderTooLarge)
        ));
        // Fits, but leaves no spare bit
        let half = U256::ONE << (<U256 as Bounded>::BITS - 2);
        assert!(matches!(
            new_proof(&half, &U256::from_u64(3), pre_params.ntilde()),
            Err(GenerationError::GroupOrderTooLarge)
        ));
        // A group of order 1 has no valid commitment secrets
        assert!(matches!(
            new_proof(&U256::ONE, &U256::ONE, pre_params.ntilde()),
            Err(GenerationError::Sampling(SamplingError::EmptyRange))
        ));
    }
}
