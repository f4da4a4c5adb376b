use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use super::{KeygenError, LocalError, LocalPreParams, PartyIdx};
use crate::{
    params::DlnParams,
    uint::PublicUint,
    zk::{DlnProof, DlnProofWire},
};

/// The first round broadcast of a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Round1Announcement<P: DlnParams> {
    pub(super) paillier_modulus: PublicUint<P::Uint>,
    pub(super) ntilde: PublicUint<P::Uint>,
    pub(super) h1: PublicUint<P::Uint>,
    pub(super) h2: PublicUint<P::Uint>,
    pub(super) dln_proof_1: DlnProofWire,
    pub(super) dln_proof_2: DlnProofWire,
}

impl<P: DlnParams> Round1Announcement<P> {
    /// The Paillier modulus of the sender.
    pub fn paillier_modulus(&self) -> &P::Uint {
        &self.paillier_modulus
    }

    /// The DLN modulus $\tilde{N}$ of the sender.
    pub fn ntilde(&self) -> &P::Uint {
        &self.ntilde
    }

    /// The base of the first proof.
    pub fn h1(&self) -> &P::Uint {
        &self.h1
    }

    /// The base of the second proof.
    pub fn h2(&self) -> &P::Uint {
        &self.h2
    }

    /// The proof of $h_2 = h_1^\alpha$.
    pub fn dln_proof_1(&self) -> &DlnProofWire {
        &self.dln_proof_1
    }

    /// The proof of $h_1 = h_2^\beta$.
    pub fn dln_proof_2(&self) -> &DlnProofWire {
        &self.dln_proof_2
    }

    /// Verifies the proof of `h2 = h1^alpha mod Ñ`.
    pub fn verify_dln_proof_1(&self) -> bool {
        self.verify_dln_proof(&self.dln_proof_1, &self.h1, &self.h2)
    }

    /// Verifies the proof of `h1 = h2^beta mod Ñ`.
    pub fn verify_dln_proof_2(&self) -> bool {
        self.verify_dln_proof(&self.dln_proof_2, &self.h2, &self.h1)
    }

    fn verify_dln_proof(&self, wire: &DlnProofWire, base: &P::Uint, power: &P::Uint) -> bool {
        match DlnProof::<P>::from_wire(wire) {
            Ok(proof) => proof.verify(base, power, &self.ntilde),
            Err(error) => {
                tracing::debug!("Failed to decode a DLN proof: {error}");
                false
            }
        }
    }
}

/// The state of a party after sending its first round broadcast.
#[derive(Debug)]
pub struct KeygenRound1<P: DlnParams> {
    pub(super) own_idx: PartyIdx,
    pub(super) pre_params: LocalPreParams<P>,
    pub(super) announcement: Round1Announcement<P>,
}

impl<P: DlnParams> KeygenRound1<P> {
    /// Proves the consistency of `pre_params` and prepares the broadcast.
    pub fn new(
        rng: &mut impl CryptoRngCore,
        own_idx: PartyIdx,
        pre_params: LocalPreParams<P>,
        paillier_modulus: &P::Uint,
    ) -> Result<Self, KeygenError> {
        let dln_proof_1 = DlnProof::<P>::new(
            rng,
            pre_params.h1(),
            pre_params.h2(),
            pre_params.alpha(),
            pre_params.p(),
            pre_params.q(),
            pre_params.ntilde(),
        )
        .map_err(LocalError::Generation)?;
        let dln_proof_2 = DlnProof::<P>::new(
            rng,
            pre_params.h2(),
            pre_params.h1(),
            pre_params.beta(),
            pre_params.p(),
            pre_params.q(),
            pre_params.ntilde(),
        )
        .map_err(LocalError::Generation)?;

        let announcement = Round1Announcement {
            paillier_modulus: paillier_modulus.clone().into(),
            ntilde: pre_params.ntilde().clone().into(),
            h1: pre_params.h1().clone().into(),
            h2: pre_params.h2().clone().into(),
            dln_proof_1: dln_proof_1.to_wire(),
            dln_proof_2: dln_proof_2.to_wire(),
        };

        Ok(Self {
            own_idx,
            pre_params,
            announcement,
        })
    }

    /// The index of this party.
    pub fn own_idx(&self) -> PartyIdx {
        self.own_idx
    }

    /// The message to broadcast to all the other parties.
    pub fn announcement(&self) -> &Round1Announcement<P> {
        &self.announcement
    }
}
