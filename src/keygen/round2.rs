use std::{
    collections::{BTreeMap, BTreeSet},
    sync::mpsc,
};

use crypto_bigint::BitOps;

use super::{
    DlnProofVerifier, KeygenError, KeygenRound1, LocalError, LocalPreParams, PartyIdx, Round1Announcement, Round1Fault,
};
use crate::params::DlnParams;

/// The public parameters of another party, accepted after the first round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAuxInfo<P: DlnParams> {
    /// The Paillier modulus of the party.
    pub paillier_modulus: P::Uint,
    /// The DLN modulus $\tilde{N}$ of the party.
    pub ntilde: P::Uint,
    /// The first generator of the party's DLN group.
    pub h1: P::Uint,
    /// The second generator of the party's DLN group.
    pub h2: P::Uint,
}

/// The data kept by a party after all the first round announcements were checked.
#[derive(Debug, Clone)]
pub struct KeygenSave<P: DlnParams> {
    own_idx: PartyIdx,
    pre_params: LocalPreParams<P>,
    peers: BTreeMap<PartyIdx, PeerAuxInfo<P>>,
}

impl<P: DlnParams> KeygenSave<P> {
    /// The index of this party.
    pub fn own_idx(&self) -> PartyIdx {
        self.own_idx
    }

    /// The DLN parameters of this party.
    pub fn pre_params(&self) -> &LocalPreParams<P> {
        &self.pre_params
    }

    /// The accepted parameters of every other party.
    pub fn peers(&self) -> &BTreeMap<PartyIdx, PeerAuxInfo<P>> {
        &self.peers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProofSlot {
    /// The proof of `log_{h1} h2`.
    First,
    /// The proof of `log_{h2} h1`.
    Second,
}

/// Checks the announcement of `party` before any proofs are verified.
///
/// `seen` holds all `h1` and `h2` values encountered so far, and is updated with the ones of `party`.
fn check_announcement<P: DlnParams>(
    announcement: &Round1Announcement<P>,
    seen: &mut BTreeSet<P::Uint>,
) -> Result<(), Round1Fault> {
    let paillier_bits = announcement.paillier_modulus().bits_vartime();
    if paillier_bits != P::MODULUS_BITS {
        return Err(Round1Fault::PaillierModulusSize {
            expected: P::MODULUS_BITS,
            actual: paillier_bits,
        });
    }

    if announcement.h1() == announcement.h2() {
        return Err(Round1Fault::H1EqualsH2);
    }

    let ntilde_bits = announcement.ntilde().bits_vartime();
    if ntilde_bits != P::MODULUS_BITS {
        return Err(Round1Fault::NTildeSize {
            expected: P::MODULUS_BITS,
            actual: ntilde_bits,
        });
    }

    if !seen.insert(announcement.h1().clone()) {
        return Err(Round1Fault::H1Reused);
    }
    if !seen.insert(announcement.h2().clone()) {
        return Err(Round1Fault::H2Reused);
    }

    Ok(())
}

impl<P: DlnParams> KeygenRound1<P> {
    /// Checks the announcements of all the parties and verifies their DLN proofs.
    ///
    /// `announcements` may contain the announcement of this party, which will be skipped.
    /// On failure, a single culprit is blamed: the lowest-indexed party with an invalid announcement,
    /// or, if all of them are well-formed, the lowest-indexed party with a failed first proof,
    /// or else the lowest-indexed party with a failed second proof.
    pub fn finalize(
        self,
        verifier: &DlnProofVerifier,
        announcements: &BTreeMap<PartyIdx, Round1Announcement<P>>,
    ) -> Result<KeygenSave<P>, KeygenError> {
        let peers = announcements
            .iter()
            .filter(|(party, _)| **party != self.own_idx)
            .map(|(party, announcement)| (*party, announcement))
            .collect::<Vec<_>>();

        let mut seen = BTreeSet::from([self.pre_params.h1().clone(), self.pre_params.h2().clone()]);
        for (party, announcement) in peers.iter() {
            check_announcement(announcement, &mut seen).map_err(|error| {
                tracing::warn!("Party {party} sent an invalid announcement: {error}");
                KeygenError::Remote { party: *party, error }
            })?;
        }

        let (tx, rx) = mpsc::channel::<(PartyIdx, ProofSlot, bool)>();
        verifier.run_batch(move |batch| {
            for (party, announcement) in peers {
                let tx_first = tx.clone();
                batch.verify_dln_proof_1(announcement, move |ok| {
                    // The receiver outlives the batch.
                    let _ = tx_first.send((party, ProofSlot::First, ok));
                });

                let tx_second = tx.clone();
                batch.verify_dln_proof_2(announcement, move |ok| {
                    let _ = tx_second.send((party, ProofSlot::Second, ok));
                });
            }
        });

        let expected = 2 * announcements.keys().filter(|party| **party != self.own_idx).count();
        let mut received = 0;
        let mut failed_first = BTreeSet::new();
        let mut failed_second = BTreeSet::new();
        for (party, slot, ok) in rx.try_iter() {
            received += 1;
            tracing::trace!("DLN proof {slot:?} of party {party}: {ok}");
            if !ok {
                match slot {
                    ProofSlot::First => failed_first.insert(party),
                    ProofSlot::Second => failed_second.insert(party),
                };
            }
        }

        if received != expected {
            return Err(LocalError::MissingVerdicts { expected, received }.into());
        }

        let culprit = failed_first
            .first()
            .map(|party| (*party, Round1Fault::DlnProof1Failed))
            .or_else(|| {
                failed_second
                    .first()
                    .map(|party| (*party, Round1Fault::DlnProof2Failed))
            });
        if let Some((party, error)) = culprit {
            tracing::warn!("Party {party} sent an invalid DLN proof: {error}");
            return Err(KeygenError::Remote { party, error });
        }

        let peers = announcements
            .iter()
            .filter(|(party, _)| **party != self.own_idx)
            .map(|(party, announcement)| {
                let info = PeerAuxInfo {
                    paillier_modulus: announcement.paillier_modulus().clone(),
                    ntilde: announcement.ntilde().clone(),
                    h1: announcement.h1().clone(),
                    h2: announcement.h2().clone(),
                };
                (*party, info)
            })
            .collect();

        Ok(KeygenSave {
            own_idx: self.own_idx,
            pre_params: self.pre_params,
            peers,
        })
    }
}
