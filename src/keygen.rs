//! DLN proofs in the first round of distributed key generation.
//!
//! Each party generates its own [`LocalPreParams`] (a safe prime product $\tilde{N}$
//! and two generators $h_1$, $h_2$ of its quadratic residue subgroup),
//! and broadcasts them in a [`Round1Announcement`] together with its Paillier modulus
//! and two DLN proofs: one for $\log_{h_1} h_2$, and one for $\log_{h_2} h_1$.
//!
//! When all the announcements are received, [`KeygenRound1::finalize`] checks them
//! and verifies all the proofs in parallel on a [`DlnProofVerifier`].

mod config;
mod dln_verifier;
mod error;
mod pre_params;
mod round1;
mod round2;


use core::fmt;

use serde::{Deserialize, Serialize};

pub use config::KeygenConfig;
pub use dln_verifier::{DlnBatch, DlnProofVerifier};
pub use error::{KeygenError, LocalError, Round1Fault};
pub use pre_params::LocalPreParams;
pub use round1::{KeygenRound1, Round1Announcement};
pub use round2::{KeygenSave, PeerAuxInfo};

/// The index of a party in a key generation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartyIdx(u32);

impl PartyIdx {
    /// Wraps an integer into the party index.
    pub const fn new(idx: u32) -> Self {
        Self(idx)
    }

    /// Converts the party index to a regular integer.
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for PartyIdx {
    fn from(idx: u32) -> Self {
        Self(idx)
    }
}

impl fmt::Display for PartyIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
