use core::fmt;

use super::PartyIdx;
use crate::zk::GenerationError;

/// Possible errors returned by the key generation.
#[derive(Debug)]
pub enum KeygenError {
    /// Indicates an error on this party's side.
    /// Can be caused by an incorrect usage, or some environment error.
    Local(LocalError),
    /// A fault of another party.
    Remote {
        /// The index of the failed party.
        party: PartyIdx,
        /// The error that occurred.
        error: Round1Fault,
    },
}

impl KeygenError {
    /// Returns the party blamed for the failure, if any.
    pub fn culprit(&self) -> Option<PartyIdx> {
        match self {
            Self::Local(_) => None,
            Self::Remote { party, .. } => Some(*party),
        }
    }
}

impl fmt::Display for KeygenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(error) => write!(f, "Local error: {error}"),
            Self::Remote { party, error } => write!(f, "Party {party} misbehaved: {error}"),
        }
    }
}

impl std::error::Error for KeygenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Local(error) => Some(error),
            Self::Remote { error, .. } => Some(error),
        }
    }
}

impl From<LocalError> for KeygenError {
    fn from(source: LocalError) -> Self {
        Self::Local(source)
    }
}

/// An error on this party's side.
#[derive(Debug, displaydoc::Display)]
pub enum LocalError {
    /// Failed to start the proof verification workers: {0}
    ThreadPool(String),
    /// Failed to create a DLN proof: {0}
    Generation(GenerationError),
    /// Expected {expected} proof verification results, got {received}
    MissingVerdicts {
        /// The number of proofs sent for verification.
        expected: usize,
        /// The number of results received.
        received: usize,
    },
}

impl std::error::Error for LocalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Generation(error) => Some(error),
            _ => None,
        }
    }
}

/// A fault in a party's first round announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, displaydoc::Display)]
pub enum Round1Fault {
    /// The Paillier modulus has {actual} bits, expected {expected}
    PaillierModulusSize {
        /// The required bit size.
        expected: u32,
        /// The bit size of the received modulus.
        actual: u32,
    },
    /// `h1` and `h2` are equal
    H1EqualsH2,
    /// The DLN modulus has {actual} bits, expected {expected}
    NTildeSize {
        /// The required bit size.
        expected: u32,
        /// The bit size of the received modulus.
        actual: u32,
    },
    /// `h1` was already announced by another party
    H1Reused,
    /// `h2` was already announced by another party
    H2Reused,
    /// The proof of `h2 = h1^alpha` failed verification
    DlnProof1Failed,
    /// The proof of `h1 = h2^beta` failed verification
    DlnProof2Failed,
}

impl std::error::Error for Round1Fault {}
