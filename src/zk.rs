//! Zero-knowledge proofs over safe prime products.

mod dln;

pub use dln::{DlnProof, DlnProofDecodingError, DlnProofWire, GenerationError, ITERATIONS};
