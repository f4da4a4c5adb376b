//! Conversion of [`DlnProof`] to and from a flat list of byte strings.
//!
//! The list holds the [`ITERATIONS`] commitments followed by the [`ITERATIONS`] responses,
//! each as an unsigned big-endian integer. All the strings are left-padded with zeros
//! to the same length, that of the longest minimal encoding among them.

use serde::{Deserialize, Serialize};
use serde_encoded_bytes::{Hex, SliceLike};

use super::{DlnProof, ITERATIONS};
use crate::{params::DlnParams, uint::BoxedEncoding};

/// An error that can occur when reconstructing a proof from byte strings.
#[derive(Debug, Clone, PartialEq, Eq, displaydoc::Display)]
pub enum DlnProofDecodingError {
    /// Expected {expected} byte strings, got {actual}
    CountMismatch {
        /// The number of byte strings in a proof.
        expected: usize,
        /// The number of byte strings received.
        actual: usize,
    },
    /// Byte string {index} is {actual} bytes long, while the first one is {expected} bytes long
    LengthMismatch {
        /// The position of the offending byte string.
        index: usize,
        /// The length of the first byte string.
        expected: usize,
        /// The length of the offending byte string.
        actual: usize,
    },
    /// Byte string {index} does not represent a valid integer: {message}
    Parse {
        /// The position of the offending byte string.
        index: usize,
        /// The reason the integer could not be decoded.
        message: String,
    },
    /// Expected {expected} values in each half of the proof, got {actual}
    GroupSize {
        /// The number of repetitions in a proof.
        expected: usize,
        /// The number of values in the offending half.
        actual: usize,
    },
}

impl std::error::Error for DlnProofDecodingError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct WirePart(#[serde(with = "SliceLike::<Hex>")] Box<[u8]>);

/// A serializable form of [`DlnProof`]: the list of its byte strings.
///
/// Decoding the list into a proof is deferred to [`DlnProof::from_wire`],
/// so that a malformed proof received from a peer can be treated as an invalid one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlnProofWire(Vec<WirePart>);

impl DlnProofWire {
    /// Wraps byte strings received from a transport.
    pub fn from_byte_parts<B: AsRef<[u8]>>(parts: &[B]) -> Self {
        Self(parts.iter().map(|part| WirePart(part.as_ref().into())).collect())
    }

    /// Returns the wrapped byte strings.
    pub fn byte_parts(&self) -> impl Iterator<Item = &[u8]> {
        self.0.iter().map(|part| part.0.as_ref())
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> impl Iterator<Item = &mut Box<[u8]>> {
        self.0.iter_mut().map(|part| &mut part.0)
    }
}

impl<P: DlnParams> DlnProof<P> {
    /// Returns `2 * ITERATIONS` big-endian byte strings of equal length:
    /// the commitments followed by the responses.
    pub fn to_byte_parts(&self) -> Vec<Box<[u8]>> {
        let minimal = self
            .alpha
            .iter()
            .chain(self.t.iter())
            .map(|value| value.to_minimal_be_bytes())
            .collect::<Vec<_>>();
        let width = minimal.iter().map(|bytes| bytes.len()).max().unwrap_or(0);

        minimal
            .into_iter()
            .map(|bytes| {
                let mut padded = vec![0u8; width - bytes.len()];
                padded.extend_from_slice(&bytes);
                padded.into_boxed_slice()
            })
            .collect()
    }

    /// Reconstructs a proof from byte strings produced by [`Self::to_byte_parts`].
    pub fn from_byte_parts<B: AsRef<[u8]>>(parts: &[B]) -> Result<Self, DlnProofDecodingError> {
        if parts.len() != 2 * ITERATIONS {
            return Err(DlnProofDecodingError::CountMismatch {
                expected: 2 * ITERATIONS,
                actual: parts.len(),
            });
        }

        let width = parts.first().map(|part| part.as_ref().len()).unwrap_or(0);
        let values = parts
            .iter()
            .enumerate()
            .map(|(index, part)| {
                let part = part.as_ref();
                if part.len() != width {
                    return Err(DlnProofDecodingError::LengthMismatch {
                        index,
                        expected: width,
                        actual: part.len(),
                    });
                }
                P::Uint::try_from_be_bytes_unpadded(part)
                    .map_err(|message| DlnProofDecodingError::Parse { index, message })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut alpha = values;
        let t = alpha.split_off(ITERATIONS.min(alpha.len()));

        let group_size_error = |values: Vec<P::Uint>| DlnProofDecodingError::GroupSize {
            expected: ITERATIONS,
            actual: values.len(),
        };
        let alpha: Box<[P::Uint; ITERATIONS]> = alpha.try_into().map_err(group_size_error)?;
        let t: Box<[P::Uint; ITERATIONS]> = t.try_into().map_err(group_size_error)?;

        Ok(Self { alpha, t })
    }

    /// Returns the serializable form of the proof.
    pub fn to_wire(&self) -> DlnProofWire {
        DlnProofWire::from_byte_parts(&self.to_byte_parts())
    }

    /// Reconstructs a proof from its serializable form.
    pub fn from_wire(wire: &DlnProofWire) -> Result<Self, DlnProofDecodingError> {
        Self::from_byte_parts(&wire.byte_parts().collect::<Vec<_>>())
    }
}
