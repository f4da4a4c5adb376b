use digest::{ExtendableOutput, Update};

use crate::{params::DlnParams, uint::BoxedEncoding};

/// A digest object that takes byte slices or decomposable ([`Hashable`]) objects.
pub trait Chain: Sized {
    /// Hash raw bytes.
    ///
    /// Note: only for impls in specific types, do not use directly.
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self;

    /// Hash raw bytes in a collision-resistant way.
    fn chain_bytes(self, bytes: &(impl AsRef<[u8]> + ?Sized)) -> Self {
        // Hash the length too to prevent hash conflicts. (e.g. H(AB|CD) == H(ABC|D)).
        // Not strictly necessary for fixed-size integers, but it's easier to just always do it.
        let len = (bytes.as_ref().len() as u64).to_be_bytes();
        self.chain_raw_bytes(&len).chain_raw_bytes(bytes.as_ref())
    }

    fn chain<T: Hashable + ?Sized>(self, hashable: &T) -> Self {
        hashable.chain(self)
    }
}

/// Wraps an extendable output hash for easier replacement, and standardizes the use of DST.
pub struct Hasher<P: DlnParams>(P::Digest);

impl<P: DlnParams> Chain for Hasher<P> {
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self {
        let mut digest = self.0;
        digest.update(bytes);
        Self(digest)
    }
}

impl<P: DlnParams> Hasher<P> {
    fn new() -> Self {
        Self(P::Digest::default())
    }

    pub fn new_with_dst(dst: &[u8]) -> Self {
        Self::new().chain_bytes(dst)
    }

    pub fn finalize_to_reader(self) -> <P::Digest as ExtendableOutput>::Reader {
        self.0.finalize_xof()
    }
}

/// A trait allowing complex objects to give access to their contents for hashing purposes
/// without the need of a conversion to a new form (e.g. serialization).
pub trait Hashable {
    fn chain<C: Chain>(&self, digest: C) -> C;
}

// Integers are hashed in the full width of their type,
// so that the hash input does not depend on the magnitude of the value.
impl<T: BoxedEncoding> Hashable for T {
    fn chain<C: Chain>(&self, digest: C) -> C {
        digest.chain_bytes(&self.to_be_bytes())
    }
}
