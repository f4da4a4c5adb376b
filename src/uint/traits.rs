use crypto_bigint::{Encoding, Limb, Uint};

/// Big-endian byte encoding of integers.
pub trait BoxedEncoding: Sized {
    /// Encodes the value in the full width of the type, with leading zeros.
    fn to_be_bytes(&self) -> Box<[u8]>;

    /// Decodes a value from a byte string of exactly the full width of the type.
    fn try_from_be_bytes(bytes: &[u8]) -> Result<Self, String>;

    /// Decodes a value from a byte string of any length,
    /// as long as the value (ignoring leading zeros) fits into the type.
    fn try_from_be_bytes_unpadded(bytes: &[u8]) -> Result<Self, String>;

    /// Encodes the value without leading zero bytes. Zero is encoded as an empty string.
    fn to_minimal_be_bytes(&self) -> Box<[u8]> {
        self.to_be_bytes().iter().copied().skip_while(|byte| *byte == 0).collect()
    }
}

impl<const L: usize> BoxedEncoding for Uint<L> {
    fn to_be_bytes(&self) -> Box<[u8]> {
        let mut result = vec![0u8; Self::BYTES];
        // SAFETY:
        // - `rchunks_mut` will not panic as long as `Self::BYTES` is a multiple of `Limb::BYTES`
        // - `copy_from_slice` will not panic as long as `Limb::to_be_bytes()` returns an array of size `Limb::BYTES`
        for (limb, chunk) in self.as_limbs().iter().zip(result.rchunks_exact_mut(Limb::BYTES)) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        result.into()
    }

    fn try_from_be_bytes(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() != Self::BYTES {
            return Err(format!(
                "Invalid slice length: {}, expected {}",
                bytes.len(),
                Self::BYTES
            ));
        }
        Ok(Self::from_be_slice(bytes))
    }

    fn try_from_be_bytes_unpadded(bytes: &[u8]) -> Result<Self, String> {
        let start = bytes.iter().position(|byte| *byte != 0).unwrap_or(bytes.len());
        let significant = bytes.get(start..).unwrap_or_default();
        if significant.len() > Self::BYTES {
            return Err(format!(
                "The value takes {} bytes, but at most {} fit",
                significant.len(),
                Self::BYTES
            ));
        }

        let mut padded = vec![0u8; Self::BYTES];
        // Allowing direct indexing since we checked the length of `significant` above.
        #[allow(clippy::indexing_slicing)]
        padded[Self::BYTES - significant.len()..].copy_from_slice(significant);
        Ok(Self::from_be_slice(&padded))
    }
}

#[cfg(test)]
mod tests {
    use crypto_bigint::{U128, U256};

    use super::BoxedEncoding;

    #[test]
    fn minimal_encoding() {
        assert!(U256::ZERO.to_minimal_be_bytes().is_empty());
        assert_eq!(&*U256::from_u64(0x01ff).to_minimal_be_bytes(), &[0x01, 0xff]);
        assert_eq!(U256::MAX.to_minimal_be_bytes().len(), U256::BYTES);
    }

    #[test]
    fn unpadded_decoding() {
        let x = U256::from_u64(0xabcdef);
        assert_eq!(U256::try_from_be_bytes_unpadded(&x.to_minimal_be_bytes()).unwrap(), x);
        assert_eq!(U256::try_from_be_bytes_unpadded(&[]).unwrap(), U256::ZERO);

        // Leading zeros beyond the width are fine
        let mut long = vec![0u8; 40];
        long[39] = 7;
        assert_eq!(U256::try_from_be_bytes_unpadded(&long).unwrap(), U256::from_u8(7));

        // Significant bytes beyond the width are not
        let too_big = U256::MAX.to_be_bytes();
        assert!(U128::try_from_be_bytes_unpadded(&too_big).is_err());
    }

    #[test]
    fn fixed_width_decoding() {
        let x = U256::from_u64(12345);
        assert_eq!(U256::try_from_be_bytes(&x.to_be_bytes()).unwrap(), x);
        assert!(U256::try_from_be_bytes(&x.to_minimal_be_bytes()).is_err());
    }
}
