use digest::XofReader;

/// A fixed-length sequence of bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BitVec(Box<[bool]>);

impl BitVec {
    /// Unpacks the first `bits` bits of `byte_vec`, most significant bit of each byte first.
    fn from_bytes_unchecked(bits: usize, byte_vec: &[u8]) -> Self {
        debug_assert!(bits.div_ceil(8) <= byte_vec.len());
        let bit_vec = byte_vec
            .iter()
            .flat_map(|byte| (0..8).map(move |i| byte & (1 << (7 - i)) != 0))
            .take(bits)
            .collect();
        Self(bit_vec)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn from_xof_reader(reader: &mut impl XofReader, bits: usize) -> Self {
        let bytes = bits.div_ceil(8);
        let mut byte_vec = vec![0u8; bytes];
        reader.read(&mut byte_vec);
        Self::from_bytes_unchecked(bits, &byte_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::BitVec;

    #[test]
    fn msb_first_unpacking() {
        let bits = BitVec::from_bytes_unchecked(10, &[0b1000_0001, 0b0100_0000]);
        assert_eq!(
            bits.bits(),
            &[true, false, false, false, false, false, false, true, false, true]
        );
    }
}
