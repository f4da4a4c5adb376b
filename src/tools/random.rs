//! Uniform sampling of secret integers.

use crypto_bigint::Integer;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::uint::BoxedEncoding;

/// An error that can occur when sampling a random integer.
#[derive(Debug, displaydoc::Display)]
pub enum SamplingError {
    /// The range `[1, bound)` is empty.
    EmptyRange,
    /// The random number generator failed: {0}
    Rng(rand_core::Error),
}

impl From<rand_core::Error> for SamplingError {
    fn from(source: rand_core::Error) -> Self {
        Self::Rng(source)
    }
}

impl std::error::Error for SamplingError {}

/// The mask applied to the most significant of the sampled bytes
/// so that the sample has at most `bits` bits.
fn high_byte_mask(bits: u32) -> u8 {
    match bits % 8 {
        0 => 0xff,
        remainder => (1u8 << remainder) - 1,
    }
}

/// Samples an integer uniformly from `[1, bound)`.
///
/// Draws `bits(bound)` random bits and retries until the result falls into the range.
/// Since the top bit of `bound` is set, each attempt succeeds with probability above 1/2.
pub(crate) fn random_positive_below<T>(rng: &mut impl CryptoRngCore, bound: &T) -> Result<T, SamplingError>
where
    T: Integer + BoxedEncoding,
{
    let bits = bound.bits_vartime();
    if bits < 2 {
        return Err(SamplingError::EmptyRange);
    }

    let mask = high_byte_mask(bits);
    let mut bytes = vec![0u8; bits.div_ceil(8) as usize];

    loop {
        rng.try_fill_bytes(&mut bytes)?;
        if let Some(high_byte) = bytes.first_mut() {
            *high_byte &= mask;
        }

        let candidate =
            T::try_from_be_bytes_unpadded(&bytes).expect("the sample has no more bytes than `bound` does");
        if !bool::from(candidate.is_zero()) && &candidate < bound {
            bytes.zeroize();
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use crypto_bigint::U256;
    use rand_chacha::ChaCha8Rng;
    use rand_core::{CryptoRng, OsRng, RngCore, SeedableRng};

    use super::{high_byte_mask, random_positive_below, SamplingError};

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new("entropy source is unavailable"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn masks() {
        assert_eq!(high_byte_mask(1), 0b1);
        assert_eq!(high_byte_mask(7), 0b0111_1111);
        assert_eq!(high_byte_mask(8), 0xff);
        assert_eq!(high_byte_mask(256), 0xff);
        assert_eq!(high_byte_mask(259), 0b111);
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        for bound in [3u64, 7, 8, 255, 256, 257, 1000, 65535] {
            let bound = U256::from_u64(bound);
            for _ in 0..200 {
                let x = random_positive_below(&mut rng, &bound).unwrap();
                assert!(x >= U256::ONE && x < bound);
            }
        }
    }

    #[test]
    fn smallest_range_yields_one() {
        let two = U256::from_u64(2);
        for _ in 0..20 {
            assert_eq!(random_positive_below(&mut OsRng, &two).unwrap(), U256::ONE);
        }
    }

    #[test]
    fn empty_ranges_are_rejected() {
        assert!(matches!(
            random_positive_below(&mut OsRng, &U256::ZERO),
            Err(SamplingError::EmptyRange)
        ));
        assert!(matches!(
            random_positive_below(&mut OsRng, &U256::ONE),
            Err(SamplingError::EmptyRange)
        ));
    }

    #[test]
    fn rng_failure_is_propagated() {
        let bound = U256::from_u64(1000);
        assert!(matches!(
            random_positive_below(&mut FailingRng, &bound),
            Err(SamplingError::Rng(_))
        ));
    }

    #[test]
    fn full_byte_bound_covers_whole_range() {
        // With an 8-bit bound every value in [1, 255) must be reachable,
        // including those with the top bit set.
        let bound = U256::from_u64(255);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 255];
        for _ in 0..20_000 {
            let x = random_positive_below(&mut rng, &bound).unwrap();
            seen[x.as_words()[0] as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|hit| *hit));
    }

    #[test]
    fn no_visible_bias() {
        let bound = U256::from_u64(6);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0u32; 6];
        let samples = 50_000;
        for _ in 0..samples {
            let x = random_positive_below(&mut rng, &bound).unwrap();
            counts[x.as_words()[0] as usize] += 1;
        }
        assert_eq!(counts[0], 0);
        let expected = samples / 5;
        for count in &counts[1..] {
            assert!(count.abs_diff(expected) < expected / 10);
        }
    }
}
