//! Seeded permutation of sample positions.
//!
//! The permutation is a Fisher-Yates shuffle of `0..N` driven by a ChaCha20
//! generator seeded from the key, where `N` counts every sample (pixels times
//! channels). Both directions regenerate the same index array from the key.
//!
//! # Cross-platform portability
//!
//! The shuffle draws with `gen_range` over `u32` (not `usize`). `usize` is
//! 32-bit on WASM and 64-bit on native, and `gen_range` consumes a different
//! amount of generator output for each, which would make a file swapped in
//! the browser impossible to restore natively.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::TransformError;
use crate::decode::PixelGrid;
use crate::Key;

/// Build the forward permutation of `0..len` for `key`.
///
/// Output position `i` of [`permute`] takes the sample at input position
/// `indices[i]`.
pub fn permutation_indices(len: usize, key: Key) -> Result<Vec<usize>, TransformError> {
    if len > u32::MAX as usize {
        return Err(TransformError::TooLarge { samples: len });
    }

    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = ChaCha20Rng::seed_from_u64(key as u64);
    for i in (1..len).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        indices.swap(i, j);
    }
    Ok(indices)
}

/// Invert a permutation: `inverse[indices[i]] == i`.
pub fn inverse_permutation(indices: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0usize; indices.len()];
    for (i, &src) in indices.iter().enumerate() {
        inverse[src] = i;
    }
    inverse
}

fn gather(samples: &[u8], indices: &[usize]) -> Vec<u8> {
    indices.iter().map(|&i| samples[i]).collect()
}

/// Scatter every sample to a key-derived position, keeping shape and layout.
///
/// Channels are shuffled together with positions, so a sample may land in a
/// different channel than it started in.
pub fn permute(image: &PixelGrid, key: Key) -> Result<PixelGrid, TransformError> {
    let indices = permutation_indices(image.sample_count(), key)?;
    log::debug!("permute: {} samples with key {key}", indices.len());
    Ok(image.with_samples(gather(&image.samples, &indices)))
}

/// Put every sample back where [`permute`] with the same key took it from.
///
/// The image must have the same sample count as the one that was permuted.
pub fn unpermute(image: &PixelGrid, key: Key) -> Result<PixelGrid, TransformError> {
    let indices = permutation_indices(image.sample_count(), key)?;
    let inverse = inverse_permutation(&indices);
    log::debug!("unpermute: {} samples with key {key}", inverse.len());
    Ok(image.with_samples(gather(&image.samples, &inverse)))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::ChannelLayout;
    use proptest::prelude::*;

    fn grid_strategy() -> impl Strategy<Value = PixelGrid> {
        (1u32..=12, 1u32..=12, 1usize..=4).prop_flat_map(|(w, h, c)| {
            let len = (w * h) as usize * c;
            prop::collection::vec(any::<u8>(), len..=len).prop_map(move |samples| {
                let layout = ChannelLayout::from_channels(c).unwrap();
                PixelGrid::new(w, h, layout, samples)
            })
        })
    }

    proptest! {
        /// Property: unpermute undoes permute for any key.
        #[test]
        fn prop_unpermute_inverts_permute(img in grid_strategy(), key in any::<i64>()) {
            let swapped = permute(&img, key).unwrap();
            prop_assert_eq!(unpermute(&swapped, key).unwrap(), img);
        }

        /// Property: permute undoes unpermute for any key.
        #[test]
        fn prop_permute_inverts_unpermute(img in grid_strategy(), key in any::<i64>()) {
            let restored = unpermute(&img, key).unwrap();
            prop_assert_eq!(permute(&restored, key).unwrap(), img);
        }

        /// Property: permute only reorders, the multiset of samples is unchanged.
        #[test]
        fn prop_permute_preserves_histogram(img in grid_strategy(), key in any::<i64>()) {
            let mut before = img.samples.clone();
            let mut after = permute(&img, key).unwrap().samples;
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }

        /// Property: the index array composed with its inverse is the identity.
        #[test]
        fn prop_inverse_composes_to_identity(len in 0usize..=512, key in any::<i64>()) {
            let indices = permutation_indices(len, key).unwrap();
            let inverse = inverse_permutation(&indices);
            for i in 0..len {
                prop_assert_eq!(indices[inverse[i]], i);
            }
        }
    }
}
