//! Additive sample shift modulo 256.

use crate::decode::PixelGrid;
use crate::Key;

/// Reduce a key to the offset actually applied to samples.
#[inline]
pub fn shift_offset(key: Key) -> u8 {
    key.rem_euclid(256) as u8
}

/// Add `key` to every sample, wrapping modulo 256.
///
/// Shape and channel layout are preserved. Only `key mod 256` is observable,
/// so `shift_encrypt(img, 5)` and `shift_encrypt(img, 261)` are identical.
pub fn shift_encrypt(image: &PixelGrid, key: Key) -> PixelGrid {
    let offset = shift_offset(key);
    log::debug!("shift_encrypt: offset {offset} over {} samples", image.sample_count());
    image.with_samples(image.samples.iter().map(|&v| v.wrapping_add(offset)).collect())
}

/// Subtract `key` from every sample, wrapping modulo 256.
///
/// Exact inverse of [`shift_encrypt`] for the same key.
pub fn shift_decrypt(image: &PixelGrid, key: Key) -> PixelGrid {
    let offset = shift_offset(key);
    log::debug!("shift_decrypt: offset {offset} over {} samples", image.sample_count());
    image.with_samples(image.samples.iter().map(|&v| v.wrapping_sub(offset)).collect())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
