//! The four reversible pixel transforms.
//!
//! - [`shift_encrypt`] / [`shift_decrypt`]: add or subtract the key from every
//!   sample modulo 256
//! - [`permute`] / [`unpermute`]: shuffle sample positions with a permutation
//!   seeded by the key, or undo that shuffle
//!
//! Every function takes an image and a key and returns a new image; none of
//! them touch the input. These are obfuscation transforms, not encryption in
//! any cryptographic sense.

mod permute;
mod shift;

use thiserror::Error;

pub use permute::{inverse_permutation, permutation_indices, permute, unpermute};
pub use shift::{shift_decrypt, shift_encrypt, shift_offset};

/// Errors that can occur while building a permutation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The shuffle draws 32-bit positions, so larger images cannot be permuted.
    #[error("Image too large to permute: {samples} samples exceeds {max}", max = u32::MAX)]
    TooLarge { samples: usize },
}
