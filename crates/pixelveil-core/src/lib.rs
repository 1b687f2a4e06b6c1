//! Pixelveil Core - Reversible image obfuscation
//!
//! This crate provides the core functionality for Pixelveil: four keyed pixel
//! transforms (additive shift and seeded permutation, each with its inverse),
//! image decoding, lossless encoding, preview generation and the session
//! context the interactive front-ends drive.
//!
//! None of this is cryptography. The transforms hide an image from a casual
//! look and are trivially reversible by anyone who tries.

pub mod decode;
pub mod encode;
pub mod session;
pub mod transform;

use std::fmt;
use std::str::FromStr;

pub use decode::{ChannelLayout, PixelGrid};
pub use session::{ActionOutcome, Session, SessionError};
pub use transform::{permute, shift_decrypt, shift_encrypt, unpermute, TransformError};

/// Key driving every transform: an additive offset (modulo 256) and the seed
/// of the permutation generator.
pub type Key = i64;

/// Key a fresh session starts with.
pub const DEFAULT_KEY: Key = 42;

/// One of the four user-facing transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Add the key to every sample.
    Encrypt,
    /// Subtract the key from every sample.
    Decrypt,
    /// Shuffle sample positions.
    Swap,
    /// Undo a shuffle.
    Unswap,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Encrypt, Action::Decrypt, Action::Swap, Action::Unswap];

    /// Past-tense label used in output file names and notices.
    pub fn label(self) -> &'static str {
        match self {
            Action::Encrypt => "encrypted",
            Action::Decrypt => "decrypted",
            Action::Swap => "swapped",
            Action::Unswap => "unswapped",
        }
    }

    /// The action that undoes this one with the same key, run on this one's output.
    pub fn inverse(self) -> Action {
        match self {
            Action::Encrypt => Action::Decrypt,
            Action::Decrypt => Action::Encrypt,
            Action::Swap => Action::Unswap,
            Action::Unswap => Action::Swap,
        }
    }

    /// Run the transform on `image`.
    pub fn apply(self, image: &PixelGrid, key: Key) -> Result<PixelGrid, TransformError> {
        match self {
            Action::Encrypt => Ok(shift_encrypt(image, key)),
            Action::Decrypt => Ok(shift_decrypt(image, key)),
            Action::Swap => permute(image, key),
            Action::Unswap => unpermute(image, key),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Encrypt => "encrypt",
            Action::Decrypt => "decrypt",
            Action::Swap => "swap",
            Action::Unswap => "unswap",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action '{0}' (expected encrypt, decrypt, swap or unswap)")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" | "encrypted" => Ok(Action::Encrypt),
            "decrypt" | "decrypted" => Ok(Action::Decrypt),
            "swap" | "swapped" => Ok(Action::Swap),
            "unswap" | "unswapped" | "reverse-swap" => Ok(Action::Unswap),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}
