//! Image decoding pipeline for Pixelveil.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and BMP images into an 8-bit [`PixelGrid`]
//! - Downscaling images for on-screen previews
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use pixelveil_core::decode::{load_image, generate_preview};
//!
//! let image = load_image("photo.png").unwrap();
//! let preview = generate_preview(&image, 300).unwrap();
//! println!("Preview {}x{}", preview.width, preview.height);
//! ```

mod load;
mod resize;
mod types;

pub use load::{decode_image, load_image};
pub use resize::{generate_preview, resize, resize_to_fit, PREVIEW_MAX_EDGE};
pub use types::{ChannelLayout, DecodeError, FilterType, PixelGrid};

pub(crate) use types::expected_len;
