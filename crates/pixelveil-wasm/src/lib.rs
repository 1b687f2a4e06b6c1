//! Pixelveil WASM - WebAssembly bindings for Pixelveil
//!
//! This crate exposes the pixelveil-core transforms to a JavaScript front-end,
//! which owns the file picker, the key input and the canvas preview.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding and preview bindings
//! - `encode` - PNG encoding and output naming
//! - `transform` - The four keyed transforms
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_action, encode_png } from '@pixelveil/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const swapped = apply_action(image, 'swap', 42);
//! const png = encode_png(swapped);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, generate_preview, resize_to_fit};
pub use encode::{encode_png, output_file_name};
pub use transform::{
    apply_action, default_key, describe_action, parse_key, permutation_len, permute,
    shift_decrypt, shift_encrypt, unpermute, ActionSummary,
};
pub use types::JsPixelGrid;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
