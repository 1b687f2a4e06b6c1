//! Image encoding WASM bindings.
//!
//! PNG is the only output format, so a saved result can always be decoded and
//! reversed exactly.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, output_file_name } from '@pixelveil/wasm';
//!
//! const png = encode_png(result);
//! const name = output_file_name('swap'); // "swapped_image.png"
//! ```

use crate::types::{js_error, JsPixelGrid};
use pixelveil_core::{encode, Action};
use wasm_bindgen::prelude::*;

/// Encode an image to PNG bytes in its own channel layout.
///
/// # Errors
///
/// Returns an error for zero dimensions, an inconsistent sample buffer, or an
/// encoder failure.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelGrid) -> Result<Vec<u8>, JsValue> {
    let grid = image.to_grid().map_err(js_error)?;
    encode::encode_png(&grid).map_err(js_error)
}

/// File name an action's result is saved under, e.g. `encrypted_image.png`.
///
/// # Errors
///
/// Returns an error for an unknown action name.
#[wasm_bindgen]
pub fn output_file_name(action: &str) -> Result<String, JsValue> {
    let action: Action = action.parse().map_err(js_error)?;
    Ok(encode::output_file_name(action))
}
