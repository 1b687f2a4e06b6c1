//! Image decoding WASM bindings.
//!
//! This module exposes the pixelveil-core decoding and preview functions to
//! JavaScript.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a PNG, JPEG or BMP image from bytes
//! - [`resize_to_fit`] - Resize an image to fit within a max edge, preserving aspect ratio
//! - [`generate_preview`] - Build the preview shown after an action
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, generate_preview } from '@pixelveil/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const preview = generate_preview(image, 300);
//! ```

use crate::types::{filter_from_u8, js_error, JsPixelGrid};
use pixelveil_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes, keeping its 8-bit channel layout.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelGrid, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelGrid::from_grid)
        .map_err(js_error)
}

/// Resize an image to fit within a maximum edge size, preserving aspect ratio.
///
/// Images already within `max_edge` are returned unchanged (no upscaling).
///
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear (default), 2=Lanczos3
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsPixelGrid,
    max_edge: u32,
    filter: u8,
) -> Result<JsPixelGrid, JsValue> {
    let grid = image.to_grid().map_err(js_error)?;

    decode::resize_to_fit(&grid, max_edge, filter_from_u8(filter))
        .map(JsPixelGrid::from_grid)
        .map_err(js_error)
}

/// Generate the preview for an image. Pass 0 for the default 300px box.
#[wasm_bindgen]
pub fn generate_preview(image: &JsPixelGrid, max_edge: u32) -> Result<JsPixelGrid, JsValue> {
    let grid = image.to_grid().map_err(js_error)?;
    let max_edge = if max_edge == 0 {
        decode::PREVIEW_MAX_EDGE
    } else {
        max_edge
    };

    decode::generate_preview(&grid, max_edge)
        .map(JsPixelGrid::from_grid)
        .map_err(js_error)
}
