//! WASM bindings for the four keyed transforms.
//!
//! Keys cross the boundary as JavaScript numbers and must be whole numbers
//! within the safe integer range; anything else is rejected before a
//! transform runs.

use crate::types::{js_error, JsPixelGrid};
use pixelveil_core::session::parse_key as core_parse_key;
use pixelveil_core::{encode, Action, Key};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Largest magnitude a JavaScript number holds exactly (2^53 - 1).
const MAX_SAFE_KEY: f64 = 9_007_199_254_740_991.0;

/// Summary of a finished action, handed to JavaScript as a plain object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSummary {
    pub action: Action,
    pub key: Key,
    pub width: u32,
    pub height: u32,
    pub output_file_name: String,
    pub notice: String,
}

impl ActionSummary {
    fn new(action: Action, key: Key, image: &JsPixelGrid) -> Self {
        let output_file_name = encode::output_file_name(action);
        let notice = format!("Image {} and saved as '{}'", action.label(), output_file_name);
        Self {
            action,
            key,
            width: image.width(),
            height: image.height(),
            output_file_name,
            notice,
        }
    }
}

/// Validate a JavaScript number as a key.
pub(crate) fn key_from_f64(value: f64) -> Result<Key, String> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_KEY {
        return Err(format!("Invalid key {value}: expected a whole number"));
    }
    Ok(value as Key)
}

fn run(image: &JsPixelGrid, key: f64, action: Action) -> Result<JsPixelGrid, JsValue> {
    let key = key_from_f64(key).map_err(js_error)?;
    let grid = image.to_grid().map_err(js_error)?;
    action
        .apply(&grid, key)
        .map(JsPixelGrid::from_grid)
        .map_err(js_error)
}

/// Add `key` to every sample modulo 256.
#[wasm_bindgen]
pub fn shift_encrypt(image: &JsPixelGrid, key: f64) -> Result<JsPixelGrid, JsValue> {
    run(image, key, Action::Encrypt)
}

/// Subtract `key` from every sample modulo 256.
#[wasm_bindgen]
pub fn shift_decrypt(image: &JsPixelGrid, key: f64) -> Result<JsPixelGrid, JsValue> {
    run(image, key, Action::Decrypt)
}

/// Shuffle sample positions with a permutation seeded by `key`.
#[wasm_bindgen]
pub fn permute(image: &JsPixelGrid, key: f64) -> Result<JsPixelGrid, JsValue> {
    run(image, key, Action::Swap)
}

/// Undo [`permute`] with the same key.
#[wasm_bindgen]
pub fn unpermute(image: &JsPixelGrid, key: f64) -> Result<JsPixelGrid, JsValue> {
    run(image, key, Action::Unswap)
}

/// Run an action by name (`encrypt`, `decrypt`, `swap`, `unswap`).
///
/// The completed action is reported on the browser console.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const result = apply_action(image, 'swap', 42);
/// const summary = describe_action(result, 'swap', 42);
/// showNotice(summary.notice);
/// ```
#[wasm_bindgen]
pub fn apply_action(image: &JsPixelGrid, action: &str, key: f64) -> Result<JsPixelGrid, JsValue> {
    let action: Action = action.parse().map_err(js_error)?;
    let result = run(image, key, action)?;
    web_sys::console::log_1(
        &format!(
            "pixelveil: {action} {}x{} image with key {key}",
            result.width(),
            result.height()
        )
        .into(),
    );
    Ok(result)
}

/// Describe a finished action as `{ action, key, width, height, outputFileName, notice }`.
#[wasm_bindgen]
pub fn describe_action(result: &JsPixelGrid, action: &str, key: f64) -> Result<JsValue, JsValue> {
    let action: Action = action.parse().map_err(js_error)?;
    let key = key_from_f64(key).map_err(js_error)?;
    let summary = ActionSummary::new(action, key, result);
    serde_wasm_bindgen::to_value(&summary).map_err(js_error)
}

/// Parse key text typed by the user.
///
/// # Errors
///
/// Returns an error for anything that is not a whole number in the safe
/// integer range.
#[wasm_bindgen]
pub fn parse_key(text: &str) -> Result<f64, JsValue> {
    let key = core_parse_key(text).map_err(js_error)?;
    let value = key as f64;
    if value.abs() > MAX_SAFE_KEY {
        return Err(js_error(format!(
            "Key {key} is out of range: keys must lie within ±{MAX_SAFE_KEY}"
        )));
    }
    Ok(value)
}

/// Key a new session starts with.
#[wasm_bindgen]
pub fn default_key() -> f64 {
    pixelveil_core::DEFAULT_KEY as f64
}

/// Number of samples the permutation for an image of this shape covers.
#[wasm_bindgen]
pub fn permutation_len(width: u32, height: u32, channels: u8) -> f64 {
    width as f64 * height as f64 * channels as f64
}
