//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixelveil
//! types, handling the conversion between Rust and JavaScript representations.

use pixelveil_core::decode::{ChannelLayout, FilterType, PixelGrid};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

/// An 8-bit image wrapper for JavaScript.
///
/// # Memory Management
///
/// The sample data is stored in WASM memory. When you call `samples()`, a copy
/// is made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelGrid {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelGrid {
    /// Create a new JsPixelGrid from dimensions and sample data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - Samples per pixel: 1 (gray), 2 (gray+alpha), 3 (RGB) or 4 (RGBA)
    /// * `samples` - Interleaved samples in row-major order
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> JsPixelGrid {
        JsPixelGrid {
            width,
            height,
            channels,
            samples,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of samples per pixel
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Get the number of bytes in the sample buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.samples.len()
    }

    /// Returns the samples as Uint8Array (a copy).
    pub fn samples(&self) -> Vec<u8> {
        self.samples.clone()
    }

    /// Expand to RGBA for drawing into a canvas `ImageData`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.samples.len() / self.channels.max(1) as usize * 4);
        match self.channels {
            1 => {
                for &v in &self.samples {
                    out.extend_from_slice(&[v, v, v, 255]);
                }
            }
            2 => {
                for px in self.samples.chunks_exact(2) {
                    out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
                }
            }
            3 => {
                for px in self.samples.chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
            }
            _ => out.extend_from_slice(&self.samples),
        }
        out
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelGrid {
    /// Wrap a core PixelGrid.
    pub(crate) fn from_grid(grid: PixelGrid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            channels: grid.layout.channels() as u8,
            samples: grid.samples,
        }
    }

    /// Convert back to a core PixelGrid, validating channels and buffer length.
    ///
    /// Note: This clones the sample data.
    pub(crate) fn to_grid(&self) -> Result<PixelGrid, String> {
        let layout = ChannelLayout::from_channels(self.channels as usize)
            .ok_or_else(|| format!("Unsupported channel count: {}", self.channels))?;
        PixelGrid::try_new(self.width, self.height, layout, self.samples.clone()).ok_or_else(|| {
            format!(
                "Sample buffer has {} bytes, expected {}x{}x{}",
                self.samples.len(),
                self.width,
                self.height,
                self.channels
            )
        })
    }
}

/// Convert any displayable error into a JavaScript `Error`.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_pixel_grid_creation() {
        let img = JsPixelGrid::new(100, 50, 3, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_from_grid_and_back() {
        let grid = PixelGrid::new(2, 1, ChannelLayout::GrayAlpha, vec![1, 2, 3, 4]);
        let js = JsPixelGrid::from_grid(grid.clone());
        assert_eq!(js.channels(), 2);
        assert_eq!(js.to_grid().unwrap(), grid);
    }

    #[test]
    fn test_to_grid_rejects_bad_channels() {
        let js = JsPixelGrid::new(1, 1, 5, vec![0u8; 5]);
        assert!(js.to_grid().is_err());
    }

    #[test]
    fn test_to_grid_rejects_bad_length() {
        let js = JsPixelGrid::new(4, 4, 3, vec![0u8; 10]);
        let err = js.to_grid().unwrap_err();
        assert_eq!(err, "Sample buffer has 10 bytes, expected 4x4x3");
    }

    #[test]
    fn test_to_rgba_expansion() {
        assert_eq!(
            JsPixelGrid::new(2, 1, 1, vec![7, 9]).to_rgba(),
            vec![7, 7, 7, 255, 9, 9, 9, 255]
        );
        assert_eq!(JsPixelGrid::new(1, 1, 2, vec![7, 9]).to_rgba(), vec![7, 7, 7, 9]);
        assert_eq!(JsPixelGrid::new(1, 1, 3, vec![1, 2, 3]).to_rgba(), vec![1, 2, 3, 255]);
        assert_eq!(JsPixelGrid::new(1, 1, 4, vec![1, 2, 3, 4]).to_rgba(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_from_u8() {
        assert!(matches!(filter_from_u8(0), FilterType::Nearest));
        assert!(matches!(filter_from_u8(1), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(2), FilterType::Lanczos3));
        assert!(matches!(filter_from_u8(255), FilterType::Bilinear));
    }
}
