//! Image resizing functions for preview generation.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `PixelGrid` instances without modifying the input,
//! and keep the channel layout of the source.

use super::{DecodeError, FilterType, PixelGrid};

/// Longest edge of the on-screen preview shown after each action.
pub const PREVIEW_MAX_EDGE: u32 = 300;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for zero target dimensions, and
/// `DecodeError::CorruptedFile` if the sample buffer does not match the source
/// dimensions.
pub fn resize(
    image: &PixelGrid,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelGrid, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let dynamic = image
        .to_dynamic()
        .ok_or_else(|| DecodeError::CorruptedFile("Sample buffer size mismatch".to_string()))?;

    let resized = dynamic.resize_exact(width, height, filter.to_image_filter());

    Ok(PixelGrid::from_dynamic(resized))
}

/// Resize an image to fit within a maximum edge length while preserving aspect ratio.
///
/// If the image already fits within `max_edge`, it is returned unchanged.
pub fn resize_to_fit(
    image: &PixelGrid,
    max_edge: u32,
    filter: FilterType,
) -> Result<PixelGrid, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let (src_width, src_height) = (image.width, image.height);

    if src_width <= max_edge && src_height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(src_width, src_height, max_edge);

    resize(image, new_width, new_height, filter)
}

/// Generate the preview shown after a transform.
///
/// Uses bilinear interpolation. The result fits within a `max_edge x max_edge`
/// box; smaller images are never upscaled.
pub fn generate_preview(image: &PixelGrid, max_edge: u32) -> Result<PixelGrid, DecodeError> {
    resize_to_fit(image, max_edge, FilterType::Bilinear)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
