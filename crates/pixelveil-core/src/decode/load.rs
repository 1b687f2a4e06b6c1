//! Image decoding from bytes and from disk.

use std::io::Cursor;
use std::path::Path;

use image::{ImageError, ImageReader};

use super::{DecodeError, PixelGrid};

/// Decode an image from bytes, guessing the format from its content.
///
/// The native 8-bit layout is kept (gray, gray+alpha, RGB or RGBA), so a
/// single-channel file stays single-channel through every transform.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized format.
/// Returns `DecodeError::CorruptedFile` if the image data is corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let grid = PixelGrid::from_dynamic(img);
    log::debug!(
        "decoded {}x{} image with {:?} layout",
        grid.width,
        grid.height,
        grid.layout
    );
    Ok(grid)
}

/// Read an image file from disk and decode it.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read, otherwise the
/// errors of [`decode_image`].
pub fn load_image(path: impl AsRef<Path>) -> Result<PixelGrid, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {e}", path.display())))?;
    decode_image(&bytes)
}
