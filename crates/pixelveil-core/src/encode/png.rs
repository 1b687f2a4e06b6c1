//! Lossless PNG encoding for transformed images.
//!
//! Outputs are always PNG: a lossy format would perturb samples and break the
//! exact inverse of every transform.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::{expected_len, PixelGrid};
use crate::Action;

/// Extension of every file written by [`save_png`] through [`output_path`].
pub const OUTPUT_EXTENSION: &str = "png";

/// Errors that can occur during encoding and saving.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Sample data length doesn't match expected dimensions
    #[error("Invalid sample data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),

    /// Creating the output directory or writing the file failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Encode an image to PNG bytes in its own channel layout.
///
/// # Errors
///
/// Returns an error for zero dimensions, a sample buffer that does not match
/// the dimensions, or an encoder failure.
pub fn encode_png(image: &PixelGrid) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = expected_len(width, height, image.layout);
    if image.samples.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.samples.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&image.samples, width, height, image.layout.to_color_type())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Path an action's result is saved to: `{action}_image.png` in the
/// directory of the source image.
pub fn output_path(source: &Path, action: Action) -> PathBuf {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    dir.join(output_file_name(action))
}

/// File name of an action's result, e.g. `encrypted_image.png`.
pub fn output_file_name(action: Action) -> String {
    format!("{}_image.{OUTPUT_EXTENSION}", action.label())
}

/// Encode an image as PNG and write it to `path`, creating missing parent
/// directories first.
pub fn save_png(image: &PixelGrid, path: &Path) -> Result<(), EncodeError> {
    let bytes = encode_png(image)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| EncodeError::IoError(format!("{}: {e}", dir.display())))?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| EncodeError::IoError(format!("{}: {e}", path.display())))?;

    log::info!("saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_image, load_image, ChannelLayout};

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn scratch_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("pixelveil-encode-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_encode_png_magic() {
        let grid = PixelGrid::new(4, 4, ChannelLayout::Rgb, vec![128u8; 4 * 4 * 3]);
        let png = encode_png(&grid).unwrap();
        assert_eq!(&png[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encode_png_is_lossless_for_every_layout() {
        for layout in [
            ChannelLayout::Gray,
            ChannelLayout::GrayAlpha,
            ChannelLayout::Rgb,
            ChannelLayout::Rgba,
        ] {
            let len = 5 * 3 * layout.channels();
            let samples: Vec<u8> = (0..len).map(|i| ((i * 37) % 256) as u8).collect();
            let grid = PixelGrid::new(5, 3, layout, samples);

            let decoded = decode_image(&encode_png(&grid).unwrap()).unwrap();
            assert_eq!(decoded, grid, "layout {layout:?} should survive PNG");
        }
    }

    #[test]
    fn test_encode_png_invalid_pixel_data() {
        let grid = PixelGrid {
            width: 10,
            height: 10,
            layout: ChannelLayout::Rgb,
            samples: vec![0u8; 10],
        };
        assert!(matches!(
            encode_png(&grid),
            Err(EncodeError::InvalidPixelData { expected: 300, actual: 10 })
        ));
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        let grid = PixelGrid::new(0, 10, ChannelLayout::Gray, vec![]);
        assert!(matches!(
            encode_png(&grid),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_output_path_names() {
        let source = Path::new("/photos/trip/beach.jpg");
        assert_eq!(
            output_path(source, Action::Encrypt),
            PathBuf::from("/photos/trip/encrypted_image.png")
        );
        assert_eq!(
            output_path(source, Action::Decrypt),
            PathBuf::from("/photos/trip/decrypted_image.png")
        );
        assert_eq!(
            output_path(source, Action::Swap),
            PathBuf::from("/photos/trip/swapped_image.png")
        );
        assert_eq!(
            output_path(source, Action::Unswap),
            PathBuf::from("/photos/trip/unswapped_image.png")
        );
    }

    #[test]
    fn test_output_path_bare_file_name() {
        assert_eq!(
            output_path(Path::new("beach.bmp"), Action::Swap),
            PathBuf::from("swapped_image.png")
        );
    }

    #[test]
    fn test_save_png_creates_directories() {
        let dir = scratch_dir("nested");
        let path = dir.join("a").join("b").join("out.png");
        let grid = PixelGrid::from_gray_rows(&[&[1, 2, 3], &[4, 5, 6]]);

        save_png(&grid, &path).unwrap();
        assert_eq!(load_image(&path).unwrap(), grid);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
