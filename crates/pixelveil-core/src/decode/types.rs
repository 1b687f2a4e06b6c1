//! Core types for image decoding.

use image::{DynamicImage, ExtendedColorType, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// How samples of one pixel are interleaved in a [`PixelGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelLayout {
    /// One luminance sample per pixel.
    Gray,
    /// Luminance followed by alpha.
    GrayAlpha,
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ChannelLayout {
    /// Number of samples stored per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::GrayAlpha => 2,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Look up the layout for a per-pixel sample count.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(ChannelLayout::Gray),
            2 => Some(ChannelLayout::GrayAlpha),
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }

    /// The matching 8-bit color type for encoders.
    pub fn to_color_type(self) -> ExtendedColorType {
        match self {
            ChannelLayout::Gray => ExtendedColorType::L8,
            ChannelLayout::GrayAlpha => ExtendedColorType::La8,
            ChannelLayout::Rgb => ExtendedColorType::Rgb8,
            ChannelLayout::Rgba => ExtendedColorType::Rgba8,
        }
    }
}

/// An 8-bit image: `height` rows of `width` pixels, each pixel holding
/// `layout.channels()` interleaved samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Sample interleaving.
    pub layout: ChannelLayout,
    /// Samples in row-major order.
    /// Length should be width * height * layout.channels().
    pub samples: Vec<u8>,
}

impl PixelGrid {
    /// Create a new PixelGrid with the given dimensions and sample data.
    ///
    /// The buffer length is only checked in debug builds; use [`PixelGrid::try_new`]
    /// for samples that come from outside the crate.
    pub fn new(width: u32, height: u32, layout: ChannelLayout, samples: Vec<u8>) -> Self {
        debug_assert_eq!(
            samples.len(),
            expected_len(width, height, layout),
            "Sample buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            samples,
        }
    }

    /// Create a PixelGrid, or `None` if `samples` does not hold exactly
    /// `width * height * layout.channels()` samples.
    pub fn try_new(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        samples: Vec<u8>,
    ) -> Option<Self> {
        let grid = Self {
            width,
            height,
            layout,
            samples,
        };
        grid.is_consistent().then_some(grid)
    }

    /// Single-channel grid from rows of samples. Rows must all have the same length.
    pub fn from_gray_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let samples = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::new(width, height, ChannelLayout::Gray, samples)
    }

    /// Same shape and layout, different samples.
    pub fn with_samples(&self, samples: Vec<u8>) -> Self {
        Self::new(self.width, self.height, self.layout, samples)
    }

    /// Take ownership of a decoded image, keeping 8-bit gray, gray+alpha,
    /// RGB and RGBA as they are and converting everything else to the
    /// closest of those.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (layout, width, height, samples) = match img {
            DynamicImage::ImageLuma8(buf) => {
                (ChannelLayout::Gray, buf.width(), buf.height(), buf.into_raw())
            }
            DynamicImage::ImageLumaA8(buf) => {
                (ChannelLayout::GrayAlpha, buf.width(), buf.height(), buf.into_raw())
            }
            DynamicImage::ImageRgb8(buf) => {
                (ChannelLayout::Rgb, buf.width(), buf.height(), buf.into_raw())
            }
            DynamicImage::ImageRgba8(buf) => {
                (ChannelLayout::Rgba, buf.width(), buf.height(), buf.into_raw())
            }
            other => {
                let color = other.color();
                match (color.has_color(), color.has_alpha()) {
                    (false, false) => {
                        let buf = other.into_luma8();
                        (ChannelLayout::Gray, buf.width(), buf.height(), buf.into_raw())
                    }
                    (false, true) => {
                        let buf = other.into_luma_alpha8();
                        (ChannelLayout::GrayAlpha, buf.width(), buf.height(), buf.into_raw())
                    }
                    (true, false) => {
                        let buf = other.into_rgb8();
                        (ChannelLayout::Rgb, buf.width(), buf.height(), buf.into_raw())
                    }
                    (true, true) => {
                        let buf = other.into_rgba8();
                        (ChannelLayout::Rgba, buf.width(), buf.height(), buf.into_raw())
                    }
                }
            }
        };
        Self {
            width,
            height,
            layout,
            samples,
        }
    }

    /// Convert to a `DynamicImage` for use with `image::imageops`.
    ///
    /// Returns `None` if the sample buffer does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let samples = self.samples.clone();
        match self.layout {
            ChannelLayout::Gray => GrayImage::from_raw(w, h, samples).map(DynamicImage::ImageLuma8),
            ChannelLayout::GrayAlpha => {
                GrayAlphaImage::from_raw(w, h, samples).map(DynamicImage::ImageLumaA8)
            }
            ChannelLayout::Rgb => RgbImage::from_raw(w, h, samples).map(DynamicImage::ImageRgb8),
            ChannelLayout::Rgba => RgbaImage::from_raw(w, h, samples).map(DynamicImage::ImageRgba8),
        }
    }

    /// Number of samples per pixel.
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Total number of samples (pixels times channels).
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Check that the sample buffer matches the dimensions and layout.
    pub fn is_consistent(&self) -> bool {
        self.samples.len() == expected_len(self.width, self.height, self.layout)
    }
}

pub(crate) fn expected_len(width: u32, height: u32, layout: ChannelLayout) -> usize {
    (width as usize) * (height as usize) * layout.channels()
}
