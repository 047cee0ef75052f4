//! Format selection and the `image` crate encoders.

use std::io::Cursor;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{Channels, PixelBuffer};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder itself failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl ImageFormat {
    /// Map a file extension (with or without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" | "jpe" => Some(ImageFormat::Jpeg),
            "bmp" | "dib" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// Format for a file name or path, judged by its extension. A bare
    /// extension such as `"png"` is accepted too.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = path.rsplit_once('.').map_or(path, |(_, ext)| ext);
        Self::from_extension(ext)
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Bmp => "image/bmp",
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodeOptions {
    /// JPEG quality (1-100); ignored by the lossless formats.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Encode a buffer in `format`.
pub fn encode_image(
    buffer: &PixelBuffer,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    encode_pixels(
        buffer.data(),
        buffer.width(),
        buffer.height(),
        buffer.channels(),
        format,
        options,
    )
}

/// Encode raw interleaved pixels.
///
/// # Arguments
///
/// * `pixels` - Row-major pixel data, `channels` bytes per pixel
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - Gray or RGB
/// * `format` - Output format
/// * `options` - Encoder settings
///
/// # Errors
///
/// `InvalidDimensions` for a zero-sized image, `InvalidPixelData` when the
/// data length doesn't match, `EncodingFailed` when the encoder rejects it.
pub fn encode_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: Channels,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * channels.count();
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let color = match channels {
        Channels::Gray => ExtendedColorType::L8,
        Channels::Rgb => ExtendedColorType::Rgb8,
    };

    let mut out = Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Png => PngEncoder::new(&mut out).write_image(pixels, width, height, color),
        ImageFormat::Jpeg => {
            let quality = options.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut out, quality)
                .write_image(pixels, width, height, color)
        }
        ImageFormat::Bmp => BmpEncoder::new(&mut out).write_image(pixels, width, height, color),
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(128);
            }
        }
        PixelBuffer::rgb(width, height, pixels).unwrap()
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension(".JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("bmp"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::from_extension("tiff"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ImageFormat::from_path("out/result.Png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path("photo.final.jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path("bmp"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::from_path("no_extension"), None);
        assert_eq!(ImageFormat::from_path("archive.tar"), None);
    }

    #[test]
    fn test_default_options() {
        assert_eq!(EncodeOptions::default().jpeg_quality, 95);
    }

    #[test]
    fn test_png_magic() {
        let bytes =
            encode_image(&gradient(8, 8), ImageFormat::Png, &EncodeOptions::default()).unwrap();
        assert_eq!(&bytes[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_jpeg_markers() {
        let bytes =
            encode_image(&gradient(16, 16), ImageFormat::Jpeg, &EncodeOptions::default()).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_bmp_magic() {
        let bytes =
            encode_image(&gradient(4, 4), ImageFormat::Bmp, &EncodeOptions::default()).unwrap();
        assert_eq!(&bytes[0..2], b"BM");
    }

    #[test]
    fn test_png_is_lossless() {
        let buf = gradient(7, 5);
        let bytes = encode_image(&buf, ImageFormat::Png, &EncodeOptions::default()).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgb8();
        assert_eq!(decoded.into_raw(), buf.data());
    }

    #[test]
    fn test_gray_buffer_encodes_as_luma() {
        let buf = PixelBuffer::gray(3, 2, vec![0, 50, 100, 150, 200, 250]).unwrap();
        let bytes = encode_image(&buf, ImageFormat::Png, &EncodeOptions::default()).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!(decoded.into_luma8().into_raw(), buf.data());
    }

    #[test]
    fn test_invalid_pixel_data() {
        let options = EncodeOptions::default();
        let result = encode_pixels(&[0; 10], 2, 2, Channels::Rgb, ImageFormat::Png, &options);
        assert_eq!(result, Err(EncodeError::InvalidPixelData { expected: 12, actual: 10 }));
    }

    #[test]
    fn test_zero_dimensions() {
        let options = EncodeOptions::default();
        let result = encode_pixels(&[], 0, 4, Channels::Gray, ImageFormat::Bmp, &options);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_jpeg_quality_clamped() {
        let options = EncodeOptions { jpeg_quality: 0 };
        assert!(encode_image(&gradient(8, 8), ImageFormat::Jpeg, &options).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn format_strategy() -> impl Strategy<Value = ImageFormat> {
        prop::sample::select(vec![ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Bmp])
    }

    proptest! {
        /// Any well-formed buffer encodes and reads back at the same size.
        #[test]
        fn prop_dimensions_survive_encoding(
            (width, height) in (1u32..=24, 1u32..=24),
            gray in prop::bool::ANY,
            format in format_strategy(),
            quality in 1u8..=100,
        ) {
            let channels = if gray { Channels::Gray } else { Channels::Rgb };
            let buf = PixelBuffer::filled(width, height, channels, 90);
            let options = EncodeOptions { jpeg_quality: quality };
            let bytes = encode_image(&buf, format, &options).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap();
            prop_assert_eq!((decoded.width(), decoded.height()), (width, height));
        }

        #[test]
        fn prop_length_mismatch_rejected(
            (width, height) in (1u32..=16, 1u32..=16),
            delta in 1usize..=8,
        ) {
            let pixels = vec![0u8; (width * height * 3) as usize + delta];
            let options = EncodeOptions::default();
            let result =
                encode_pixels(&pixels, width, height, Channels::Rgb, ImageFormat::Png, &options);
            let is_mismatch = matches!(result, Err(EncodeError::InvalidPixelData { .. }));
            prop_assert!(is_mismatch);
        }
    }
}
