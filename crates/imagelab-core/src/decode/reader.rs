//! Image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{ImageError, ImageReader};

use super::{DecodeError, Orientation};
use crate::buffer::PixelBuffer;

/// Decode an image file into a 3-channel RGB buffer.
///
/// The format is sniffed from the content. EXIF orientation is applied, so
/// the result displays upright. Grayscale and alpha sources are converted to
/// plain RGB.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image format, `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let orientation = read_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let rgb = orientation.apply(img).into_rgb8();
    let (width, height) = rgb.dimensions();
    PixelBuffer::rgb(width, height, rgb.into_raw())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// EXIF orientation of an image file.
///
/// Returns `Orientation::Normal` when there is no EXIF data or no
/// orientation tag.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(_) => return Orientation::Normal,
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;
    use crate::encode::{encode_image, EncodeOptions, ImageFormat};

    /// APP1 segment holding a big-endian TIFF block with a single
    /// Orientation (0x0112) SHORT entry.
    fn exif_segment(orientation: u8) -> Vec<u8> {
        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&[0x4D, 0x4D, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
        payload.extend_from_slice(&[0x00, 0x01]);
        payload.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        payload.extend_from_slice(&[0x00, orientation, 0x00, 0x00]);
        payload.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let len = (payload.len() + 2) as u16;
        let mut segment = vec![0xFF, 0xE1];
        segment.extend_from_slice(&len.to_be_bytes());
        segment.extend_from_slice(&payload);
        segment
    }

    /// JPEG of `width x height` with an EXIF orientation tag after SOI.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u8) -> Vec<u8> {
        let buf = PixelBuffer::filled(width, height, Channels::Rgb, 120);
        let jpeg = encode_image(&buf, ImageFormat::Jpeg, &EncodeOptions::default()).unwrap();
        let mut out = jpeg[..2].to_vec();
        out.extend(exif_segment(orientation));
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_decode_png_is_exact() {
        let data: Vec<u8> = (0..4 * 3 * 3).map(|i| (i * 7) as u8).collect();
        let buf = PixelBuffer::rgb(4, 3, data).unwrap();
        let png = encode_image(&buf, ImageFormat::Png, &EncodeOptions::default()).unwrap();
        assert_eq!(decode_image(&png).unwrap(), buf);
    }

    #[test]
    fn test_decode_gray_source_expands_to_rgb() {
        let buf = PixelBuffer::gray(2, 2, vec![10, 20, 30, 40]).unwrap();
        let png = encode_image(&buf, ImageFormat::Png, &EncodeOptions::default()).unwrap();
        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.channels(), Channels::Rgb);
        assert_eq!(&decoded.data()[..6], &[10, 10, 10, 20, 20, 20]);
    }

    #[test]
    fn test_decode_bmp() {
        let buf = PixelBuffer::filled(5, 2, Channels::Rgb, 200);
        let bmp = encode_image(&buf, ImageFormat::Bmp, &EncodeOptions::default()).unwrap();
        assert_eq!(decode_image(&bmp).unwrap(), buf);
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let jpeg = jpeg_with_orientation(6, 4, 1);
        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
    }

    #[test]
    fn test_exif_orientation_is_read() {
        assert_eq!(read_orientation(&jpeg_with_orientation(4, 2, 6)), Orientation::Rotate90CW);
        assert_eq!(read_orientation(&jpeg_with_orientation(4, 2, 3)), Orientation::Rotate180);
    }

    #[test]
    fn test_exif_rotation_applied() {
        let decoded = decode_image(&jpeg_with_orientation(6, 4, 6)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 6));
        let decoded = decode_image(&jpeg_with_orientation(6, 4, 3)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
    }

    #[test]
    fn test_no_exif_reads_normal() {
        let buf = PixelBuffer::filled(1, 1, Channels::Rgb, 0);
        let png = encode_image(&buf, ImageFormat::Png, &EncodeOptions::default()).unwrap();
        assert_eq!(read_orientation(&png), Orientation::Normal);
        assert_eq!(read_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_unrecognized_bytes() {
        assert_eq!(decode_image(&[0x00, 0x01, 0x02, 0x03]), Err(DecodeError::InvalidFormat));
        assert_eq!(decode_image(&[]), Err(DecodeError::InvalidFormat));
    }

    #[test]
    fn test_truncated_file_is_corrupted() {
        let buf = PixelBuffer::filled(8, 8, Channels::Rgb, 50);
        let png = encode_image(&buf, ImageFormat::Png, &EncodeOptions::default()).unwrap();
        let result = decode_image(&png[..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))), "{:?}", result);
    }
}
