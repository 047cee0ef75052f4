//! Decode/encode bindings.
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const png = encode_image(image, 'png');
//! const jpeg = encode_image(image, 'result.jpg', 85);
//! ```

use imagelab_core::{decode, encode, EncodeOptions, ImageFormat};
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Decode PNG/JPEG/BMP bytes into an RGB image, applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image in the format named by a file name or bare extension
/// (`"png"`, `"result.jpg"`, `"bmp"`...).
///
/// `jpeg_quality` defaults to 95.
#[wasm_bindgen]
pub fn encode_image(
    image: &JsPixelBuffer,
    file_name: &str,
    jpeg_quality: Option<u8>,
) -> Result<Vec<u8>, JsValue> {
    let format = parse_format(file_name)?;
    encode::encode_image(image.buffer(), format, &options(jpeg_quality))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type for a file name or extension, e.g. for building a `Blob`.
#[wasm_bindgen]
pub fn mime_type(file_name: &str) -> Option<String> {
    ImageFormat::from_path(file_name).map(|f| f.mime_type().to_string())
}

/// Canonical extension for a file name or extension (`"photo.JPEG"` -> `"jpg"`).
#[wasm_bindgen]
pub fn canonical_extension(file_name: &str) -> Option<String> {
    ImageFormat::from_path(file_name).map(|f| f.extension().to_string())
}

pub(crate) fn parse_format(file_name: &str) -> Result<ImageFormat, JsValue> {
    ImageFormat::from_path(file_name)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported output format: {}", file_name)))
}

pub(crate) fn options(jpeg_quality: Option<u8>) -> EncodeOptions {
    let mut options = EncodeOptions::default();
    if let Some(quality) = jpeg_quality {
        options.jpeg_quality = quality;
    }
    options
}
