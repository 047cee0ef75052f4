//! Image encoding for saving results.
//!
//! A [`PixelBuffer`](crate::PixelBuffer) is written as PNG, JPEG or BMP.
//! 1-channel buffers are stored as 8-bit grayscale and 3-channel buffers as
//! 8-bit RGB. The target format usually comes from the save path's extension
//! ([`ImageFormat::from_extension`]).

mod writer;

pub use writer::{
    encode_image, encode_pixels, EncodeError, EncodeOptions, ImageFormat, DEFAULT_JPEG_QUALITY,
};
