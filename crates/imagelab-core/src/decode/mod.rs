//! Image decoding.
//!
//! Supported inputs are whatever the enabled `image` codecs read (PNG, JPEG,
//! BMP). Every decoded image comes back as a 3-channel RGB
//! [`PixelBuffer`](crate::PixelBuffer) with EXIF orientation applied.
//!
//! # Examples
//!
//! ```ignore
//! use imagelab_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_image, read_orientation};
pub use types::{DecodeError, Orientation};
