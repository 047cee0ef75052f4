//! In-memory raster representation shared by every transform.
//!
//! A [`PixelBuffer`] is either 1-channel grayscale or 3-channel colour, stored
//! row-major with interleaved channels. Colour buffers use R,G,B byte order,
//! which is what the `image` crate decodes to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a buffer from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The byte length does not equal `width * height * channels`.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Only 1 (grayscale) and 3 (colour) channels are supported.
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(u8),
}

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channels {
    /// Single intensity channel.
    Gray = 1,
    /// Interleaved red, green, blue.
    Rgb = 3,
}

impl Channels {
    /// Number of bytes per pixel.
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Channels {
    type Error = BufferError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            other => Err(BufferError::UnsupportedChannels(other)),
        }
    }
}

/// An owned raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, checking that `data` matches the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a 1-channel buffer.
    pub fn gray(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        Self::new(width, height, Channels::Gray, data)
    }

    /// Create a 3-channel RGB buffer.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        Self::new(width, height, Channels::Rgb, data)
    }

    /// Create a buffer where every byte is `value`.
    pub fn filled(width: u32, height: u32, channels: Channels, value: u8) -> Self {
        let len = width as usize * height as usize * channels.count();
        Self {
            width,
            height,
            channels,
            data: vec![value; len],
        }
    }

    /// Build a buffer of the same shape as `self` with new bytes.
    ///
    /// Used by per-channel transforms, which never change dimensions.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len(), "Pixel buffer size mismatch");
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
        }
    }

    /// Build a 1-channel buffer with the dimensions of `self`.
    pub(crate) fn gray_like(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.pixel_count(), "Pixel buffer size mismatch");
        Self {
            width: self.width,
            height: self.height,
            channels: Channels::Gray,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw interleaved bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels (not bytes).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}
