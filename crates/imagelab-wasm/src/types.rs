//! WASM-compatible wrapper for pixel buffers.

use imagelab_core::{Channels, PixelBuffer};
use wasm_bindgen::prelude::*;

/// An 8-bit image (1 or 3 channels) owned by WASM memory.
///
/// `pixels()` copies the data out as a `Uint8Array`. Use `to_rgba()` to get
/// bytes ready for a canvas `ImageData`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from interleaved pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - 1 for grayscale, 3 for RGB
    /// * `pixels` - Row-major pixel data
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<JsPixelBuffer, JsValue> {
        Self::try_new(width, height, channels, pixels)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// 1 for grayscale, 3 for RGB.
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels() as u8
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.data().len()
    }

    /// Copy of the raw pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.data().to_vec()
    }

    /// RGBA copy with opaque alpha, gray expanded to all three colour channels.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.pixel_count() * 4);
        match self.inner.channels() {
            Channels::Gray => {
                for &v in self.inner.data() {
                    out.extend_from_slice(&[v, v, v, 255]);
                }
            }
            Channels::Rgb => {
                for px in self.inner.data().chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
            }
        }
        out
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer also releases it.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn try_new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, imagelab_core::BufferError> {
        let channels = Channels::try_from(channels)?;
        PixelBuffer::new(width, height, channels, pixels).map(Self::from_buffer)
    }

    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}
