//! Luma (perceptual grayscale) conversion using ITU-R BT.601 weights.
//!
//! Every method that produces a 1-channel image starts from this conversion,
//! and the merged histogram uses it as well.

use crate::buffer::{Channels, PixelBuffer};

/// ITU-R BT.601 weight for the red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 weight for the green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 weight for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Luma of a single RGB pixel, rounded to nearest and clamped to 0-255.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Luma plane of a buffer, one byte per pixel.
///
/// Grayscale input is returned as a copy of its data.
pub fn luma_plane(buffer: &PixelBuffer) -> Vec<u8> {
    match buffer.channels() {
        Channels::Gray => buffer.data().to_vec(),
        Channels::Rgb => buffer
            .data()
            .chunks_exact(3)
            .map(|px| luma_u8(px[0], px[1], px[2]))
            .collect(),
    }
}

/// Convert a buffer to a 1-channel grayscale buffer.
pub fn to_grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    buffer.gray_like(luma_plane(buffer))
}
