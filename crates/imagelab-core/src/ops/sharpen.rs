//! Fixed-kernel sharpening followed by an output gain.

use super::{convolve3x3, scale_lut, Border, Kernel3};
use crate::buffer::PixelBuffer;

/// Centre-weighted sharpening kernel (identity plus a negated 4-neighbour Laplacian).
pub const SHARPEN_KERNEL: Kernel3 = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Output gain applied after the sharpening kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpenParams {
    pub scale: f64,
}

impl SharpenParams {
    /// Build from a percentage factor (100 = unchanged gain).
    pub fn from_factor(factor: f64) -> Self {
        Self {
            scale: factor / 100.0,
        }
    }
}

/// Sharpen every channel, saturate to 8 bits, then apply
/// `clamp(round(scale * v), 0, 255)`. The border is mirrored around the edge
/// pixel.
pub fn sharpen(buffer: &PixelBuffer, params: SharpenParams) -> PixelBuffer {
    let sharpened = convolve3x3(
        buffer.data(),
        buffer.width() as usize,
        buffer.height() as usize,
        buffer.channels().count(),
        &SHARPEN_KERNEL,
        Border::Reflect101,
    );
    let lut = scale_lut(params.scale, 0.0);
    let data = sharpened
        .into_iter()
        .map(|v| lut[v.clamp(0, 255) as usize])
        .collect();
    buffer.with_data(data)
}
