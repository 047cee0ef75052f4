//! Per-value transforms: every output byte depends only on the input byte at
//! the same position, so both are implemented with a 256-entry lookup table.

use super::scale_lut;
use crate::buffer::PixelBuffer;

/// Invert every channel: `255 - v`.
pub fn negative(buffer: &PixelBuffer) -> PixelBuffer {
    let data = buffer.data().iter().map(|&v| 255 - v).collect();
    buffer.with_data(data)
}

/// Linear brightness/contrast adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessContrast {
    /// Added offset (-100 to 100)
    pub brightness: f64,
    /// Multiplicative gain (0.5 to 3.0)
    pub contrast: f64,
}

impl Default for BrightnessContrast {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
        }
    }
}

impl BrightnessContrast {
    /// Check if the adjustment leaves pixels unchanged
    pub fn is_identity(&self) -> bool {
        self.brightness == 0.0 && self.contrast == 1.0
    }
}

/// Apply `clamp(round(contrast * v + brightness), 0, 255)` to every channel.
pub fn brightness_contrast(buffer: &PixelBuffer, adjustment: BrightnessContrast) -> PixelBuffer {
    if adjustment.is_identity() {
        return buffer.clone();
    }
    let lut = scale_lut(adjustment.contrast, adjustment.brightness);
    let data = buffer.data().iter().map(|&v| lut[v as usize]).collect();
    buffer.with_data(data)
}
