//! Pixel transform implementations.
//!
//! Every function here is stateless: it takes a borrowed [`PixelBuffer`] plus
//! an already-normalized parameter record and returns a new buffer.
//!
//! # Border handling
//!
//! Neighbourhood operations pick a [`Border`] rule for positions outside the
//! image. Gaussian, median and Canny gradients replicate the nearest edge
//! pixel. Sobel, Laplacian, sharpen and bilateral mirror the image around the
//! edge pixel without repeating it (`dcb|abcd|cba`). Morphology ignores
//! positions outside the image, so a border never erodes or dilates a shape by
//! itself.
//!
//! # Modules
//!
//! - [`point`] - per-value mappings (negative, brightness/contrast)
//! - [`tone`] - grayscale, histogram equalization, thresholding
//! - [`blur`] - Gaussian, median and bilateral smoothing
//! - [`edges`] - Sobel, Laplacian and Canny edge maps
//! - [`morphology`] - binary erosion/dilation and their compositions
//! - [`sharpen`] - fixed-kernel sharpening with output scaling

pub mod blur;
pub mod edges;
pub mod morphology;
pub mod point;
pub mod sharpen;
pub mod tone;

pub use blur::{bilateral_filter, gaussian_blur, median_blur, BilateralParams, BlurKernel};
pub use edges::{canny, laplacian, sobel, CannyThresholds};
pub use morphology::{morphology, MorphOp, StructuringElement};
pub use point::{brightness_contrast, negative, BrightnessContrast};
pub use sharpen::{sharpen, SharpenParams};
pub use tone::{equalize_histogram, grayscale, threshold};

/// 3x3 integer kernel, row-major.
pub(crate) type Kernel3 = [[i32; 3]; 3];

/// Clamp a possibly out-of-range coordinate onto `[0, len)`.
#[inline]
pub(crate) fn replicate(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Mirror a possibly out-of-range coordinate around the edge pixel
/// (`-1 -> 1`, `len -> len - 2`), repeating as often as needed.
#[inline]
pub(crate) fn reflect101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let m = i.rem_euclid(period);
    if m >= len as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

/// How neighbourhood operations read pixels outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Border {
    /// `aaa|abcd|ddd`
    Replicate,
    /// `dcb|abcd|cba`
    Reflect101,
}

impl Border {
    #[inline]
    pub(crate) fn index(self, i: isize, len: usize) -> usize {
        match self {
            Border::Replicate => replicate(i, len),
            Border::Reflect101 => reflect101(i, len),
        }
    }
}

/// Convolve interleaved `data` with a 3x3 kernel, channel by channel.
///
/// Output keeps the input layout and is left unsaturated so callers can take
/// magnitudes or absolute values first.
pub(crate) fn convolve3x3(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel3,
    border: Border,
) -> Vec<i32> {
    let mut out = vec![0i32; data.len()];
    if width == 0 || height == 0 {
        return out;
    }

    for y in 0..height {
        let rows = [
            border.index(y as isize - 1, height),
            y,
            border.index(y as isize + 1, height),
        ];
        for x in 0..width {
            let cols = [
                border.index(x as isize - 1, width),
                x,
                border.index(x as isize + 1, width),
            ];
            for c in 0..channels {
                let mut sum = 0i32;
                for (ky, &yy) in rows.iter().enumerate() {
                    let row = yy * width;
                    for (kx, &xx) in cols.iter().enumerate() {
                        let weight = kernel[ky][kx];
                        if weight != 0 {
                            sum += weight * data[(row + xx) * channels + c] as i32;
                        }
                    }
                }
                out[(y * width + x) * channels + c] = sum;
            }
        }
    }
    out
}

/// Build a lookup table for `clamp(round(alpha * v + beta), 0, 255)`.
pub(crate) fn scale_lut(alpha: f64, beta: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        *slot = (alpha * v as f64 + beta).round().clamp(0.0, 255.0) as u8;
    }
    lut
}
