//! Smoothing filters: Gaussian, median and bilateral.
//!
//! All three work on every channel of the input and keep its channel count.
//! Gaussian and median replace pixels outside the image by the nearest edge
//! pixel; bilateral mirrors the image around the edge pixel.

use super::{reflect101, replicate};
use crate::buffer::PixelBuffer;

/// Largest accepted blur kernel.
pub const MAX_BLUR_KERNEL: usize = 31;

/// Odd square kernel size for Gaussian and median blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurKernel(usize);

impl BlurKernel {
    /// Normalize a requested size: clamp to `[1, 31]`, then bump even sizes
    /// to the next odd number.
    pub fn new(requested: i64) -> Self {
        let k = requested.clamp(1, MAX_BLUR_KERNEL as i64) as usize;
        if k % 2 == 0 {
            Self(k + 1)
        } else {
            Self(k)
        }
    }

    #[inline]
    pub fn size(self) -> usize {
        self.0
    }

    #[inline]
    pub fn radius(self) -> usize {
        self.0 / 2
    }
}

/// 1D Gaussian taps for an odd kernel size.
///
/// Sizes up to 7 use the classic binomial tables; larger sizes derive
/// `sigma = 0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_taps(kernel: BlurKernel) -> Vec<f32> {
    match kernel.size() {
        1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
        k => {
            let sigma = 0.3 * ((k as f64 - 1.0) * 0.5 - 1.0) + 0.8;
            let scale = -0.5 / (sigma * sigma);
            let center = (k / 2) as f64;
            let raw: Vec<f64> = (0..k)
                .map(|i| {
                    let d = i as f64 - center;
                    (scale * d * d).exp()
                })
                .collect();
            let sum: f64 = raw.iter().sum();
            raw.into_iter().map(|w| (w / sum) as f32).collect()
        }
    }
}

/// Separable Gaussian blur with a `k x k` kernel.
pub fn gaussian_blur(buffer: &PixelBuffer, kernel: BlurKernel) -> PixelBuffer {
    if kernel.size() == 1 || buffer.is_empty() {
        return buffer.clone();
    }

    let taps = gaussian_taps(kernel);
    let radius = kernel.radius() as isize;
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let channels = buffer.channels().count();
    let src = buffer.data();

    // Horizontal pass
    let mut horizontal = vec![0f32; src.len()];
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0f32;
                for (i, &tap) in taps.iter().enumerate() {
                    let xx = replicate(x as isize + i as isize - radius, width);
                    acc += tap * src[(row + xx) * channels + c] as f32;
                }
                horizontal[(row + x) * channels + c] = acc;
            }
        }
    }

    // Vertical pass
    let mut out = vec![0u8; src.len()];
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0f32;
                for (i, &tap) in taps.iter().enumerate() {
                    let yy = replicate(y as isize + i as isize - radius, height);
                    acc += tap * horizontal[(yy * width + x) * channels + c];
                }
                out[(y * width + x) * channels + c] = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    buffer.with_data(out)
}

/// Median of the `k x k` neighbourhood, per channel.
pub fn median_blur(buffer: &PixelBuffer, kernel: BlurKernel) -> PixelBuffer {
    if kernel.size() == 1 || buffer.is_empty() {
        return buffer.clone();
    }

    let radius = kernel.radius() as isize;
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let channels = buffer.channels().count();
    let src = buffer.data();
    let mut out = vec![0u8; src.len()];
    let mut window = Vec::with_capacity(kernel.size() * kernel.size());
    let mid = kernel.size() * kernel.size() / 2;

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                window.clear();
                for dy in -radius..=radius {
                    let yy = replicate(y as isize + dy, height);
                    for dx in -radius..=radius {
                        let xx = replicate(x as isize + dx, width);
                        window.push(src[(yy * width + xx) * channels + c]);
                    }
                }
                let (_, median, _) = window.select_nth_unstable(mid);
                out[(y * width + x) * channels + c] = *median;
            }
        }
    }

    buffer.with_data(out)
}

/// Settings for [`bilateral_filter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilateralParams {
    /// Window diameter in pixels; the window is the disc of radius `diameter / 2`.
    pub diameter: usize,
    /// Intensity-difference falloff.
    pub sigma_color: f64,
    /// Spatial-distance falloff.
    pub sigma_space: f64,
}

impl BilateralParams {
    /// Sigma used for both falloffs by the Bilateral Filter method.
    pub const DEFAULT_SIGMA: f64 = 75.0;

    pub fn with_diameter(diameter: usize) -> Self {
        Self {
            diameter,
            sigma_color: Self::DEFAULT_SIGMA,
            sigma_space: Self::DEFAULT_SIGMA,
        }
    }
}

/// Edge-preserving smoothing.
///
/// Each neighbour is weighted by `exp(-r^2 / 2 sigma_space^2)` for its distance
/// `r` and by `exp(-d^2 / 2 sigma_color^2)` where `d` is the sum of absolute
/// channel differences to the centre pixel.
pub fn bilateral_filter(buffer: &PixelBuffer, params: BilateralParams) -> PixelBuffer {
    let radius = (params.diameter / 2) as isize;
    if radius == 0 || buffer.is_empty() {
        return buffer.clone();
    }

    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let channels = buffer.channels().count();
    let src = buffer.data();

    let space_coeff = -0.5 / (params.sigma_space * params.sigma_space);
    let color_coeff = -0.5 / (params.sigma_color * params.sigma_color);

    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dy * dy + dx * dx) as f64;
            if r2.sqrt() <= radius as f64 {
                offsets.push((dy, dx, (r2 * space_coeff).exp()));
            }
        }
    }

    let color_weights: Vec<f64> = (0..=255 * channels)
        .map(|d| ((d * d) as f64 * color_coeff).exp())
        .collect();

    let mut out = vec![0u8; src.len()];
    let mut acc = vec![0f64; channels];
    for y in 0..height {
        for x in 0..width {
            let center = (y * width + x) * channels;
            acc.iter_mut().for_each(|a| *a = 0.0);
            let mut weight_sum = 0f64;

            for &(dy, dx, space_weight) in &offsets {
                let yy = reflect101(y as isize + dy, height);
                let xx = reflect101(x as isize + dx, width);
                let neighbor = (yy * width + xx) * channels;

                let diff: usize = (0..channels)
                    .map(|c| src[neighbor + c].abs_diff(src[center + c]) as usize)
                    .sum();
                let weight = space_weight * color_weights[diff];

                for (c, a) in acc.iter_mut().enumerate() {
                    *a += weight * src[neighbor + c] as f64;
                }
                weight_sum += weight;
            }

            for (c, a) in acc.iter().enumerate() {
                out[center + c] = (a / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    buffer.with_data(out)
}
