//! Grayscale-producing tone operations.

use crate::buffer::PixelBuffer;
use crate::luma::{luma_plane, to_grayscale};

/// Fixed cut-off used to binarize images before morphology.
pub const BINARY_THRESHOLD: u8 = 127;

/// Luma conversion to a 1-channel buffer.
pub fn grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    to_grayscale(buffer)
}

/// Histogram equalization on the luma plane.
///
/// Each intensity `v` maps to `round(255 * CDF(v) / total_pixels)`, where
/// `CDF(v)` counts pixels with intensity `<= v`.
pub fn equalize_histogram(buffer: &PixelBuffer) -> PixelBuffer {
    let plane = luma_plane(buffer);
    let total = plane.len() as u64;
    if total == 0 {
        return buffer.gray_like(plane);
    }

    let mut bins = [0u64; 256];
    for &v in &plane {
        bins[v as usize] += 1;
    }

    let mut lut = [0u8; 256];
    let mut cdf = 0u64;
    for (slot, count) in lut.iter_mut().zip(bins.iter()) {
        cdf += count;
        // Integer round-half-up of 255 * cdf / total
        *slot = ((255 * cdf * 2 + total) / (total * 2)).min(255) as u8;
    }

    let data = plane.iter().map(|&v| lut[v as usize]).collect();
    buffer.gray_like(data)
}

/// Binary threshold on the luma plane: `255` where `v > cutoff`, else `0`.
pub fn threshold(buffer: &PixelBuffer, cutoff: u8) -> PixelBuffer {
    let data = luma_plane(buffer)
        .into_iter()
        .map(|v| if v > cutoff { 255 } else { 0 })
        .collect();
    buffer.gray_like(data)
}

/// Threshold at [`BINARY_THRESHOLD`], the input stage of every morphology method.
pub fn binarize(buffer: &PixelBuffer) -> PixelBuffer {
    threshold(buffer, BINARY_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    #[test]
    fn test_grayscale_is_single_channel() {
        let buf = PixelBuffer::filled(3, 2, Channels::Rgb, 90);
        let out = grayscale(&buf);
        assert_eq!(out.channels(), Channels::Gray);
        assert_eq!(out.data(), &[90; 6]);
    }

    #[test]
    fn test_threshold_greater_than_semantics() {
        let buf = PixelBuffer::filled(4, 4, Channels::Rgb, 127);
        assert!(threshold(&buf, 127).data().iter().all(|&v| v == 0));
        assert!(threshold(&buf, 126).data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_threshold_mixed_values() {
        let buf = PixelBuffer::gray(4, 1, vec![0, 100, 101, 255]).unwrap();
        let out = threshold(&buf, 100);
        assert_eq!(out.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_binarize_uses_127() {
        let buf = PixelBuffer::gray(3, 1, vec![127, 128, 20]).unwrap();
        assert_eq!(binarize(&buf).data(), &[0, 255, 0]);
    }

    #[test]
    fn test_equalize_two_levels() {
        // Half the pixels at 10, half at 20.
        let buf = PixelBuffer::gray(4, 1, vec![10, 10, 20, 20]).unwrap();
        let out = equalize_histogram(&buf);
        // CDF(10) = 2/4 -> 127.5 -> 128, CDF(20) = 4/4 -> 255
        assert_eq!(out.data(), &[128, 128, 255, 255]);
    }

    #[test]
    fn test_equalize_solid_image_maps_to_white() {
        let buf = PixelBuffer::filled(5, 5, Channels::Rgb, 42);
        let out = equalize_histogram(&buf);
        assert_eq!(out.channels(), Channels::Gray);
        assert!(out.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_equalize_gradient_spreads_range() {
        let data: Vec<u8> = (100..164).collect();
        let buf = PixelBuffer::gray(64, 1, data).unwrap();
        let out = equalize_histogram(&buf);
        assert_eq!(out.data()[0], 4); // round(255 / 64)
        assert_eq!(out.data()[63], 255);
        assert!(out.data().windows(2).all(|w| w[0] <= w[1]));
    }
}
