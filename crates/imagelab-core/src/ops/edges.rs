//! Edge detectors: Sobel magnitude, Laplacian and Canny.
//!
//! All three start from the luma plane and produce a 1-channel buffer.
//! Sobel and Laplacian mirror the border; Canny's gradients replicate it.

use super::{convolve3x3, Border, Kernel3};
use crate::buffer::PixelBuffer;
use crate::luma::luma_plane;

const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];
const LAPLACIAN: Kernel3 = [[0, 1, 0], [1, -4, 1], [0, 1, 0]];

/// tan(22.5°), boundary between horizontal/vertical and diagonal directions.
const TAN_22_5_DEG: f64 = 0.414_213_562_373_095;

/// Sobel gradient magnitude, scaled so the strongest edge in the frame is 255.
///
/// The scale depends on the frame's own maximum, so two images with the same
/// structure but different contrast produce the same map. A frame without any
/// gradient maps to all zeros.
pub fn sobel(buffer: &PixelBuffer) -> PixelBuffer {
    let plane = luma_plane(buffer);
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let gx = convolve3x3(&plane, width, height, 1, &SOBEL_X, Border::Reflect101);
    let gy = convolve3x3(&plane, width, height, 1, &SOBEL_Y, Border::Reflect101);

    let magnitude: Vec<f64> = gx
        .iter()
        .zip(&gy)
        .map(|(&x, &y)| ((x * x + y * y) as f64).sqrt())
        .collect();
    let max = magnitude.iter().copied().fold(0.0, f64::max);

    let data = if max > 0.0 {
        // Truncate like an unsigned 8-bit cast
        magnitude.iter().map(|&m| (255.0 * m / max) as u8).collect()
    } else {
        vec![0; magnitude.len()]
    };
    buffer.gray_like(data)
}

/// Absolute 4-neighbour Laplacian, clamped to 255.
pub fn laplacian(buffer: &PixelBuffer) -> PixelBuffer {
    let plane = luma_plane(buffer);
    let response = convolve3x3(
        &plane,
        buffer.width() as usize,
        buffer.height() as usize,
        1,
        &LAPLACIAN,
        Border::Reflect101,
    );
    let data = response.iter().map(|v| v.unsigned_abs().min(255) as u8).collect();
    buffer.gray_like(data)
}

/// Gradient direction quantized to one of four neighbour axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Gradient along x; compare left and right.
    Horizontal,
    /// Gradient along y; compare above and below.
    Vertical,
    /// Compare up-left and down-right.
    Diagonal,
    /// Compare up-right and down-left.
    AntiDiagonal,
}

impl Direction {
    fn of(gx: i32, gy: i32) -> Self {
        let (abs_x, abs_y) = (gx.unsigned_abs() as f64, gy.unsigned_abs() as f64);
        if abs_y <= abs_x * TAN_22_5_DEG {
            Direction::Horizontal
        } else if abs_x <= abs_y * TAN_22_5_DEG {
            Direction::Vertical
        } else if (gx >= 0) == (gy >= 0) {
            // Image y grows downward
            Direction::Diagonal
        } else {
            Direction::AntiDiagonal
        }
    }

    /// Offset `(dx, dy)` to the neighbour after the pixel.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (-1, 1),
        }
    }

    /// Axis-aligned directions are strict only against the neighbour before,
    /// so a flat-topped ridge keeps one pixel. Diagonals are strict on both
    /// sides.
    fn is_peak(self, mag: u32, before: u32, after: u32) -> bool {
        match self {
            Direction::Horizontal | Direction::Vertical => mag > before && mag >= after,
            Direction::Diagonal | Direction::AntiDiagonal => mag > before && mag > after,
        }
    }
}

/// Hysteresis thresholds for [`canny`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannyThresholds {
    pub low: u32,
    pub high: u32,
}

impl CannyThresholds {
    /// Derive both thresholds from one value: `low = value / 2`, `high = value`.
    pub fn from_upper(value: u32) -> Self {
        Self {
            low: value / 2,
            high: value,
        }
    }
}

/// Canny edge detector.
///
/// 1. Sobel gradients with L1 magnitude `|gx| + |gy|`
/// 2. Non-maximum suppression along the quantized gradient direction
/// 3. Hysteresis: pixels above `high` seed edges, which then grow through
///    8-connected pixels above `low`
///
/// Output is 255 on edges and 0 elsewhere. No pre-smoothing is applied.
pub fn canny(buffer: &PixelBuffer, thresholds: CannyThresholds) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let plane = luma_plane(buffer);
    let gx = convolve3x3(&plane, width, height, 1, &SOBEL_X, Border::Replicate);
    let gy = convolve3x3(&plane, width, height, 1, &SOBEL_Y, Border::Replicate);
    let magnitude: Vec<u32> = gx
        .iter()
        .zip(&gy)
        .map(|(x, y)| x.unsigned_abs() + y.unsigned_abs())
        .collect();

    let (low, high) = if thresholds.low > thresholds.high {
        (thresholds.high, thresholds.low)
    } else {
        (thresholds.low, thresholds.high)
    };

    let mag_at = |x: isize, y: isize| -> u32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    // Candidate map after non-maximum suppression: 0 = none, 1 = weak, 2 = strong.
    let mut state = vec![0u8; width * height];
    let mut stack = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let mag = magnitude[idx];
            if mag <= low {
                continue;
            }

            let (xi, yi) = (x as isize, y as isize);
            let direction = Direction::of(gx[idx], gy[idx]);
            let (dx, dy) = direction.step();
            let before = mag_at(xi - dx, yi - dy);
            let after = mag_at(xi + dx, yi + dy);

            if direction.is_peak(mag, before, after) {
                if mag > high {
                    state[idx] = 2;
                    stack.push(idx);
                } else {
                    state[idx] = 1;
                }
            }
        }
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % width) as isize, (idx / width) as isize);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if state[n] == 1 {
                    state[n] = 2;
                    stack.push(n);
                }
            }
        }
    }

    let data = state.iter().map(|&s| if s == 2 { 255 } else { 0 }).collect();
    buffer.gray_like(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    /// Left half `lo`, right half `hi`, as a colour image.
    fn step_edge(width: u32, height: u32, lo: u8, hi: u8) -> PixelBuffer {
        let mut data = Vec::new();
        for _y in 0..height {
            for x in 0..width {
                let v = if x < width / 2 { lo } else { hi };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::rgb(width, height, data).unwrap()
    }

    #[test]
    fn test_sobel_flat_image_is_zero() {
        let buf = PixelBuffer::filled(6, 4, Channels::Rgb, 200);
        let out = sobel(&buf);
        assert_eq!(out.channels(), Channels::Gray);
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sobel_step_edge_peaks_at_255() {
        let out = sobel(&step_edge(8, 4, 0, 100));
        let row = &out.data()[8..16];
        assert_eq!(row[3], 255);
        assert_eq!(row[4], 255);
        assert_eq!(row[0], 0);
        assert_eq!(row[7], 0);
    }

    #[test]
    fn test_sobel_normalizes_per_frame() {
        let weak = sobel(&step_edge(8, 4, 0, 20));
        let strong = sobel(&step_edge(8, 4, 0, 200));
        assert_eq!(weak, strong);
    }

    #[test]
    fn test_laplacian_flat_is_zero() {
        let out = laplacian(&PixelBuffer::filled(5, 5, Channels::Gray, 31));
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_laplacian_point() {
        let mut data = vec![0u8; 9];
        data[4] = 50;
        let out = laplacian(&PixelBuffer::gray(3, 3, data).unwrap());
        // Centre: -4 * 50, absolute value 200
        assert_eq!(out.data()[4], 200);
        // Top-middle sees the centre below and, mirrored, above it too
        assert_eq!(out.data()[1], 100);
        assert_eq!(out.data()[3], 100);
        // Corners only reach mirrored zeros
        assert_eq!(out.data()[0], 0);
    }

    #[test]
    fn test_laplacian_mirrors_border_without_repeating_edge() {
        // Ramp 0, 10, 20, 30: a linear row has no second derivative inside,
        // and at the ends the mirrored neighbour equals the inner one.
        let data = vec![0u8, 10, 20, 30];
        let out = laplacian(&PixelBuffer::gray(4, 1, data).unwrap());
        // x = 0: 10 + 10 - 2 * 0 = 20; x = 3: 20 + 20 - 2 * 30 = -20
        assert_eq!(out.data(), &[20, 0, 0, 20]);
    }

    #[test]
    fn test_sobel_border_column_is_zero_on_vertical_step() {
        // Mirrored left neighbour equals the right one, so column 0 of a
        // horizontal step has no x-gradient.
        let out = sobel(&step_edge(6, 3, 0, 90));
        for y in 0..3 {
            assert_eq!(out.data()[y * 6], 0);
            assert_eq!(out.data()[y * 6 + 5], 0);
        }
    }

    #[test]
    fn test_laplacian_clamps() {
        let mut data = vec![0u8; 9];
        data[4] = 255;
        let out = laplacian(&PixelBuffer::gray(3, 3, data).unwrap());
        assert_eq!(out.data()[4], 255);
    }

    #[test]
    fn test_canny_thresholds_from_upper() {
        assert_eq!(CannyThresholds::from_upper(100), CannyThresholds { low: 50, high: 100 });
        assert_eq!(CannyThresholds::from_upper(11), CannyThresholds { low: 5, high: 11 });
    }

    #[test]
    fn test_canny_flat_has_no_edges() {
        let flat = PixelBuffer::filled(8, 8, Channels::Rgb, 90);
        let out = canny(&flat, CannyThresholds::from_upper(100));
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_step_edge_is_thin_vertical_line() {
        let out = canny(&step_edge(10, 6, 0, 200), CannyThresholds::from_upper(100));
        assert!(out.data().iter().all(|&v| v == 0 || v == 255));
        for y in 0..6 {
            let row = &out.data()[y * 10..(y + 1) * 10];
            let count = row.iter().filter(|&&v| v == 255).count();
            assert_eq!(count, 1, "row {} should contain exactly one edge pixel: {:?}", y, row);
            assert_eq!(row[4], 255);
        }
    }

    #[test]
    fn test_direction_quantization() {
        assert_eq!(Direction::of(10, 0), Direction::Horizontal);
        assert_eq!(Direction::of(-10, 4), Direction::Horizontal);
        assert_eq!(Direction::of(0, -10), Direction::Vertical);
        assert_eq!(Direction::of(10, 10), Direction::Diagonal);
        assert_eq!(Direction::of(-10, -10), Direction::Diagonal);
        assert_eq!(Direction::of(10, -10), Direction::AntiDiagonal);
    }

    #[test]
    fn test_peak_ties_by_direction() {
        // A tie with the neighbour after survives only on the axis directions.
        assert!(Direction::Horizontal.is_peak(10, 5, 10));
        assert!(Direction::Vertical.is_peak(10, 5, 10));
        assert!(!Direction::Diagonal.is_peak(10, 5, 10));
        assert!(!Direction::AntiDiagonal.is_peak(10, 5, 10));
        // A tie with the neighbour before never survives
        assert!(!Direction::Horizontal.is_peak(10, 10, 5));
        assert!(Direction::Diagonal.is_peak(10, 9, 9));
    }

    #[test]
    fn test_canny_high_threshold_suppresses_weak_edge() {
        // Step of 20 gives an L1 magnitude of 80, below a high threshold of 300.
        let out = canny(&step_edge(10, 6, 0, 20), CannyThresholds::from_upper(300));
        assert!(out.data().iter().all(|&v| v == 0));
    }
}
