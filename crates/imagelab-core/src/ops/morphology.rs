//! Binary morphology with a square structuring element.
//!
//! The input is first binarized at a fixed threshold of 127. Erosion takes
//! the minimum and dilation the maximum over the `k x k` window anchored at
//! `k / 2`. Window positions outside the image are ignored, so a shape that
//! touches the border is not eroded by the border itself.
//!
//! A square window is separable, so each pass runs as a row sweep followed by
//! a column sweep. The sweeps count on-pixels with prefix sums, so large
//! elements cost no more than small ones.

use super::tone::binarize;
use crate::buffer::PixelBuffer;

/// Side length of the square structuring element (always `>= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement(usize);

impl StructuringElement {
    /// Sizes are capped at `i32::MAX` so they fit `usize` on 32-bit targets.
    pub fn new(requested: i64) -> Self {
        Self(requested.clamp(1, i32::MAX as i64) as usize)
    }

    #[inline]
    pub fn size(self) -> usize {
        self.0
    }

    /// Window offsets `(before, after)` relative to the anchor.
    #[inline]
    fn reach(self) -> (usize, usize) {
        let before = self.0 / 2;
        (before, self.0 - 1 - before)
    }
}

/// Morphological operation to run after binarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    /// Erosion then dilation: removes specks smaller than the element.
    Open,
    /// Dilation then erosion: fills gaps smaller than the element.
    Close,
    Dilate,
    Erode,
}

/// Binarize `buffer` and apply `op` with a square element.
pub fn morphology(buffer: &PixelBuffer, op: MorphOp, element: StructuringElement) -> PixelBuffer {
    let binary = binarize(buffer);
    let width = binary.width() as usize;
    let height = binary.height() as usize;
    let plane = binary.data();

    let data = match op {
        MorphOp::Erode => erode(plane, width, height, element),
        MorphOp::Dilate => dilate(plane, width, height, element),
        MorphOp::Open => {
            let eroded = erode(plane, width, height, element);
            dilate(&eroded, width, height, element)
        }
        MorphOp::Close => {
            let dilated = dilate(plane, width, height, element);
            erode(&dilated, width, height, element)
        }
    };
    binary.with_data(data)
}

/// Binary erosion: a pixel stays on only if every in-image pixel of its
/// window is on. Nonzero input counts as on; output is 0 or 255.
pub fn erode(plane: &[u8], width: usize, height: usize, element: StructuringElement) -> Vec<u8> {
    window_filter(plane, width, height, element, Rank::All)
}

/// Binary dilation: a pixel turns on if any in-image pixel of its window is
/// on. Nonzero input counts as on; output is 0 or 255.
pub fn dilate(plane: &[u8], width: usize, height: usize, element: StructuringElement) -> Vec<u8> {
    window_filter(plane, width, height, element, Rank::Any)
}

#[derive(Debug, Clone, Copy)]
enum Rank {
    All,
    Any,
}

impl Rank {
    #[inline]
    fn keep(self, on: u32, len: usize) -> u8 {
        let hit = match self {
            Rank::All => on as usize == len,
            Rank::Any => on > 0,
        };
        if hit {
            255
        } else {
            0
        }
    }
}

/// Clipped window `[start, end]` around `i` on an axis of `len` pixels.
#[inline]
fn window(i: usize, len: usize, before: usize, after: usize) -> (usize, usize) {
    (i.saturating_sub(before), i.saturating_add(after).min(len - 1))
}

/// Separable window test over a binary plane.
///
/// Each sweep keeps running counts of on-pixels, so the cost per pixel does
/// not depend on the element size.
fn window_filter(
    plane: &[u8],
    width: usize,
    height: usize,
    element: StructuringElement,
    rank: Rank,
) -> Vec<u8> {
    if width == 0 || height == 0 {
        return plane.to_vec();
    }
    let (before, after) = element.reach();

    // Row sweep: window runs along x
    let mut rows = vec![0u8; plane.len()];
    let mut prefix = vec![0u32; width + 1];
    for y in 0..height {
        let line = &plane[y * width..(y + 1) * width];
        for (x, &v) in line.iter().enumerate() {
            prefix[x + 1] = prefix[x] + u32::from(v != 0);
        }
        for x in 0..width {
            let (start, end) = window(x, width, before, after);
            rows[y * width + x] = rank.keep(prefix[end + 1] - prefix[start], end - start + 1);
        }
    }

    // Column sweep: window runs along y, with prefixes for every column at once
    let mut columns = vec![0u32; (height + 1) * width];
    for y in 0..height {
        for x in 0..width {
            let on = u32::from(rows[y * width + x] != 0);
            columns[(y + 1) * width + x] = columns[y * width + x] + on;
        }
    }
    let mut out = vec![0u8; plane.len()];
    for y in 0..height {
        let (start, end) = window(y, height, before, after);
        for x in 0..width {
            let on = columns[(end + 1) * width + x] - columns[start * width + x];
            out[y * width + x] = rank.keep(on, end - start + 1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    /// 7x7 binary plane with a filled square from (2,2) to (4,4).
    fn square() -> Vec<u8> {
        let mut plane = vec![0u8; 49];
        for y in 2..=4 {
            for x in 2..=4 {
                plane[y * 7 + x] = 255;
            }
        }
        plane
    }

    fn count_on(plane: &[u8]) -> usize {
        plane.iter().filter(|&&v| v == 255).count()
    }

    #[test]
    fn test_element_minimum() {
        assert_eq!(StructuringElement::new(-3).size(), 1);
        assert_eq!(StructuringElement::new(0).size(), 1);
        assert_eq!(StructuringElement::new(40).size(), 40);
    }

    #[test]
    fn test_element_reach() {
        assert_eq!(StructuringElement::new(3).reach(), (1, 1));
        assert_eq!(StructuringElement::new(4).reach(), (2, 1));
    }

    #[test]
    fn test_erode_shrinks_square() {
        let out = erode(&square(), 7, 7, StructuringElement::new(3));
        assert_eq!(count_on(&out), 1);
        assert_eq!(out[3 * 7 + 3], 255);
    }

    #[test]
    fn test_dilate_grows_square() {
        let out = dilate(&square(), 7, 7, StructuringElement::new(3));
        assert_eq!(count_on(&out), 25);
        assert_eq!(out[7 + 1], 255);
        assert_eq!(out[0], 0);
    }

    #[test]
    fn test_element_larger_than_plane() {
        let mut plane = vec![0u8; 12];
        plane[5] = 255;
        let element = StructuringElement::new(i64::MAX);
        assert!(dilate(&plane, 4, 3, element).iter().all(|&v| v == 255));
        assert!(erode(&plane, 4, 3, element).iter().all(|&v| v == 0));
        assert!(erode(&[255u8; 12], 4, 3, element).iter().all(|&v| v == 255));
    }

    #[test]
    fn test_size_one_is_identity() {
        let plane = square();
        assert_eq!(erode(&plane, 7, 7, StructuringElement::new(1)), plane);
        assert_eq!(dilate(&plane, 7, 7, StructuringElement::new(1)), plane);
    }

    #[test]
    fn test_border_does_not_erode() {
        let plane = vec![255u8; 16];
        let out = erode(&plane, 4, 4, StructuringElement::new(3));
        assert_eq!(out, plane);
    }

    #[test]
    fn test_open_removes_speck() {
        let mut data = vec![0u8; 49];
        data[3 * 7 + 3] = 255;
        let buf = PixelBuffer::gray(7, 7, data).unwrap();
        let out = morphology(&buf, MorphOp::Open, StructuringElement::new(3));
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_open_keeps_large_square() {
        let buf = PixelBuffer::gray(7, 7, square()).unwrap();
        let out = morphology(&buf, MorphOp::Open, StructuringElement::new(3));
        assert_eq!(out.data(), square().as_slice());
    }

    #[test]
    fn test_close_fills_hole() {
        let mut data = square();
        data[3 * 7 + 3] = 0;
        let buf = PixelBuffer::gray(7, 7, data).unwrap();
        let out = morphology(&buf, MorphOp::Close, StructuringElement::new(3));
        assert_eq!(out.data(), square().as_slice());
    }

    #[test]
    fn test_morphology_binarizes_colour_input() {
        let buf = PixelBuffer::filled(3, 3, Channels::Rgb, 200);
        let out = morphology(&buf, MorphOp::Dilate, StructuringElement::new(2));
        assert_eq!(out.channels(), Channels::Gray);
        assert!(out.data().iter().all(|&v| v == 255));
    }
}
