//! 256-bin intensity histograms for display.
//!
//! A 1-channel image always yields a single gray series. A colour image yields
//! three series (red, green, blue) when `per_channel` is set, otherwise one
//! series over its luma.

use serde::Serialize;

use crate::buffer::{Channels, PixelBuffer};
use crate::luma::luma_u8;

/// Series labels for a colour histogram, in data order.
pub const CHANNEL_LABELS: [&str; 3] = ["Red", "Green", "Blue"];

/// Result of [`compute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HistogramResult {
    /// No image to measure.
    Empty,
    Gray {
        #[serde(with = "bins_serde")]
        bins: [u32; 256],
    },
    Color {
        #[serde(with = "bins_serde::triple")]
        bins: [[u32; 256]; 3],
    },
}

/// One labelled series of a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramSeries<'a> {
    pub label: &'static str,
    pub bins: &'a [u32; 256],
}

impl HistogramResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, HistogramResult::Empty)
    }

    /// Labelled series in display order (empty for [`HistogramResult::Empty`]).
    pub fn series(&self) -> Vec<HistogramSeries<'_>> {
        match self {
            HistogramResult::Empty => Vec::new(),
            HistogramResult::Gray { bins } => vec![HistogramSeries { label: "Gray", bins }],
            HistogramResult::Color { bins } => CHANNEL_LABELS
                .iter()
                .zip(bins.iter())
                .map(|(&label, bins)| HistogramSeries { label, bins })
                .collect(),
        }
    }

    /// Largest bin count across all series, for scaling a plot.
    pub fn max_value(&self) -> u32 {
        self.series()
            .iter()
            .flat_map(|s| s.bins.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Pixels counted by each series (equal for every series).
    pub fn total(&self) -> u64 {
        self.series()
            .first()
            .map(|s| s.bins.iter().map(|&c| c as u64).sum())
            .unwrap_or(0)
    }

    /// Any series has pixels at 255.
    pub fn has_highlight_clipping(&self) -> bool {
        self.series().iter().any(|s| s.bins[255] > 0)
    }

    /// Any series has pixels at 0.
    pub fn has_shadow_clipping(&self) -> bool {
        self.series().iter().any(|s| s.bins[0] > 0)
    }
}

/// Compute the histogram of `buffer`.
pub fn compute(buffer: Option<&PixelBuffer>, per_channel: bool) -> HistogramResult {
    let buffer = match buffer {
        Some(b) if !b.is_empty() => b,
        _ => return HistogramResult::Empty,
    };

    match buffer.channels() {
        Channels::Gray => {
            let mut bins = [0u32; 256];
            for &v in buffer.data() {
                bins[v as usize] += 1;
            }
            HistogramResult::Gray { bins }
        }
        Channels::Rgb if per_channel => {
            let mut bins = [[0u32; 256]; 3];
            for px in buffer.data().chunks_exact(3) {
                bins[0][px[0] as usize] += 1;
                bins[1][px[1] as usize] += 1;
                bins[2][px[2] as usize] += 1;
            }
            HistogramResult::Color { bins }
        }
        Channels::Rgb => {
            let mut bins = [0u32; 256];
            for px in buffer.data().chunks_exact(3) {
                bins[luma_u8(px[0], px[1], px[2]) as usize] += 1;
            }
            HistogramResult::Gray { bins }
        }
    }
}

/// serde only derives array impls up to 32 elements.
mod bins_serde {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bins: &[u32; 256], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(bins.iter())
    }

    pub mod triple {
        use serde::Serializer;

        pub fn serialize<S: Serializer>(
            bins: &[[u32; 256]; 3],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(bins.iter().map(|b| b.as_slice()))
        }
    }
}
