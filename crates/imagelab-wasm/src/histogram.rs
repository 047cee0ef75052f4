//! Histogram bindings.

use imagelab_core::histogram::{self, HistogramResult};
use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Histogram result accessible from JavaScript.
///
/// Holds zero series (no image), one gray series, or red/green/blue series,
/// each with 256 bins.
#[wasm_bindgen]
pub struct JsHistogram {
    labels: Vec<&'static str>,
    series: Vec<Vec<u32>>,
    max_value: u32,
    has_highlight_clipping: bool,
    has_shadow_clipping: bool,
}

#[wasm_bindgen]
impl JsHistogram {
    /// True when there was no image to measure.
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[wasm_bindgen(getter)]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Series labels in display order, e.g. `["Red", "Green", "Blue"]`.
    pub fn labels(&self) -> Array {
        self.labels.iter().map(|&l| JsValue::from_str(l)).collect()
    }

    /// Bins of the series at `index` (empty if out of range).
    pub fn bins(&self, index: usize) -> Vec<u32> {
        self.series.get(index).cloned().unwrap_or_default()
    }

    /// Largest bin count, for normalizing the plot.
    #[wasm_bindgen(getter)]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    #[wasm_bindgen(getter)]
    pub fn has_highlight_clipping(&self) -> bool {
        self.has_highlight_clipping
    }

    #[wasm_bindgen(getter)]
    pub fn has_shadow_clipping(&self) -> bool {
        self.has_shadow_clipping
    }
}

impl From<HistogramResult> for JsHistogram {
    fn from(hist: HistogramResult) -> Self {
        let series = hist.series();
        JsHistogram {
            labels: series.iter().map(|s| s.label).collect(),
            series: series.iter().map(|s| s.bins.to_vec()).collect(),
            max_value: hist.max_value(),
            has_highlight_clipping: hist.has_highlight_clipping(),
            has_shadow_clipping: hist.has_shadow_clipping(),
        }
    }
}

/// Compute the histogram of an image.
///
/// # Arguments
/// * `image` - Image to measure
/// * `per_channel` - For colour images, one series per channel instead of luma
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(image, true);
/// const red = hist.bins(0);          // Uint32Array[256]
/// const max = hist.max_value;
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(image: &JsPixelBuffer, per_channel: bool) -> JsHistogram {
    histogram::compute(Some(image.buffer()), per_channel).into()
}
