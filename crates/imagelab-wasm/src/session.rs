//! Interactive session bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsEditSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! session.select_method('canny-edges');
//! session.set_param('threshold', 150);
//! const result = session.apply();
//! const png = session.save('png');
//! ```

use imagelab_core::EditSession;
use wasm_bindgen::prelude::*;

use crate::catalog::{parse_method, to_js};
use crate::codec::{options, parse_format};
use crate::histogram::JsHistogram;
use crate::types::JsPixelBuffer;

/// Load/apply/reset/save state for a single image.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditSession {
        Self::default()
    }

    /// Decode and load an image file. On failure the previous image is kept.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Load pixels directly.
    pub fn load_pixels(&mut self, image: &JsPixelBuffer) {
        self.inner.load_buffer(image.buffer().clone());
    }

    /// Select a method by id or display name and reset its parameters.
    pub fn select_method(&mut self, method_id: &str) -> Result<(), JsValue> {
        let method = parse_method(method_id)?;
        self.inner.select_method(method);
        Ok(())
    }

    /// Id of the selected method.
    #[wasm_bindgen(getter)]
    pub fn method_id(&self) -> String {
        self.inner.method().id().to_string()
    }

    /// Set a parameter of the selected method; out-of-range values are rejected.
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.inner
            .set_param(name, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current parameter values as a `{ name: value }` object.
    pub fn params(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.params())
    }

    /// Run the selected method on the original image and return a copy of the result.
    pub fn apply(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .apply()
            .map(|result| JsPixelBuffer::from_buffer(result.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Discard the result and show the original again.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Encode the result in the format named by a file name or extension.
    pub fn save(&self, file_name: &str, jpeg_quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
        let format = parse_format(file_name)?;
        self.inner
            .save(format, &options(jpeg_quality))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Copy of the loaded original, if any.
    pub fn original(&self) -> Option<JsPixelBuffer> {
        self.inner.original().cloned().map(JsPixelBuffer::from_buffer)
    }

    /// Copy of the current result, if any.
    pub fn result(&self) -> Option<JsPixelBuffer> {
        self.inner.result().cloned().map(JsPixelBuffer::from_buffer)
    }

    /// Histogram of the original (empty when nothing is loaded).
    pub fn original_histogram(&self, per_channel: bool) -> JsHistogram {
        self.inner.histograms(per_channel).0.into()
    }

    /// Histogram of the result (empty when nothing is loaded).
    pub fn result_histogram(&self, per_channel: bool) -> JsHistogram {
        self.inner.histograms(per_channel).1.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_image() -> JsEditSession {
        let mut session = JsEditSession::new();
        let image = JsPixelBuffer::try_new(3, 3, 3, vec![40u8; 27]).unwrap();
        session.load_pixels(&image);
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = JsEditSession::new();
        assert!(!session.has_image());
        assert!(session.result().is_none());
        assert!(session.original_histogram(true).is_empty());
        assert_eq!(session.method_id(), "image-negative");
    }

    #[test]
    fn test_apply_and_reset() {
        let mut session = session_with_image();
        let result = session.apply().unwrap();
        assert!(result.pixels().iter().all(|&v| v == 215));
        session.reset();
        assert_eq!(session.result().unwrap().pixels(), vec![40u8; 27]);
    }

    #[test]
    fn test_select_method_and_param() {
        let mut session = session_with_image();
        session.select_method("threshold").unwrap();
        assert_eq!(session.method_id(), "threshold");
        session.set_param("threshold", 30.0).unwrap();
        let result = session.apply().unwrap();
        assert_eq!(result.channels(), 1);
        assert!(result.pixels().iter().all(|&v| v == 255));
        assert_eq!(session.result_histogram(true).bins(0)[255], 9);
    }

    #[test]
    fn test_save_png() {
        let session = session_with_image();
        let bytes = session.save("png", None).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
