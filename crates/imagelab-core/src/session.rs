//! Interactive editing state.
//!
//! An [`EditSession`] holds the loaded original, the latest result, the
//! selected method and its parameter values. Every `apply` starts again from
//! the original, so results never stack. Failed operations leave the last
//! good state in place.

use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_image, EncodeError, EncodeOptions, ImageFormat};
use crate::engine;
use crate::error::TransformError;
use crate::histogram::{self, HistogramResult};
use crate::params::ParameterSet;
use crate::registry::{self, Method};

/// Errors surfaced by [`EditSession`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    original: Option<PixelBuffer>,
    result: Option<PixelBuffer>,
    method: Method,
    params: ParameterSet,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Empty session with the first catalog method selected.
    pub fn new() -> Self {
        let method = Method::ALL[0];
        Self {
            original: None,
            result: None,
            method,
            params: registry::describe(method).default_params(),
        }
    }

    /// Decode `bytes` and make the image both original and result.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        match decode_image(bytes) {
            Ok(image) => {
                self.load_buffer(image);
                Ok(())
            }
            Err(e) => {
                log::warn!("load failed, keeping previous image: {}", e);
                Err(e.into())
            }
        }
    }

    /// Install an already-decoded image.
    pub fn load_buffer(&mut self, image: PixelBuffer) {
        log::debug!(
            "loaded {}x{}x{} image",
            image.width(),
            image.height(),
            image.channels().count()
        );
        self.result = Some(image.clone());
        self.original = Some(image);
    }

    /// Select a method and reset its parameters to defaults.
    pub fn select_method(&mut self, method: Method) {
        log::debug!("selected {}", method.id());
        self.method = method;
        self.params = registry::describe(method).default_params();
    }

    /// Set one parameter of the selected method.
    ///
    /// Unlike the engine, this rejects unknown names and out-of-range values.
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<(), SessionError> {
        let descriptor = registry::describe(self.method);
        let spec = descriptor.param(name).ok_or_else(|| TransformError::InvalidParameter {
            name: name.to_string(),
            value,
            reason: format!("not a parameter of {}", descriptor.id),
        })?;
        let value = spec.validate(value)?;
        self.params.set(name, value);
        Ok(())
    }

    /// Run the selected method on the original image.
    pub fn apply(&mut self) -> Result<&PixelBuffer, SessionError> {
        let original = self.original.as_ref().ok_or(TransformError::EmptyInput)?;
        match engine::apply(original, self.method, &self.params) {
            Ok(output) => Ok(self.result.insert(output)),
            Err(e) => {
                log::warn!("{} failed, keeping previous result: {}", self.method.id(), e);
                Err(e.into())
            }
        }
    }

    /// Replace the result with a copy of the original.
    pub fn reset(&mut self) {
        if let Some(original) = &self.original {
            log::debug!("reset to original");
            self.result = Some(original.clone());
        }
    }

    /// Encode the current result.
    pub fn save(
        &self,
        format: ImageFormat,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, SessionError> {
        let result = self.result.as_ref().ok_or(TransformError::EmptyInput)?;
        let bytes = encode_image(result, format, options).map_err(|e| {
            log::warn!("save failed: {}", e);
            e
        })?;
        log::debug!("encoded {} bytes as {}", bytes.len(), format.extension());
        Ok(bytes)
    }

    /// Histograms of `(original, result)`.
    pub fn histograms(&self, per_channel: bool) -> (HistogramResult, HistogramResult) {
        (
            histogram::compute(self.original.as_ref(), per_channel),
            histogram::compute(self.result.as_ref(), per_channel),
        )
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    pub fn result(&self) -> Option<&PixelBuffer> {
        self.result.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }
}
