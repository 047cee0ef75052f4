//! Error types for the transformation pipeline.

use thiserror::Error;

use crate::buffer::BufferError;

/// Errors returned by the engine, registry and parameter validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// No image is loaded, or the image has zero width/height.
    #[error("No input image")]
    EmptyInput,

    /// The method identifier is not in the catalog.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// A parameter failed strict validation.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    /// A buffer could not be constructed.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
