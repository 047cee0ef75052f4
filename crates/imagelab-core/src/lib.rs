//! Imagelab Core - Image transformation library
//!
//! This crate provides the pixel pipeline behind Imagelab: a catalog of
//! sixteen classic image-processing methods, a transform engine that runs
//! them on 8-bit pixel buffers, histogram computation, and PNG/JPEG/BMP
//! decoding and encoding.
//!
//! # Layout
//!
//! - [`buffer`]: the [`PixelBuffer`] image type (1 or 3 channels)
//! - [`registry`]: the [`Method`] catalog and parameter schemas
//! - [`engine`]: [`apply`] a method to a buffer
//! - [`ops`]: the pixel algorithms themselves
//! - [`histogram`]: 256-bin histograms for display
//! - [`decode`] / [`encode`]: file codecs
//! - [`session`]: load/apply/reset/save state for an interactive shell

pub mod buffer;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod luma;
pub mod ops;
pub mod params;
pub mod registry;
pub mod session;

pub use buffer::{BufferError, Channels, PixelBuffer};
pub use decode::{decode_image, DecodeError};
pub use encode::{encode_image, EncodeError, EncodeOptions, ImageFormat};
pub use engine::{apply, apply_by_id};
pub use error::TransformError;
pub use histogram::{compute as compute_histogram, HistogramResult};
pub use params::{ParamKind, ParameterSet, ParameterSpec};
pub use registry::{Method, MethodDescriptor, TransformFn};
pub use session::{EditSession, SessionError};
