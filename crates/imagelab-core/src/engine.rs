//! Transform dispatch.
//!
//! [`apply`] is the single entry point a caller needs: it rejects empty
//! input, looks the method up in the catalog and runs its transform with
//! normalized parameters. The input buffer is never modified.

use crate::buffer::PixelBuffer;
use crate::error::TransformError;
use crate::params::ParameterSet;
use crate::registry::{self, Method, MethodDescriptor};

/// Run `method` on `input`.
///
/// Missing or out-of-range parameters are replaced by defaults or clamped,
/// so the only failure is an empty input.
///
/// # Arguments
/// * `input` - Source pixels (not modified)
/// * `method` - Method to run
/// * `params` - Parameter values; may be partial
///
/// # Returns
/// A new buffer. Its channel count depends on the method.
pub fn apply(
    input: &PixelBuffer,
    method: Method,
    params: &ParameterSet,
) -> Result<PixelBuffer, TransformError> {
    apply_descriptor(input, registry::describe(method), params)
}

/// Like [`apply`], but takes a method id or display name.
pub fn apply_by_id(
    input: &PixelBuffer,
    method_id: &str,
    params: &ParameterSet,
) -> Result<PixelBuffer, TransformError> {
    let method = Method::from_id(method_id)?;
    apply(input, method, params)
}

pub(crate) fn apply_descriptor(
    input: &PixelBuffer,
    descriptor: &MethodDescriptor,
    params: &ParameterSet,
) -> Result<PixelBuffer, TransformError> {
    if input.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    log::debug!(
        "applying {} to {}x{}x{} with {:?}",
        descriptor.id,
        input.width(),
        input.height(),
        input.channels().count(),
        descriptor
            .params
            .iter()
            .map(|spec| (spec.name, params.resolve(spec)))
            .collect::<Vec<_>>()
    );
    let transform = descriptor.transform.unwrap_or(registry::identity);
    Ok(transform(input, params))
}
