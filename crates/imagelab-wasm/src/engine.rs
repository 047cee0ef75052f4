//! Transform bindings.

use imagelab_core::{engine, ParameterSet};
use wasm_bindgen::prelude::*;

use crate::catalog::parse_method;
use crate::types::JsPixelBuffer;

/// Apply a method to an image.
///
/// # Arguments
/// * `image` - Source image (not modified)
/// * `method_id` - Method id (e.g. `"gaussian-blur"`) or display name
/// * `params` - `{ name: value }` object; `undefined`/`null` uses the defaults
///
/// # Example (TypeScript)
/// ```typescript
/// const blurred = apply_method(image, 'gaussian-blur', { kernel_size: 7 });
/// ```
#[wasm_bindgen]
pub fn apply_method(
    image: &JsPixelBuffer,
    method_id: &str,
    params: JsValue,
) -> Result<JsPixelBuffer, JsValue> {
    let method = parse_method(method_id)?;
    let params = params_from_js(params)?;
    engine::apply(image.buffer(), method, &params)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn params_from_js(value: JsValue) -> Result<ParameterSet, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ParameterSet::new());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
