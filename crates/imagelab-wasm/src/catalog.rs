//! Method catalog bindings.
//!
//! The descriptors are serialized with `serde-wasm-bindgen` in its
//! JSON-compatible mode, so JavaScript receives plain objects (not `Map`s):
//!
//! ```typescript
//! for (const m of list_methods()) {
//!   console.log(m.id, m.name, m.params.map(p => `${p.name} [${p.min}, ${p.max}]`));
//! }
//! ```

use imagelab_core::registry::{self, Method};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// All method descriptors in catalog order.
#[wasm_bindgen]
pub fn list_methods() -> Result<JsValue, JsValue> {
    to_js(registry::list())
}

/// Default `{ name: value }` parameters for a method id or display name.
#[wasm_bindgen]
pub fn default_params(method_id: &str) -> Result<JsValue, JsValue> {
    let method = parse_method(method_id)?;
    to_js(&registry::describe(method).default_params())
}

/// Stable method ids in catalog order.
#[wasm_bindgen]
pub fn method_ids() -> Vec<String> {
    Method::ALL.iter().map(|m| m.id().to_string()).collect()
}

/// Display name for a method id, if it exists.
#[wasm_bindgen]
pub fn method_name(method_id: &str) -> Option<String> {
    Method::from_id(method_id).ok().map(|m| m.name().to_string())
}

pub(crate) fn parse_method(method_id: &str) -> Result<Method, JsValue> {
    Method::from_id(method_id).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Serialize with maps as plain objects.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
