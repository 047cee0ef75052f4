//! Imagelab WASM - WebAssembly bindings for Imagelab
//!
//! This crate exposes the imagelab-core pipeline to a JavaScript UI shell.
//!
//! # Module Structure
//!
//! - `types` - `JsPixelBuffer`, the image handle passed across the boundary
//! - `catalog` - Method descriptors and default parameters
//! - `engine` - `apply_method`
//! - `histogram` - Histogram computation for display
//! - `codec` - Image decoding and encoding
//! - `session` - `JsEditSession`, the load/apply/reset/save workflow
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_method, list_methods } from '@imagelab/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const methods = list_methods();
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const edges = apply_method(image, 'canny-edges', { threshold: 120 });
//! ```

use wasm_bindgen::prelude::*;

mod catalog;
mod codec;
mod engine;
mod histogram;
mod session;
mod types;

// Re-export public types
pub use catalog::{default_params, list_methods, method_ids, method_name};
pub use codec::{canonical_extension, decode_image, encode_image, mime_type};
pub use engine::apply_method;
pub use histogram::{compute_histogram, JsHistogram};
pub use session::JsEditSession;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
///
/// Installs the panic hook and routes `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A logger may already be installed by the host page
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("imagelab-wasm {} ready", version());
}

/// Raise or lower console logging (`"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`, `"off"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = level
        .parse::<log::LevelFilter>()
        .map_err(|_| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    log::set_max_level(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
