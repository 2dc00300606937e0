//! WebAssembly bindings for base32-codec
//!
//! Provides a JavaScript-friendly API over the table-driven edition.

use wasm_bindgen::prelude::*;

use crate::{decode as decode_internal, encode as encode_internal};

/// Error type for WASM operations
#[wasm_bindgen]
pub struct WasmError {
    message: String,
}

#[wasm_bindgen]
impl WasmError {
    /// Get the error message
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<crate::DecodeError> for WasmError {
    fn from(err: crate::DecodeError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Encode bytes to a base32 string
///
/// # Arguments
///
/// * `data` - The binary data to encode
///
/// # Returns
///
/// Base32-encoded string
#[wasm_bindgen]
pub fn encode_base32(data: &[u8]) -> String {
    encode_internal(data)
}

/// Decode a base32 string back to bytes
///
/// # Arguments
///
/// * `encoded` - The base32-encoded string
///
/// # Returns
///
/// Decoded binary data
#[wasm_bindgen]
pub fn decode_base32(encoded: &str) -> Result<Vec<u8>, WasmError> {
    decode_internal(encoded).map_err(WasmError::from)
}
