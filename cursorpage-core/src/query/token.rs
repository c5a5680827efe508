//! Opaque cursor tokens
//!
//! A token is the extended JSON array of a boundary record's cursor values,
//! base64url encoded without padding so it can travel in a query string.
//! Decoding restores the values exactly, including 32 vs 64-bit integers.

use super::cursor::CursorError;
use super::wire::{json_to_value, value_to_json};
use crate::document::Value;
use base64::{engine::general_purpose, Engine as _};
use serde_json::Value as JsonValue;
use tracing::warn;

/// Encode cursor values into a token
pub fn encode_cursor(values: &[Value]) -> String {
    let json = JsonValue::Array(values.iter().map(value_to_json).collect());
    general_purpose::URL_SAFE_NO_PAD.encode(json.to_string())
}

/// Decode a token back into cursor values
pub fn decode_cursor(token: &str) -> Result<Vec<Value>, CursorError> {
    decode_values(token).map_err(|reason| {
        warn!(token, %reason, "Rejected cursor token");
        CursorError::InvalidToken(reason)
    })
}

fn decode_values(token: &str) -> Result<Vec<Value>, String> {
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|e| format!("not base64url: {}", e))?;
    let json: JsonValue =
        serde_json::from_slice(&bytes).map_err(|e| format!("not JSON: {}", e))?;
    let items = json
        .as_array()
        .ok_or_else(|| "cursor payload must be an array".to_string())?;
    items
        .iter()
        .map(|item| json_to_value(item).map_err(|e| e.to_string()))
        .collect()
}
