//! Cache value encoding
//!
//! Values are stored as JSON text, except integers which are stored in raw
//! decimal form so the store's native counter commands (INCRBY/DECRBY) can
//! operate on them. A raw integer is also valid JSON, so `decode` reads both.

use crate::error::{Error, Result};
use serde_json::Value;

/// Decoded cache payload
pub type CacheValue = Value;

/// Encode an already-built JSON value for storage
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        other => other.to_string(),
    }
}

/// Decode a raw stored string
pub fn decode(raw: &str) -> Result<Value> {
    serde_json::from_str(raw)
        .map_err(|e| Error::cache(format!("Stored value is not valid JSON ({e}): {raw:?}")))
}
