//! Serialization of the persisted `AppState` blob.
//!
//! Stored blobs may come from older builds with fewer fields. Decoding
//! overlays the stored JSON onto the serialized defaults, so anything the
//! blob lacks falls back to its default value.
//!
//! The overlay is recursive for JSON objects (`me`, `me.privacy`, `auth`,
//! `filters`, the message ledger) and wholesale for everything else: arrays,
//! strings, numbers and explicit `null`s in the blob replace the default.

use nexa_core::error::{NexaError, Result};
use nexa_core::state::AppState;
use serde_json::Value;

/// Serializes the full state as compact JSON.
pub fn encode_state(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Decodes a stored blob on top of `defaults`.
pub fn decode_state(blob: &str, defaults: &AppState) -> Result<AppState> {
    let stored: Value = serde_json::from_str(blob)?;
    if !stored.is_object() {
        return Err(NexaError::Serialization {
            format: "JSON".to_string(),
            message: "stored state is not a JSON object".to_string(),
        });
    }

    let mut merged = serde_json::to_value(defaults)?;
    overlay(&mut merged, stored);
    Ok(serde_json::from_value(merged)?)
}

/// Writes `stored` over `base`, descending into objects present on both sides.
fn overlay(base: &mut Value, stored: Value) {
    match (base, stored) {
        (Value::Object(base), Value::Object(stored)) => {
            for (key, value) in stored {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
