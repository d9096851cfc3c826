//! JSON (de)serialization boundary for settings storage and transport.
//!
//! Everything that enters the system as settings text - the persisted record
//! on startup, the payload returned by the configuration page - passes
//! through [`decode_settings`], which validates the shape in two stages:
//!
//! 1. The text must parse as a JSON **object**.
//! 2. Every value must be a flat primitive (string, number, or boolean).
//!
//! Stage 2 exists because the value union is typed: the original untyped
//! companion would happily store and forward nested structures, but the
//! watch firmware only ever reads flat primitives, so this boundary fails
//! loudly instead.

use serde_json::Value;

use crate::codec::SettingsError;
use crate::domain::settings::{SettingsMap, SettingsValue};

/// Parses settings text into a validated [`SettingsMap`].
///
/// # Errors
///
/// - [`SettingsError::Json`] - the text is not valid JSON.
/// - [`SettingsError::NotAnObject`] - the top-level value is not an object.
/// - [`SettingsError::UnsupportedValue`] - a value is a nested object,
///   an array, or JSON `null`.
///
/// # Example
///
/// ```rust
/// use pingchrong_core::decode_settings;
///
/// let settings = decode_settings(r#"{"color":"red"}"#).unwrap();
/// assert_eq!(settings.len(), 1);
/// assert!(decode_settings(r#"{"nested":{"a":1}}"#).is_err());
/// ```
pub fn decode_settings(text: &str) -> Result<SettingsMap, SettingsError> {
    let value: Value = serde_json::from_str(text)?;

    let object = match value {
        Value::Object(map) => map,
        Value::Null => return Err(SettingsError::NotAnObject { found: "null" }),
        Value::Bool(_) => return Err(SettingsError::NotAnObject { found: "a boolean" }),
        Value::Number(_) => return Err(SettingsError::NotAnObject { found: "a number" }),
        Value::String(_) => return Err(SettingsError::NotAnObject { found: "a string" }),
        Value::Array(_) => return Err(SettingsError::NotAnObject { found: "an array" }),
    };

    object
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Bool(b) => SettingsValue::Bool(b),
                Value::Number(n) => SettingsValue::Number(n),
                Value::String(s) => SettingsValue::Text(s),
                // Nested objects, arrays, and null are outside the contract.
                Value::Object(_) | Value::Array(_) | Value::Null => {
                    return Err(SettingsError::UnsupportedValue { key });
                }
            };
            Ok((key, value))
        })
        .collect()
}

/// Serializes a [`SettingsMap`] to its canonical JSON object text.
///
/// The output is deterministic (keys in sorted order) so the persisted
/// record for a given mapping is always byte-identical.
///
/// # Errors
///
/// Returns [`SettingsError::Json`] if serialization fails; with a validated
/// mapping this does not happen in practice, but the error path is kept so
/// callers never need to panic.
pub fn encode_settings(settings: &SettingsMap) -> Result<String, SettingsError> {
    Ok(serde_json::to_string(settings)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
