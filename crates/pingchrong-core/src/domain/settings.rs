//! The settings mapping entity and its value union.
//!
//! A [`SettingsMap`] is the single configuration object exchanged between
//! the remote configuration page, local storage, and the paired watch.  Its
//! lifecycle is deliberately simple:
//!
//! - Created by the configuration page (an external web form).
//! - Serialized to JSON text for storage and transport.
//! - Deserialized on load.
//! - **Replaced, never merged**: a completed configuration round-trip
//!   overwrites the previous mapping wholesale.  There is no partial update.
//!
//! The persistent store owns the durable copy; any in-memory `SettingsMap`
//! is a transient cache for the current process lifetime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed key under which the settings record is persisted in local storage.
///
/// This name is part of the on-device contract: it matches the record the
/// original companion wrote, so upgrades pick up existing settings.
pub const SETTINGS_STORAGE_KEY: &str = "pingchrong-settings";

// ── Value union ───────────────────────────────────────────────────────────────

/// A single settings value: a flat union of the three JSON primitive types
/// the configuration page produces.
///
/// Nested objects and arrays are *not* representable - the deserialization
/// boundary in [`crate::codec::json`] rejects them with a precise error
/// rather than passing opaque structures to the watch.
///
/// # Serde representation
///
/// The union is `#[serde(untagged)]`, so values serialize as the bare JSON
/// primitive: `"red"`, `42`, `true`.  Variant order matters for untagged
/// deserialization: booleans and numbers are unambiguous, strings match last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingsValue {
    /// A boolean flag, e.g. `"vibrate": true`.
    Bool(bool),
    /// A JSON number.  `serde_json::Number` preserves the integer/float
    /// distinction so `1` does not round-trip as `1.0`.
    Number(serde_json::Number),
    /// A string value, e.g. `"color": "red"`.
    Text(String),
}

impl From<bool> for SettingsValue {
    fn from(v: bool) -> Self {
        SettingsValue::Bool(v)
    }
}

impl From<i64> for SettingsValue {
    fn from(v: i64) -> Self {
        SettingsValue::Number(v.into())
    }
}

impl From<&str> for SettingsValue {
    fn from(v: &str) -> Self {
        SettingsValue::Text(v.to_string())
    }
}

impl From<String> for SettingsValue {
    fn from(v: String) -> Self {
        SettingsValue::Text(v)
    }
}

// ── The mapping ───────────────────────────────────────────────────────────────

/// The settings mapping: configuration key → [`SettingsValue`].
///
/// Backed by a `BTreeMap` so serialization order is deterministic - the
/// persisted text for a given mapping is always byte-identical, which keeps
/// the round-trip law trivially testable.
///
/// # Example
///
/// ```rust
/// use pingchrong_core::SettingsMap;
///
/// let mut settings = SettingsMap::new();
/// settings.insert("color", "red");
/// settings.insert("vibrate", true);
/// assert_eq!(settings.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsMap(BTreeMap<String, SettingsValue>);

impl SettingsMap {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the mapping has no keys.
    ///
    /// An empty mapping returned from the configuration page is a no-op by
    /// contract: it is neither persisted nor forwarded to the watch.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys in the mapping.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Inserts a key/value pair, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingsValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&SettingsValue> {
        self.0.get(key)
    }

    /// Iterates over key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingsValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, SettingsValue)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (String, SettingsValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_empty() {
        // Arrange / Act
        let settings = SettingsMap::new();

        // Assert
        assert!(settings.is_empty());
        assert_eq!(settings.len(), 0);
    }

    #[test]
    fn test_insert_replaces_previous_value_for_key() {
        // Arrange
        let mut settings = SettingsMap::new();
        settings.insert("color", "red");

        // Act
        settings.insert("color", "blue");

        // Assert: single key, latest value wins
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("color"), Some(&SettingsValue::Text("blue".into())));
    }

    #[test]
    fn test_value_conversions_cover_all_three_primitives() {
        let mut settings = SettingsMap::new();
        settings.insert("color", "red");
        settings.insert("theme", 2i64);
        settings.insert("vibrate", true);

        assert_eq!(settings.get("color"), Some(&SettingsValue::Text("red".into())));
        assert_eq!(settings.get("theme"), Some(&SettingsValue::Number(2.into())));
        assert_eq!(settings.get("vibrate"), Some(&SettingsValue::Bool(true)));
    }

    #[test]
    fn test_serialization_order_is_deterministic() {
        // Arrange: insert in one order...
        let mut a = SettingsMap::new();
        a.insert("zebra", 1i64);
        a.insert("alpha", 2i64);

        // ...and the reverse order.
        let mut b = SettingsMap::new();
        b.insert("alpha", 2i64);
        b.insert("zebra", 1i64);

        // Act
        let text_a = serde_json::to_string(&a).unwrap();
        let text_b = serde_json::to_string(&b).unwrap();

        // Assert: byte-identical regardless of insertion order
        assert_eq!(text_a, text_b);
        assert_eq!(text_a, r#"{"alpha":2,"zebra":1}"#);
    }

    #[test]
    fn test_values_serialize_as_bare_json_primitives() {
        // The untagged representation must not wrap values in variant names.
        let mut settings = SettingsMap::new();
        settings.insert("color", "red");
        settings.insert("vibrate", true);

        let text = serde_json::to_string(&settings).unwrap();
        assert_eq!(text, r#"{"color":"red","vibrate":true}"#);
    }

    #[test]
    fn test_integer_numbers_round_trip_without_becoming_floats() {
        // Arrange
        let mut settings = SettingsMap::new();
        settings.insert("theme", 3i64);

        // Act
        let text = serde_json::to_string(&settings).unwrap();

        // Assert: `3`, not `3.0`
        assert_eq!(text, r#"{"theme":3}"#);
    }

    #[test]
    fn test_storage_key_matches_original_record_name() {
        // Part of the on-device contract; changing it would orphan the
        // settings written by previous companion versions.
        assert_eq!(SETTINGS_STORAGE_KEY, "pingchrong-settings");
    }
}
