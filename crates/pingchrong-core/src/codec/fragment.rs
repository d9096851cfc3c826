//! URL-fragment encoding for the configuration-page round-trip.
//!
//! The configuration page's payload contract predates this companion and is
//! quirky in one important way: the fragment does not carry the settings
//! JSON directly, but the settings **text wrapped in a JSON string literal**
//! and then percent-encoded.  For stored text `{"color":"red"}` the page
//! receives:
//!
//! ```text
//! encode_fragment:  {"color":"red"}
//!                →  "{\"color\":\"red\"}"        (JSON string literal)
//!                →  %22%7B%5C%22color%5C%22...    (percent-encoded)
//! ```
//!
//! The page itself strips one layer with `decodeURIComponent` + `JSON.parse`
//! before reading the object out of the remaining text.
//!
//! The return path is single-encoded: the page sends back percent-encoded
//! JSON object text in the webview-closed `response` field.

use crate::codec::json::decode_settings;
use crate::codec::SettingsError;
use crate::domain::settings::SettingsMap;

/// Encodes stored settings text into the URL fragment the page expects.
///
/// This is the double encoding described in the module docs: the text is
/// first wrapped in a JSON string literal, then percent-encoded.
///
/// # Errors
///
/// Returns [`SettingsError::Json`] if JSON string serialization fails (kept
/// for completeness; encoding a `&str` does not fail in practice).
pub fn encode_fragment(settings_text: &str) -> Result<String, SettingsError> {
    let literal = serde_json::to_string(settings_text)?;
    Ok(urlencoding::encode(&literal).into_owned())
}

/// Decodes a URL fragment back into the settings text it carries.
///
/// The inverse of [`encode_fragment`].  The companion itself never receives
/// fragments - the page does - but the pair keeps the contract testable
/// end to end.
///
/// # Errors
///
/// - [`SettingsError::PercentDecode`] - the fragment is not valid
///   percent-encoded UTF-8.
/// - [`SettingsError::Json`] - the decoded text is not a JSON string literal.
pub fn decode_fragment(fragment: &str) -> Result<String, SettingsError> {
    let literal = urlencoding::decode(fragment)?;
    Ok(serde_json::from_str(&literal)?)
}

/// Decodes the `response` payload returned via the webview-closed event
/// into a validated [`SettingsMap`].
///
/// The payload is percent-encoded JSON object text (single-encoded: the
/// page applies `encodeURIComponent(JSON.stringify(options))`).
///
/// # Errors
///
/// - [`SettingsError::PercentDecode`] - malformed percent-encoding.
/// - [`SettingsError::Json`] / [`SettingsError::NotAnObject`] /
///   [`SettingsError::UnsupportedValue`] - see [`decode_settings`].
///
/// # Example
///
/// ```rust
/// use pingchrong_core::decode_response;
///
/// let settings = decode_response("%7B%22color%22%3A%22red%22%7D").unwrap();
/// assert_eq!(settings.len(), 1);
/// ```
pub fn decode_response(response: &str) -> Result<SettingsMap, SettingsError> {
    let text = urlencoding::decode(response)?;
    decode_settings(&text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::SettingsValue;

    // ── encode_fragment ───────────────────────────────────────────────────────

    #[test]
    fn test_encode_fragment_of_empty_object_text() {
        // Arrange / Act: `{}` wrapped in a string literal is `"{}"`,
        // percent-encoded to `%22%7B%7D%22`.
        let fragment = encode_fragment("{}").unwrap();

        // Assert
        assert_eq!(fragment, "%22%7B%7D%22");
    }

    #[test]
    fn test_encode_fragment_escapes_inner_quotes() {
        // Arrange
        let text = r#"{"color":"red"}"#;

        // Act
        let fragment = encode_fragment(text).unwrap();

        // Assert: the inner quotes become `\"` in the string literal and the
        // backslash itself is percent-encoded as %5C.
        assert_eq!(fragment, "%22%7B%5C%22color%5C%22%3A%5C%22red%5C%22%7D%22");
    }

    #[test]
    fn test_fragment_round_trips_back_to_settings_text() {
        // Arrange
        let text = r#"{"theme":2,"vibrate":true}"#;

        // Act
        let fragment = encode_fragment(text).unwrap();
        let restored = decode_fragment(&fragment).unwrap();

        // Assert
        assert_eq!(restored, text);
    }

    #[test]
    fn test_decode_fragment_rejects_bare_object_text() {
        // A single-encoded fragment (no string-literal wrapping) violates the
        // page contract and must fail the JSON-string parse.
        let fragment = urlencoding::encode(r#"{"color":"red"}"#).into_owned();
        assert!(matches!(decode_fragment(&fragment), Err(SettingsError::Json(_))));
    }

    // ── decode_response ───────────────────────────────────────────────────────

    #[test]
    fn test_decode_response_single_key_mapping() {
        // Arrange: what the page sends for {"color":"red"}
        let response = "%7B%22color%22%3A%22red%22%7D";

        // Act
        let settings = decode_response(response).unwrap();

        // Assert
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("color"), Some(&SettingsValue::Text("red".into())));
    }

    #[test]
    fn test_decode_response_empty_object_yields_empty_map() {
        let settings = decode_response("%7B%7D").unwrap();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_decode_response_unencoded_plain_json_still_parses() {
        // A payload with no percent-escapes decodes to itself; the page is
        // not obliged to escape text that needs no escaping.
        let settings = decode_response(r#"{"vibrate":true}"#).unwrap();
        assert_eq!(settings.get("vibrate"), Some(&SettingsValue::Bool(true)));
    }

    #[test]
    fn test_decode_response_invalid_percent_utf8_is_rejected() {
        // %FF is not valid UTF-8 on its own.
        let result = decode_response("%FF%FE");
        assert!(matches!(result, Err(SettingsError::PercentDecode(_))));
    }

    #[test]
    fn test_decode_response_malformed_json_is_rejected() {
        let result = decode_response("%7B%22color%22");
        assert!(matches!(result, Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_decode_response_nested_value_is_rejected() {
        // {"a":{"b":1}} percent-encoded
        let response = "%7B%22a%22%3A%7B%22b%22%3A1%7D%7D";
        let result = decode_response(response);
        assert!(matches!(result, Err(SettingsError::UnsupportedValue { key }) if key == "a"));
    }
}
