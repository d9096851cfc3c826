//! Codec module: how the settings mapping travels as text.
//!
//! Two distinct encodings are involved in one configuration round-trip:
//!
//! - **`json`** - the storage/transport boundary.  The mapping is persisted
//!   and forwarded to the watch as plain JSON object text.
//! - **`fragment`** - the configuration-page boundary.  The page receives
//!   the settings *text* wrapped in a JSON string literal and
//!   percent-encoded into the URL fragment, and returns a new mapping as
//!   percent-encoded JSON via the webview-closed event.

pub mod fragment;
pub mod json;

use thiserror::Error;

/// Errors that can occur while encoding or decoding settings text.
///
/// These surface unhandled from the event handler that hit them - there is
/// no local recovery for malformed text - but they are fatal only to that
/// single handler invocation, never to the event loop.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The text is not valid JSON, or the top-level value is valid JSON but
    /// the mapping shape does not match (see [`SettingsError::NotAnObject`]).
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object (e.g. `42` or `[1,2]`).
    #[error("settings text is not a JSON object: got {found}")]
    NotAnObject {
        /// Short description of the value actually found.
        found: &'static str,
    },

    /// A value in the mapping is a nested object or array, which the flat
    /// {string, number, boolean} union does not admit.
    #[error("settings value for key '{key}' is not a string, number, or boolean")]
    UnsupportedValue {
        /// The offending configuration key.
        key: String,
    },

    /// The webview payload was not valid percent-encoded UTF-8.
    #[error("malformed percent-encoding in webview payload: {0}")]
    PercentDecode(#[from] std::string::FromUtf8Error),
}
