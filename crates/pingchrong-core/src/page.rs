//! Configuration-page URL construction.
//!
//! The settings UI is not part of the companion - it is a web form hosted
//! remotely.  When the user opens settings, the companion hands the host
//! runtime a URL carrying the current settings in the fragment, and the
//! page later returns control through the webview-closed event.
//!
//! URL shape:
//!
//! ```text
//! <base>/settings.html?v=<version-tag>#<fragment>
//! ```
//!
//! The version tag lets the page serve markup matching the watchface
//! version that opened it.  The fragment is produced by
//! [`crate::codec::fragment::encode_fragment`].

use crate::codec::fragment::encode_fragment;
use crate::codec::SettingsError;

/// Default host for the remote settings page.
pub const DEFAULT_PAGE_BASE_URL: &str = "https://s3.amazonaws.com/pebble.rexmac.com/pingchrong";

/// Version tag appended as the `v` query parameter.
pub const DEFAULT_VERSION_TAG: &str = "2-0-0";

/// Builds the configuration-page URL for the given settings text.
///
/// `settings_text` is the raw persisted record (or the literal `"{}"` on
/// first run); it is double-encoded into the fragment per the page contract.
///
/// # Errors
///
/// Returns [`SettingsError`] if fragment encoding fails.
///
/// # Example
///
/// ```rust
/// use pingchrong_core::{settings_url, DEFAULT_PAGE_BASE_URL, DEFAULT_VERSION_TAG};
///
/// let url = settings_url(DEFAULT_PAGE_BASE_URL, DEFAULT_VERSION_TAG, "{}").unwrap();
/// assert_eq!(
///     url,
///     "https://s3.amazonaws.com/pebble.rexmac.com/pingchrong/settings.html?v=2-0-0#%22%7B%7D%22"
/// );
/// ```
pub fn settings_url(
    base_url: &str,
    version_tag: &str,
    settings_text: &str,
) -> Result<String, SettingsError> {
    let fragment = encode_fragment(settings_text)?;
    Ok(format!(
        "{base_url}/settings.html?v={version_tag}#{fragment}"
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
