//! JSON message types for the host-runtime channel.
//!
//! The companion speaks line-delimited JSON with its host: events arrive on
//! stdin, commands leave on stdout.  Every message is a JSON object with a
//! `"type"` field identifying the variant; all other fields are flattened
//! into the same object.  Serde's `#[serde(tag = "type")]` attribute handles
//! this automatically:
//!
//! ```json
//! {"type":"webviewclosed","response":"%7B%22color%22%3A%22red%22%7D"}
//! ```
//!
//! # Why separate event and command types?
//!
//! The two directions carry different information: the host *dispatches*
//! lifecycle events, the companion *requests* host actions.  Using two
//! distinct enums makes it a compile-time error to accidentally emit an
//! event or dispatch a command.

use serde::{Deserialize, Serialize};

use pingchrong_core::SettingsMap;

// ── Host → Companion events ───────────────────────────────────────────────────

/// Lifecycle events dispatched by the host runtime.
///
/// Each event is handled to completion before the next is read; the host
/// contract guarantees events never arrive concurrently.
///
/// # Serde representation
///
/// ```json
/// {"type":"ready"}
/// {"type":"showConfiguration"}
/// {"type":"webviewclosed","response":"..."}
/// {"type":"shutdown"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    /// Fired once at startup.  The companion forwards any persisted
    /// settings to the watch.
    #[serde(rename = "ready")]
    Ready,

    /// Fired when the user opens the settings UI.  The companion asks the
    /// host to open the remote configuration page.
    #[serde(rename = "showConfiguration")]
    ShowConfiguration,

    /// Fired when the configuration page closes.
    #[serde(rename = "webviewclosed")]
    WebviewClosed {
        /// URL-encoded JSON text produced by the page, absent when the page
        /// was dismissed without submitting.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        response: Option<String>,
    },

    /// Asks the companion to exit its event loop.  Not part of the original
    /// host contract; used by embedding hosts to end the process cleanly.
    #[serde(rename = "shutdown")]
    Shutdown,
}

// ── Companion → Host commands ─────────────────────────────────────────────────

/// Actions the companion requests from the host runtime.
///
/// Both are fire-and-forget from the companion's point of view:
/// delivery/acknowledgment semantics for app messages are owned by the
/// host, and opening a URL has no return value.
///
/// # Serde representation
///
/// ```json
/// {"type":"sendAppMessage","payload":{"color":"red"}}
/// {"type":"openUrl","url":"https://..."}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Forward the settings mapping to the paired watch.
    #[serde(rename = "sendAppMessage")]
    SendAppMessage {
        /// The full mapping; the watch replaces its settings wholesale.
        payload: SettingsMap,
    },

    /// Open an external URL (the configuration page).
    #[serde(rename = "openUrl")]
    OpenUrl {
        /// Fully-formed URL including the settings fragment.
        url: String,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
