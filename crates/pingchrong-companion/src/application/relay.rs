//! SettingsRelay: the three lifecycle handlers over host ports.
//!
//! This use case is the entire behavior of the companion: bridge persisted
//! configuration between the remote settings editor and the paired watch.
//! It delegates to three trait ports for everything that touches the
//! outside world:
//!
//! - [`SettingsStore`] - the persistent key/value record.
//! - [`DeviceMessenger`] - the app-message channel to the watch.
//! - [`UrlOpener`] - opening the configuration page.
//!
//! The concrete adapters live in the infrastructure layer; tests drive the
//! relay with mocks.
//!
//! # Handler semantics
//!
//! Each handler runs to completion before the next event is dispatched.
//! A handler error is fatal to that invocation only - the relay holds no
//! state between invocations beyond the persisted record itself, so the
//! next event starts clean.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use pingchrong_core::{decode_response, decode_settings, encode_settings, settings_url};
use pingchrong_core::{SettingsError, SettingsMap};
use pingchrong_core::{DEFAULT_PAGE_BASE_URL, DEFAULT_VERSION_TAG, SETTINGS_STORAGE_KEY};

use crate::domain::events::HostEvent;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error raised by a [`SettingsStore`] adapter.
///
/// Adapters flatten their underlying failure (file system, lock poisoning)
/// into a message string: the relay has no recovery policy that would
/// distinguish causes, it only propagates.
#[derive(Debug, Error)]
#[error("settings store: {0}")]
pub struct StoreError(pub String);

/// Error raised by a [`DeviceMessenger`] or [`UrlOpener`] adapter.
#[derive(Debug, Error)]
#[error("host API: {0}")]
pub struct HostApiError(pub String);

/// Error type for one relay handler invocation.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Malformed settings text - persisted record or webview payload.
    /// Surfaces unhandled, per the companion's no-local-recovery policy.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The settings store failed to read or write the record.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The host rejected an outbound command.
    #[error(transparent)]
    Host(#[from] HostApiError),
}

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Persistent string-valued key/value store provided by the host platform.
///
/// The relay uses a single fixed key; the store owns the durable copy of
/// the settings and the relay never caches across invocations.
pub trait SettingsStore: Send + Sync {
    /// Reads the record for `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes (replacing) the record for `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// App-message channel to the paired watch.
///
/// Delivery and acknowledgment are owned by the host runtime; from the
/// relay's point of view a send either enters the channel or fails.
pub trait DeviceMessenger: Send + Sync {
    /// Forwards the full settings mapping to the watch.
    fn send_app_message(&self, settings: &SettingsMap) -> Result<(), HostApiError>;
}

/// Opens an external URL in whatever browser/webview the host provides.
pub trait UrlOpener: Send + Sync {
    /// Fire-and-forget: the page returns control via the webview-closed event.
    fn open_url(&self, url: &str) -> Result<(), HostApiError>;
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// The relay's explicit state: the fixed names of its external contract.
///
/// Built once at startup from the TOML config file and CLI flags, then
/// owned by the relay - no ambient globals.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Storage key for the persisted settings record.
    pub storage_key: String,
    /// Base URL of the remote configuration page.
    pub page_base_url: String,
    /// Version tag passed as the page's `v` query parameter.
    pub version_tag: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            storage_key: SETTINGS_STORAGE_KEY.to_string(),
            page_base_url: DEFAULT_PAGE_BASE_URL.to_string(),
            version_tag: DEFAULT_VERSION_TAG.to_string(),
        }
    }
}

// ── The use case ──────────────────────────────────────────────────────────────

/// Outcome of dispatching one host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Keep reading events.
    Continue,
    /// The host asked the companion to exit.
    Shutdown,
}

/// The settings relay use case.
///
/// Holds the port adapters behind `Arc<dyn ...>` so the same relay can be
/// wired with the real stdio/file adapters in `main` and with recording
/// mocks in tests.
pub struct SettingsRelay {
    config: RelayConfig,
    store: Arc<dyn SettingsStore>,
    device: Arc<dyn DeviceMessenger>,
    opener: Arc<dyn UrlOpener>,
}

impl SettingsRelay {
    /// Creates a relay over the given ports.
    pub fn new(
        config: RelayConfig,
        store: Arc<dyn SettingsStore>,
        device: Arc<dyn DeviceMessenger>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        Self {
            config,
            store,
            device,
            opener,
        }
    }

    /// Dispatches one host event to the matching handler.
    ///
    /// # Errors
    ///
    /// Propagates the handler's [`RelayError`]; the caller decides whether
    /// to keep the loop running (it should - handler failures are scoped to
    /// one invocation).
    pub fn handle_event(&self, event: &HostEvent) -> Result<EventOutcome, RelayError> {
        match event {
            HostEvent::Ready => self.on_ready().map(|()| EventOutcome::Continue),
            HostEvent::ShowConfiguration => {
                self.on_show_configuration().map(|()| EventOutcome::Continue)
            }
            HostEvent::WebviewClosed { response } => self
                .on_webview_closed(response.as_deref())
                .map(|()| EventOutcome::Continue),
            HostEvent::Shutdown => {
                info!("shutdown event received");
                Ok(EventOutcome::Shutdown)
            }
        }
    }

    /// `ready` handler: forward persisted settings to the watch, if any.
    ///
    /// An absent record (first run) or an empty-string record means there is
    /// nothing to forward - no message, no error.
    ///
    /// # Errors
    ///
    /// - [`RelayError::Settings`] if the stored text is malformed.
    /// - [`RelayError::Store`] / [`RelayError::Host`] on adapter failure.
    pub fn on_ready(&self) -> Result<(), RelayError> {
        let stored = self.store.get(&self.config.storage_key)?;
        match stored {
            Some(text) if !text.is_empty() => {
                let settings = decode_settings(&text)?;
                info!(keys = settings.len(), "forwarding persisted settings to watch");
                self.device.send_app_message(&settings)?;
            }
            _ => {
                debug!("no persisted settings; nothing to forward");
            }
        }
        Ok(())
    }

    /// `showConfiguration` handler: open the remote settings page.
    ///
    /// The current settings text rides along in the URL fragment so the
    /// page can pre-fill the form; an absent or empty record substitutes
    /// the literal empty-object text `{}`.
    ///
    /// # Errors
    ///
    /// - [`RelayError::Store`] if the record cannot be read.
    /// - [`RelayError::Host`] if the host rejects the open-URL command.
    pub fn on_show_configuration(&self) -> Result<(), RelayError> {
        let text = self
            .store
            .get(&self.config.storage_key)?
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "{}".to_string());

        let url = settings_url(&self.config.page_base_url, &self.config.version_tag, &text)?;
        info!(%url, "opening configuration page");
        self.opener.open_url(&url)?;
        Ok(())
    }

    /// `webviewclosed` handler: persist and forward the returned mapping.
    ///
    /// An absent `response` is treated as an empty mapping.  An empty
    /// mapping is a strict no-op: no persistence write, no device message.
    /// (Consequence, preserved from the observed behavior: a user who
    /// clears every field and submits cannot clear the stored
    /// configuration this way.)
    ///
    /// # Errors
    ///
    /// - [`RelayError::Settings`] if the payload is malformed.
    /// - [`RelayError::Store`] / [`RelayError::Host`] on adapter failure.
    pub fn on_webview_closed(&self, response: Option<&str>) -> Result<(), RelayError> {
        let settings = match response {
            None => SettingsMap::new(),
            Some(payload) => decode_response(payload)?,
        };

        if settings.is_empty() {
            debug!("configuration page returned an empty mapping; ignoring");
            return Ok(());
        }

        let text = encode_settings(&settings)?;
        self.store.set(&self.config.storage_key, &text)?;
        info!(keys = settings.len(), "persisted settings and forwarding to watch");
        self.device.send_app_message(&settings)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
