//! Recording mocks for the host ports.
//!
//! Kept unconditionally public (not behind `#[cfg(test)]`) so integration
//! tests under `tests/` can wire a relay over them too.

use std::sync::Mutex;

use pingchrong_core::SettingsMap;

use crate::application::relay::{DeviceMessenger, HostApiError, UrlOpener};

/// A [`DeviceMessenger`] that records every mapping it was asked to send.
#[derive(Default)]
pub struct MockDeviceLink {
    sent: Mutex<Vec<SettingsMap>>,
}

impl MockDeviceLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<SettingsMap> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DeviceMessenger for MockDeviceLink {
    fn send_app_message(&self, settings: &SettingsMap) -> Result<(), HostApiError> {
        self.sent
            .lock()
            .map_err(|_| HostApiError("mock device lock poisoned".to_string()))?
            .push(settings.clone());
        Ok(())
    }
}

/// A [`UrlOpener`] that records every URL it was asked to open.
#[derive(Default)]
pub struct MockUrlOpener {
    opened: Mutex<Vec<String>>,
}

impl MockUrlOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl UrlOpener for MockUrlOpener {
    fn open_url(&self, url: &str) -> Result<(), HostApiError> {
        self.opened
            .lock()
            .map_err(|_| HostApiError("mock opener lock poisoned".to_string()))?
            .push(url.to_string());
        Ok(())
    }
}
