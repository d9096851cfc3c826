//! Application layer: the settings relay use case.
//!
//! The application layer sits between the domain (pure types) and the
//! infrastructure (file system, host channel).  It orchestrates one user
//! goal - keeping the configuration page, local storage, and the paired
//! watch in agreement about the settings mapping - and depends on trait
//! ports rather than concrete adapters, so it contains no file or pipe I/O.

pub mod relay;

pub use relay::{
    DeviceMessenger, EventOutcome, HostApiError, RelayConfig, RelayError, SettingsRelay,
    SettingsStore, StoreError, UrlOpener,
};
