//! # pingchrong-core
//!
//! Shared library for the PingChrong watchface companion containing the
//! settings domain entity, the JSON codec used for storage and transport,
//! and the configuration-page URL builder.
//!
//! This crate is used by the companion application and by anything that
//! needs to speak the settings contract (e.g. test harnesses simulating the
//! configuration page).  It has zero dependencies on OS APIs, async runtimes,
//! or network sockets.
//!
//! # Architecture overview
//!
//! The PingChrong watchface is configured from a remote web page.  The
//! companion process bridges three worlds:
//!
//! - **Local storage** - a single persisted string record holding the JSON
//!   serialization of the settings mapping.
//! - **The configuration page** - receives the current settings as a URL
//!   fragment and returns a new mapping as URL-encoded JSON.
//! - **The paired watch** - receives the mapping as an app message.
//!
//! This crate defines:
//!
//! - **`domain`** - the [`SettingsMap`] entity: an ordered mapping from
//!   configuration key to a flat {string, number, boolean} value union,
//!   replaced wholesale on every completed round-trip.
//!
//! - **`codec`** - how the mapping travels as text.  `json` handles the
//!   storage/transport serialization boundary (with validation that rejects
//!   nested structures); `fragment` handles the double encoding the
//!   configuration page expects in the URL fragment.
//!
//! - **`page`** - assembly of the configuration-page URL itself.

pub mod codec;
pub mod domain;
pub mod page;

// Re-export the most-used items at the crate root so callers can write
// `pingchrong_core::SettingsMap` instead of the full module path.
pub use codec::fragment::{decode_response, encode_fragment};
pub use codec::json::{decode_settings, encode_settings};
pub use codec::SettingsError;
pub use domain::settings::{SettingsMap, SettingsValue, SETTINGS_STORAGE_KEY};
pub use page::{settings_url, DEFAULT_PAGE_BASE_URL, DEFAULT_VERSION_TAG};
