//! Domain entities for the PingChrong companion.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: no I/O, no async, no host-runtime calls.  It defines the
//! one data type that makes this system what it is - the settings mapping
//! exchanged between the configuration page, local storage, and the watch.
//!
//! Code in outer layers (codec, application, infrastructure) depends on the
//! domain; the domain never depends on them.

/// The settings mapping - the core domain concept.
///
/// See [`settings::SettingsMap`] for the main type.
pub mod settings;
