//! pingchrong-companion library crate.
//!
//! The companion process for the PingChrong watchface: it reacts to
//! lifecycle events from the host runtime, persists the settings mapping to
//! local storage, relays it to the paired watch, and opens the remote
//! configuration page on request.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Host runtime (JSON lines on stdin/stdout)
//!         ↕
//! [pingchrong-companion]
//!   ├── domain/           Pure types: HostEvent / HostCommand enums
//!   ├── application/      SettingsRelay: the three event handlers over ports
//!   └── infrastructure/
//!         ├── storage/    TOML config file + file-backed settings store
//!         └── host/       stdio pipe adapter + recording mocks
//!         ↕
//! Paired watch (app messages; delivery owned by the host runtime)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies beyond serde and pingchrong-core.
//! - `application` depends on `domain` and `pingchrong-core` only - it does
//!   no I/O of its own, reaching storage, messaging, and URL opening through
//!   trait ports.
//! - `infrastructure` depends on all other layers plus `tokio` and the file
//!   system.
//!
//! This split is what makes the one meaningful contract here - settings
//! round-tripping - testable without a host runtime, a watch, or a browser:
//! the integration tests drive [`application::relay::SettingsRelay`] through
//! mock ports and assert on the recorded side effects.

/// Domain layer: the host event/command contract as pure types.
pub mod domain;

/// Application layer: the settings relay use case.
pub mod application;

/// Infrastructure layer: storage and host-channel adapters.
pub mod infrastructure;
