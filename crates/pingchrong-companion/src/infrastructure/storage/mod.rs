//! Storage infrastructure: configuration file and settings record
//! persistence.
//!
//! - **`config`** - reads the companion's own TOML configuration (page URL,
//!   version tag, storage location) from the platform config directory, with
//!   sensible defaults on first run.
//! - **`file`** - the production [`FileSettingsStore`]: one file per record
//!   under a storage directory.
//! - **`memory`** - an in-memory store for unit and integration tests.

pub mod config;
pub mod file;
pub mod memory;
