//! Infrastructure layer: adapters between the application and the world.
//!
//! - **`storage`** - the TOML configuration file and the file-backed
//!   settings store (plus an in-memory store for tests).
//! - **`host`** - the host-runtime channel: a line-delimited-JSON pipe on
//!   stdin/stdout, the event loop that drives the relay, and recording
//!   mock adapters.
//!
//! Keeping these concerns here - rather than scattered through the relay -
//! means the host channel or the storage format can change without touching
//! the handler logic.

pub mod host;
pub mod storage;

pub use host::pipe::{run_event_loop, PipeHost};
pub use storage::file::FileSettingsStore;
