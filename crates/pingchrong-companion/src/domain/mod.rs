//! Domain layer: the host runtime contract as pure types.
//!
//! The host runtime - whatever embeds this companion - dispatches lifecycle
//! events to it and executes its outbound commands (sending an app message
//! to the watch, opening a URL).  This module defines both directions of
//! that contract as serde-tagged enums; it contains no I/O.

pub mod events;

pub use events::{HostCommand, HostEvent};
