//! Host-runtime adapters.
//!
//! The companion talks to its host over newline-delimited JSON: events
//! arrive on stdin, commands leave on stdout.  [`pipe`] implements that
//! transport; [`mock`] provides recording doubles for tests.

pub mod mock;
pub mod pipe;
