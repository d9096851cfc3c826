//! Newline-delimited JSON transport over stdin/stdout.
//!
//! The host runtime delivers one [`HostEvent`] per line on stdin and
//! consumes one [`HostCommand`] per line on stdout.  The event loop reads
//! sequentially, so every handler runs to completion before the next event
//! is dispatched.
//!
//! # Shutdown behavior
//!
//! The loop exits when stdin reaches EOF, when a `shutdown` event arrives,
//! or when the shared `running` flag is cleared (Ctrl-C).  The flag is
//! polled between reads with a 200 ms timeout so a signal never waits on a
//! blocked read for long.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, trace, warn};

use pingchrong_core::SettingsMap;

use crate::application::relay::{
    DeviceMessenger, EventOutcome, HostApiError, SettingsRelay, UrlOpener,
};
use crate::domain::events::{HostCommand, HostEvent};

/// Writes [`HostCommand`] lines to an output pipe.
///
/// Implements both outbound ports over the same writer, since the host
/// multiplexes all commands on one stream.  The writer sits behind a mutex
/// so the two ports can share one `PipeHost` across threads.
pub struct PipeHost<W: Write + Send> {
    out: Mutex<W>,
}

impl PipeHost<std::io::Stdout> {
    /// The production wiring: commands go to stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> PipeHost<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    fn write_command(&self, command: &HostCommand) -> Result<(), HostApiError> {
        let line = serde_json::to_string(command)
            .map_err(|e| HostApiError(format!("failed to encode command: {e}")))?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| HostApiError("output pipe lock poisoned".to_string()))?;
        writeln!(out, "{line}").map_err(|e| HostApiError(format!("pipe write failed: {e}")))?;
        // Flush per command: the host reads line-by-line and must see each
        // command as soon as the handler emits it.
        out.flush()
            .map_err(|e| HostApiError(format!("pipe flush failed: {e}")))?;
        Ok(())
    }

    /// Consumes the host, returning the underlying writer (test hook).
    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> DeviceMessenger for PipeHost<W> {
    fn send_app_message(&self, settings: &SettingsMap) -> Result<(), HostApiError> {
        self.write_command(&HostCommand::SendAppMessage {
            payload: settings.clone(),
        })
    }
}

impl<W: Write + Send> UrlOpener for PipeHost<W> {
    fn open_url(&self, url: &str) -> Result<(), HostApiError> {
        self.write_command(&HostCommand::OpenUrl {
            url: url.to_string(),
        })
    }
}

/// Dispatches one raw stdin line to the relay.
///
/// Transport-level problems never stop the loop: blank lines are skipped,
/// malformed lines are logged and skipped, and a failed handler is logged
/// with the loop carrying on at the next event.
pub fn dispatch_line(relay: &SettingsRelay, line: &str) -> EventOutcome {
    let line = line.trim();
    if line.is_empty() {
        return EventOutcome::Continue;
    }

    let event: HostEvent = match serde_json::from_str(line) {
        Ok(event) => event,
        Err(e) => {
            warn!(%e, "ignoring malformed event line");
            return EventOutcome::Continue;
        }
    };

    trace!(?event, "dispatching host event");
    match relay.handle_event(&event) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(%e, ?event, "event handler failed");
            EventOutcome::Continue
        }
    }
}

/// Runs the companion's event loop until EOF, shutdown, or Ctrl-C.
///
/// # Errors
///
/// Returns an error only for stdin read failures; handler and decode
/// failures are contained inside [`dispatch_line`].
pub async fn run_event_loop(
    relay: SettingsRelay,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    info!("event loop started; reading host events from stdin");

    while running.load(Ordering::SeqCst) {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read event from stdin")? {
                    Some(line) => {
                        if dispatch_line(&relay, &line) == EventOutcome::Shutdown {
                            break;
                        }
                    }
                    None => {
                        info!("stdin closed; exiting event loop");
                        break;
                    }
                }
            }
            _ = tokio::time::sleep(Duration::from_millis(200)) => {
                // Timeout branch only re-checks the running flag.
            }
        }
    }

    info!("event loop stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::relay::{RelayConfig, SettingsStore};
    use crate::infrastructure::host::mock::{MockDeviceLink, MockUrlOpener};
    use crate::infrastructure::storage::memory::MemorySettingsStore;

    fn make_relay(stored: Option<&str>) -> (SettingsRelay, Arc<MockDeviceLink>) {
        let store: Arc<dyn SettingsStore> = Arc::new(match stored {
            Some(text) => {
                MemorySettingsStore::with_record(pingchrong_core::SETTINGS_STORAGE_KEY, text)
            }
            None => MemorySettingsStore::new(),
        });
        let device = Arc::new(MockDeviceLink::new());
        let opener = Arc::new(MockUrlOpener::new());
        let relay = SettingsRelay::new(
            RelayConfig::default(),
            store,
            Arc::clone(&device) as Arc<dyn DeviceMessenger>,
            opener,
        );
        (relay, device)
    }

    // ── PipeHost command encoding ─────────────────────────────────────────────

    #[test]
    fn test_send_app_message_writes_one_tagged_json_line() {
        // Arrange
        let host = PipeHost::new(Vec::new());
        let mut settings = SettingsMap::new();
        settings.insert("color", "red");

        // Act
        host.send_app_message(&settings).unwrap();

        // Assert: exact wire format
        let written = String::from_utf8(host.into_inner()).unwrap();
        assert_eq!(
            written,
            "{\"type\":\"sendAppMessage\",\"payload\":{\"color\":\"red\"}}\n"
        );
    }

    #[test]
    fn test_open_url_writes_one_tagged_json_line() {
        // Arrange
        let host = PipeHost::new(Vec::new());

        // Act
        host.open_url("https://example.test/settings.html?v=2-0-0#%22%7B%7D%22")
            .unwrap();

        // Assert
        let written = String::from_utf8(host.into_inner()).unwrap();
        assert_eq!(
            written,
            "{\"type\":\"openUrl\",\"url\":\"https://example.test/settings.html?v=2-0-0#%22%7B%7D%22\"}\n"
        );
    }

    #[test]
    fn test_consecutive_commands_each_get_their_own_line() {
        // Arrange
        let host = PipeHost::new(Vec::new());
        let settings = SettingsMap::new();

        // Act
        host.send_app_message(&settings).unwrap();
        host.open_url("https://example.test/").unwrap();

        // Assert
        let written = String::from_utf8(host.into_inner()).unwrap();
        assert_eq!(written.lines().count(), 2);
    }

    // ── dispatch_line ─────────────────────────────────────────────────────────

    #[test]
    fn test_dispatch_ready_line_forwards_stored_settings() {
        // Arrange
        let (relay, device) = make_relay(Some(r#"{"units":"metric"}"#));

        // Act
        let outcome = dispatch_line(&relay, r#"{"type":"ready"}"#);

        // Assert
        assert_eq!(outcome, EventOutcome::Continue);
        assert_eq!(device.sent().len(), 1);
    }

    #[test]
    fn test_dispatch_blank_line_is_skipped() {
        let (relay, device) = make_relay(Some(r#"{"units":"metric"}"#));
        let outcome = dispatch_line(&relay, "   \t  ");
        assert_eq!(outcome, EventOutcome::Continue);
        assert!(device.sent().is_empty());
    }

    #[test]
    fn test_dispatch_malformed_line_continues_without_side_effects() {
        // Arrange
        let (relay, device) = make_relay(Some(r#"{"units":"metric"}"#));

        // Act: garbage and an unknown event type
        let first = dispatch_line(&relay, "not json");
        let second = dispatch_line(&relay, r#"{"type":"unknownEvent"}"#);

        // Assert: both tolerated, nothing dispatched
        assert_eq!(first, EventOutcome::Continue);
        assert_eq!(second, EventOutcome::Continue);
        assert!(device.sent().is_empty());
    }

    #[test]
    fn test_dispatch_shutdown_line_requests_exit() {
        let (relay, _device) = make_relay(None);
        let outcome = dispatch_line(&relay, r#"{"type":"shutdown"}"#);
        assert_eq!(outcome, EventOutcome::Shutdown);
    }

    #[test]
    fn test_dispatch_handler_error_does_not_stop_the_loop() {
        // Arrange: corrupted stored record makes on_ready fail
        let (relay, device) = make_relay(Some("corrupted record"));

        // Act
        let outcome = dispatch_line(&relay, r#"{"type":"ready"}"#);

        // Assert: the failure is contained
        assert_eq!(outcome, EventOutcome::Continue);
        assert!(device.sent().is_empty());
    }

    #[test]
    fn test_dispatch_webview_closed_line_with_response() {
        // Arrange
        let (relay, device) = make_relay(None);

        // Act
        let outcome = dispatch_line(
            &relay,
            r#"{"type":"webviewclosed","response":"%7B%22color%22%3A%22red%22%7D"}"#,
        );

        // Assert
        assert_eq!(outcome, EventOutcome::Continue);
        let mut expected = SettingsMap::new();
        expected.insert("color", "red");
        assert_eq!(device.sent(), vec![expected]);
    }
}
