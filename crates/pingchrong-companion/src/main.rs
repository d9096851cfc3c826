//! PingChrong companion - entry point.
//!
//! This binary sits between the host runtime (which owns the watch
//! connection and the configuration webview) and the PingChrong watchface.
//! It persists the watchface's settings record and relays it in both
//! directions: to the watch on startup, and from the configuration page
//! back to both the record and the watch.
//!
//! # Usage
//!
//! ```text
//! pingchrong-companion [OPTIONS]
//!
//! Options:
//!   --config      <PATH>  Config file path [default: platform config dir]
//!   --storage-dir <PATH>  Directory for the settings record
//!   --page-url    <URL>   Base URL of the settings page
//!   --version-tag <TAG>   Version tag for the page's `v` query parameter
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable                 | Description                       |
//! |--------------------------|-----------------------------------|
//! | `PINGCHRONG_STORAGE_DIR` | Directory for the settings record |
//! | `PINGCHRONG_PAGE_URL`    | Base URL of the settings page     |
//! | `PINGCHRONG_VERSION_TAG` | Page version tag                  |
//!
//! # Architecture overview
//!
//! ```text
//! Host runtime  (JSON events over stdin, JSON commands over stdout)
//!       ↕
//! pingchrong-companion  ← this process
//!   domain/         HostEvent / HostCommand message types
//!   application/    SettingsRelay - the three lifecycle handlers
//!   infrastructure/
//!     host/         stdin/stdout pipe transport
//!     storage/      file-backed settings record + TOML config
//!       ↕
//! Watch  (app messages, delivered by the host runtime)
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pingchrong_companion::application::relay::{RelayConfig, SettingsRelay};
use pingchrong_companion::infrastructure::storage::config::{
    load_config, load_config_from, storage_dir, AppConfig,
};
use pingchrong_companion::infrastructure::{run_event_loop, FileSettingsStore, PipeHost};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// PingChrong watchface companion.
///
/// Relays the persisted settings record between the remote configuration
/// page and the paired watch.
///
/// The `#[derive(Parser)]` macro from `clap` generates the argument parser
/// automatically from the struct fields and their `#[arg(...)]` attributes.
#[derive(Debug, Parser)]
#[command(
    name = "pingchrong-companion",
    about = "Settings relay companion for the PingChrong watchface",
    version
)]
struct Cli {
    /// Path to the TOML config file.
    ///
    /// When omitted, the platform default location is used and a missing
    /// file falls back to built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the settings record file.
    ///
    /// Overrides `storage.dir` from the config file.
    #[arg(long, env = "PINGCHRONG_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Base URL of the remote settings page (without `/settings.html`).
    ///
    /// Overrides `page.base_url` from the config file.
    #[arg(long, env = "PINGCHRONG_PAGE_URL")]
    page_url: Option<String>,

    /// Version tag sent as the page's `v` query parameter.
    ///
    /// Overrides `page.version_tag` from the config file.
    #[arg(long, env = "PINGCHRONG_VERSION_TAG")]
    version_tag: Option<String>,
}

impl Cli {
    /// Merges CLI overrides on top of the loaded [`AppConfig`] to produce
    /// the relay's runtime configuration and the storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error only when no storage directory is configured
    /// anywhere and the platform config directory cannot be determined.
    fn resolve(self, file_config: AppConfig) -> anyhow::Result<(RelayConfig, PathBuf)> {
        let relay_config = RelayConfig {
            storage_key: file_config.storage.key.clone(),
            page_base_url: self.page_url.unwrap_or(file_config.page.base_url.clone()),
            version_tag: self
                .version_tag
                .unwrap_or(file_config.page.version_tag.clone()),
        };

        let dir = match self.storage_dir {
            Some(dir) => dir,
            None => storage_dir(&file_config)
                .context("could not determine a directory for the settings record")?,
        };

        Ok((relay_config, dir))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. CLI arguments are parsed with `clap` into a [`Cli`] struct.
/// 2. The TOML config file is loaded (missing file → defaults).
/// 3. `tracing_subscriber` is initialised.  The log level comes from the
///    `RUST_LOG` environment variable, falling back to the config file's
///    `companion.log_level`.
/// 4. The relay is wired: file-backed settings store + stdout pipe host.
/// 5. A Ctrl+C handler is spawned; it clears a shared `AtomicBool`.
/// 6. [`run_event_loop`] reads host events from stdin until EOF, a
///    `shutdown` event, or the flag is cleared.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Parse CLI arguments ───────────────────────────────────────────────────
    let cli = Cli::parse();

    // ── Load config file ──────────────────────────────────────────────────────
    //
    // An explicit --config path must resolve; the default location tolerates
    // a missing file by falling back to defaults.
    let file_config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => load_config().context("failed to load config")?,
    };

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `EnvFilter::try_from_default_env()` reads the `RUST_LOG` environment
    // variable.  If it is absent or invalid, we fall back to the configured
    // level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(file_config.companion.log_level.clone())
        }))
        .init();

    let (relay_config, record_dir) = cli.resolve(file_config)?;

    // ── Wire the relay ────────────────────────────────────────────────────────
    //
    // One PipeHost serves both outbound ports; the host multiplexes all
    // commands on stdout.
    let store = Arc::new(FileSettingsStore::new(record_dir));

    info!(
        "PingChrong companion starting — page={}, records={}",
        relay_config.page_base_url,
        store.dir().display()
    );

    let host = Arc::new(PipeHost::stdout());
    let relay = SettingsRelay::new(relay_config, store, host.clone(), host);

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    //
    // The event loop polls this flag every 200 ms between stdin reads, so a
    // Ctrl+C never waits on a blocked read for long.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C — initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── Main event loop ───────────────────────────────────────────────────────
    run_event_loop(relay, running).await?;

    info!("PingChrong companion stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_leave_all_overrides_unset() {
        // Arrange: parse with no arguments (all defaults apply)
        let cli = Cli::parse_from(["pingchrong-companion"]);

        // Assert
        assert_eq!(cli.config, None);
        assert_eq!(cli.storage_dir, None);
        assert_eq!(cli.page_url, None);
        assert_eq!(cli.version_tag, None);
    }

    #[test]
    fn test_cli_storage_dir_override() {
        let cli = Cli::parse_from(["pingchrong-companion", "--storage-dir", "/tmp/records"]);
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/records")));
    }

    #[test]
    fn test_cli_page_url_override() {
        let cli = Cli::parse_from([
            "pingchrong-companion",
            "--page-url",
            "https://example.test/pages",
        ]);
        assert_eq!(cli.page_url.as_deref(), Some("https://example.test/pages"));
    }

    #[test]
    fn test_cli_version_tag_override() {
        let cli = Cli::parse_from(["pingchrong-companion", "--version-tag", "2-1-0"]);
        assert_eq!(cli.version_tag.as_deref(), Some("2-1-0"));
    }

    #[test]
    fn test_resolve_defaults_match_original_contract() {
        // Arrange: no CLI overrides, default config file
        let cli = Cli::parse_from(["pingchrong-companion", "--storage-dir", "/tmp/records"]);

        // Act
        let (config, dir) = cli.resolve(AppConfig::default()).unwrap();

        // Assert
        assert_eq!(config.storage_key, "pingchrong-settings");
        assert_eq!(
            config.page_base_url,
            "https://s3.amazonaws.com/pebble.rexmac.com/pingchrong"
        );
        assert_eq!(config.version_tag, "2-0-0");
        assert_eq!(dir, PathBuf::from("/tmp/records"));
    }

    #[test]
    fn test_resolve_cli_overrides_beat_config_file() {
        // Arrange: the config file carries one location, the CLI another
        let mut file_config = AppConfig::default();
        file_config.page.base_url = "https://from.config/pages".to_string();
        file_config.storage.dir = Some(PathBuf::from("/from/config"));
        let cli = Cli::parse_from([
            "pingchrong-companion",
            "--page-url",
            "https://from.cli/pages",
            "--storage-dir",
            "/from/cli",
        ]);

        // Act
        let (config, dir) = cli.resolve(file_config).unwrap();

        // Assert: CLI wins
        assert_eq!(config.page_base_url, "https://from.cli/pages");
        assert_eq!(dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_resolve_falls_back_to_config_storage_dir() {
        // Arrange: no CLI storage dir, config file provides one
        let mut file_config = AppConfig::default();
        file_config.storage.dir = Some(PathBuf::from("/from/config"));
        let cli = Cli::parse_from(["pingchrong-companion"]);

        // Act
        let (_config, dir) = cli.resolve(file_config).unwrap();

        // Assert
        assert_eq!(dir, PathBuf::from("/from/config"));
    }
}
