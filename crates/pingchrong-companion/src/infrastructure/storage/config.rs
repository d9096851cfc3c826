//! TOML-based configuration persistence for the companion.
//!
//! Reads [`AppConfig`] from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\PingChrong\config.toml`
//! - Linux:    `~/.config/pingchrong/config.toml`
//! - macOS:    `~/Library/Application Support/PingChrong/config.toml`
//!
//! This file configures the *companion itself* - where the settings page
//! lives, what version tag to send, where the settings record is stored.
//! It is distinct from the settings record, which belongs to the watchface
//! and round-trips through the configuration page.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return
//! value of `some_fn()` when the field is absent from the TOML file, so the
//! companion works on first run (no file yet) and when upgrading from an
//! older file missing newer fields.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pingchrong_core::{DEFAULT_PAGE_BASE_URL, DEFAULT_VERSION_TAG, SETTINGS_STORAGE_KEY};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level companion configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub companion: CompanionSection,
    #[serde(default)]
    pub page: PageSection,
    #[serde(default)]
    pub storage: StorageSection,
}

/// General companion behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanionSection {
    /// `tracing` log level used when `RUST_LOG` is unset:
    /// `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Remote configuration page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageSection {
    /// Base URL of the settings page (without `/settings.html`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Version tag sent as the page's `v` query parameter.
    #[serde(default = "default_version_tag")]
    pub version_tag: String,
}

/// Settings-record storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    /// Key under which the settings record is stored.
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// Directory holding the record file.  Absent → the platform config
    /// directory (same directory as this config file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_base_url() -> String {
    DEFAULT_PAGE_BASE_URL.to_string()
}
fn default_version_tag() -> String {
    DEFAULT_VERSION_TAG.to_string()
}
fn default_storage_key() -> String {
    SETTINGS_STORAGE_KEY.to_string()
}

impl Default for CompanionSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version_tag: default_version_tag(),
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            dir: None,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`AppConfig`] from disk, returning `AppConfig::default()` if the
/// file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than
/// "not found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = config_file_path()?;
    load_config_from(&path)
}

/// Loads [`AppConfig`] from an explicit path (used by `--config`).
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_from(path: &std::path::Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Resolves the directory for the settings record file: the configured
/// `storage.dir` when set, otherwise the platform config directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] only when no directory is
/// configured and the platform directory cannot be determined.
pub fn storage_dir(config: &AppConfig) -> Result<PathBuf, ConfigError> {
    match &config.storage.dir {
        Some(dir) => Ok(dir.clone()),
        None => config_dir(),
    }
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("PingChrong"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("pingchrong"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/PingChrong
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("PingChrong")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
