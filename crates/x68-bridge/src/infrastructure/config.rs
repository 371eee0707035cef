//! TOML-based configuration for the bridge daemon.
//!
//! Reads `BridgeConfig` from a single TOML file, `/etc/x68-bridge/config.toml`
//! by default (overridable with `--config`).  Example:
//!
//! ```toml
//! [devices]
//! keyboard_hid = "/dev/hidraw0"
//! mouse_hid = "/dev/hidraw1"
//! keyboard_serial = "/dev/ttyAMA1"
//! mouse_serial = "/dev/ttyAMA2"
//!
//! [timing]
//! tick_interval_ms = 10
//! signal_poll_interval_ms = 1
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.  This lets the
//! daemon start on first run (before a config file exists) and keeps old
//! config files working when newer fields are added.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file location for the daemon.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/x68-bridge/config.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
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

/// Top-level daemon configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BridgeConfig {
    #[serde(default)]
    pub devices: DeviceConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Paths of the device nodes the bridge attaches to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// hidraw node of the USB keyboard (boot protocol).
    #[serde(default = "default_keyboard_hid")]
    pub keyboard_hid: PathBuf,
    /// hidraw node of the USB mouse (boot protocol).
    #[serde(default = "default_mouse_hid")]
    pub mouse_hid: PathBuf,
    /// Serial device wired to the X68000 keyboard connector.  The bridge
    /// transmits key bytes on it and receives host control bytes from it.
    #[serde(default = "default_keyboard_serial")]
    pub keyboard_serial: PathBuf,
    /// Serial device wired to the X68000 mouse connector (transmit only).
    #[serde(default = "default_mouse_serial")]
    pub mouse_serial: PathBuf,
    /// sysfs GPIO value file for the host's READY line.
    #[serde(default = "default_ready_gpio")]
    pub ready_gpio: PathBuf,
    /// sysfs GPIO value file for the host's mouse-request line.
    #[serde(default = "default_mouse_request_gpio")]
    pub mouse_request_gpio: PathBuf,
    /// Optional `shot` file of a oneshot-trigger LED, pulsed on activity.
    /// When absent the activity indicator is simply skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_led: Option<PathBuf>,
}

/// Poll cadences of the event loop and the GPIO watcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Repeat-timer tick interval in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// GPIO line sampling interval in milliseconds.
    #[serde(default = "default_signal_poll_interval_ms")]
    pub signal_poll_interval_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_keyboard_hid() -> PathBuf {
    PathBuf::from("/dev/hidraw0")
}
fn default_mouse_hid() -> PathBuf {
    PathBuf::from("/dev/hidraw1")
}
fn default_keyboard_serial() -> PathBuf {
    PathBuf::from("/dev/ttyAMA1")
}
fn default_mouse_serial() -> PathBuf {
    PathBuf::from("/dev/ttyAMA2")
}
fn default_ready_gpio() -> PathBuf {
    PathBuf::from("/sys/class/gpio/gpio17/value")
}
fn default_mouse_request_gpio() -> PathBuf {
    PathBuf::from("/sys/class/gpio/gpio27/value")
}
fn default_tick_interval_ms() -> u64 {
    10
}
fn default_signal_poll_interval_ms() -> u64 {
    1
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            keyboard_hid: default_keyboard_hid(),
            mouse_hid: default_mouse_hid(),
            keyboard_serial: default_keyboard_serial(),
            mouse_serial: default_mouse_serial(),
            ready_gpio: default_ready_gpio(),
            mouse_request_gpio: default_mouse_request_gpio(),
            activity_led: None,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            signal_poll_interval_ms: default_signal_poll_interval_ms(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads `BridgeConfig` from `path`, returning `BridgeConfig::default()` if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: BridgeConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BridgeConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
