//! x68-bridge — entry point.
//!
//! This daemon lets modern USB keyboards and mice drive a Sharp X68000.
//! It reads boot-protocol HID reports from hidraw devices, translates them
//! through `x68-core`, and writes the legacy byte streams to the serial
//! links wired to the X68000's keyboard and mouse connectors.
//!
//! # Usage
//!
//! ```text
//! x68-bridge [OPTIONS]
//!
//! Options:
//!   --config          <PATH>  Config file [default: /etc/x68-bridge/config.toml]
//!   --keyboard-hid    <PATH>  USB keyboard hidraw node (overrides config)
//!   --mouse-hid       <PATH>  USB mouse hidraw node (overrides config)
//!   --keyboard-serial <PATH>  X68000 keyboard UART (overrides config)
//!   --mouse-serial    <PATH>  X68000 mouse UART (overrides config)
//! ```
//!
//! # Environment variable overrides
//!
//! Each option can also come from an environment variable; CLI args take
//! precedence when both are present.
//!
//! | Variable               | Default                        |
//! |------------------------|--------------------------------|
//! | `X68_BRIDGE_CONFIG`    | `/etc/x68-bridge/config.toml`  |
//! | `X68_KEYBOARD_HID`     | from config file               |
//! | `X68_MOUSE_HID`        | from config file               |
//! | `X68_KEYBOARD_SERIAL`  | from config file               |
//! | `X68_MOUSE_SERIAL`     | from config file               |
//!
//! # Architecture overview
//!
//! ```text
//! USB keyboard ─ hidraw ─┐                      ┌─ UART ─ keyboard connector
//! USB mouse ─── hidraw ──┤                      │         (key bytes out,
//! READY line ── sysfs ───┼→ event channel       │          control bytes in)
//! mouse-req ─── sysfs ───┘        ↓             │
//!                          BridgeService ───────┼─ UART ─ mouse connector
//!                          (x68_core::Engine)   └─ LED ── activity blink
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use x68_bridge::application::BridgeService;
use x68_bridge::infrastructure::config::{self, BridgeConfig, DEFAULT_CONFIG_PATH};
use x68_bridge::infrastructure::{hid, serial, signals};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// USB HID to X68000 serial input bridge.
///
/// The `#[derive(Parser)]` macro from `clap` generates the argument parser
/// automatically from the struct fields and their `#[arg(...)]` attributes.
#[derive(Debug, Parser)]
#[command(
    name = "x68-bridge",
    about = "Bridges USB keyboards and mice onto X68000 serial input ports",
    version
)]
struct Cli {
    /// Path of the TOML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, env = "X68_BRIDGE_CONFIG")]
    config: PathBuf,

    /// hidraw node of the USB keyboard; overrides the config file.
    #[arg(long, env = "X68_KEYBOARD_HID")]
    keyboard_hid: Option<PathBuf>,

    /// hidraw node of the USB mouse; overrides the config file.
    #[arg(long, env = "X68_MOUSE_HID")]
    mouse_hid: Option<PathBuf>,

    /// Serial device wired to the X68000 keyboard connector; overrides the
    /// config file.
    #[arg(long, env = "X68_KEYBOARD_SERIAL")]
    keyboard_serial: Option<PathBuf>,

    /// Serial device wired to the X68000 mouse connector; overrides the
    /// config file.
    #[arg(long, env = "X68_MOUSE_SERIAL")]
    mouse_serial: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file and applies the CLI path overrides.
    fn load_config(&self) -> Result<BridgeConfig, config::ConfigError> {
        let mut cfg = config::load_config(&self.config)?;
        if let Some(path) = &self.keyboard_hid {
            cfg.devices.keyboard_hid = path.clone();
        }
        if let Some(path) = &self.mouse_hid {
            cfg.devices.mouse_hid = path.clone();
        }
        if let Some(path) = &self.keyboard_serial {
            cfg.devices.keyboard_serial = path.clone();
        }
        if let Some(path) = &self.mouse_serial {
            cfg.devices.mouse_serial = path.clone();
        }
        Ok(cfg)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = cli
        .load_config()
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    info!(
        "x68-bridge starting — keyboard={} mouse={}",
        cfg.devices.keyboard_serial.display(),
        cfg.devices.mouse_serial.display()
    );

    // ── Legacy-side serial links ──────────────────────────────────────────────
    let port = serial::SerialLegacyPort::open(&cfg.devices)
        .context("opening X68000 serial devices")?;
    let control_handle = port
        .control_read_handle()
        .context("cloning keyboard link read handle")?;

    // ── Event sources ─────────────────────────────────────────────────────────
    let (events_tx, events_rx) = tokio::sync::mpsc::channel(64);

    hid::spawn_keyboard_reader(&cfg.devices.keyboard_hid, events_tx.clone())
        .with_context(|| format!("opening {}", cfg.devices.keyboard_hid.display()))?;
    hid::spawn_mouse_reader(&cfg.devices.mouse_hid, events_tx.clone())
        .with_context(|| format!("opening {}", cfg.devices.mouse_hid.display()))?;
    serial::spawn_control_reader(control_handle, events_tx.clone());
    signals::spawn_line_watcher(
        &cfg.devices.ready_gpio,
        &cfg.devices.mouse_request_gpio,
        std::time::Duration::from_millis(cfg.timing.signal_poll_interval_ms),
        events_tx,
    )
    .context("opening GPIO value files")?;

    // ── Event loop ────────────────────────────────────────────────────────────
    let service = BridgeService::new(
        port,
        std::time::Duration::from_millis(cfg.timing.tick_interval_ms),
    );

    info!("x68-bridge ready");
    tokio::select! {
        _ = service.run(events_rx) => {
            // All reader threads died (devices unplugged or failed).
            info!("x68-bridge stopped: event sources closed");
        }
        result = tokio::signal::ctrl_c() => {
            result.context("listening for Ctrl-C")?;
            info!("x68-bridge stopped: shutdown signal received");
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
