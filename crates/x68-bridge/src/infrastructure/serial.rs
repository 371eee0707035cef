//! Serial link adapters for the X68000 side.
//!
//! [`SerialLegacyPort`] implements the engine's output seam over two device
//! files: the keyboard-connector UART and the mouse-connector UART.  Both
//! links run at the fixed legacy baud rate (2400 8N1), configured out of
//! band by the systemd unit via `stty`; this module only reads and writes
//! bytes.
//!
//! The keyboard UART is bidirectional: the X68000 sends its control bytes
//! back up the same wire.  [`spawn_control_reader`] owns a cloned read
//! handle on a blocking thread and forwards each received byte onto the
//! bridge event channel.
//!
//! # The activity indicator
//!
//! The adapter hardware blinks an LED on traffic.  On Linux this maps to a
//! oneshot-trigger LED: writing `1` to its `shot` file produces one
//! fixed-length blink with no follow-up bookkeeping here.  Set it up once
//! at boot:
//!
//! ```text
//! echo oneshot > /sys/class/leds/bridge-activity/trigger
//! ```

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use x68_core::{LegacyPort, PortError};

use crate::application::BridgeEvent;
use crate::infrastructure::config::DeviceConfig;

/// The engine's output seam, backed by the two UART device files.
pub struct SerialLegacyPort {
    keyboard: File,
    mouse: File,
    activity_led: Option<File>,
}

impl SerialLegacyPort {
    /// Opens the serial devices named in `devices`.
    ///
    /// The keyboard device is opened read+write (control bytes come back on
    /// it); the mouse device write-only.  A missing or unwritable activity
    /// LED is logged and skipped rather than failing startup — the bridge
    /// works fine without its blinkenlight.
    pub fn open(devices: &DeviceConfig) -> std::io::Result<Self> {
        let keyboard = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&devices.keyboard_serial)?;
        let mouse = OpenOptions::new().write(true).open(&devices.mouse_serial)?;

        let activity_led = match &devices.activity_led {
            Some(path) => match OpenOptions::new().write(true).open(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("activity LED {} unavailable: {e}", path.display());
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            keyboard,
            mouse,
            activity_led,
        })
    }

    /// Clones the keyboard-link read handle for [`spawn_control_reader`].
    pub fn control_read_handle(&self) -> std::io::Result<File> {
        self.keyboard.try_clone()
    }
}

impl LegacyPort for SerialLegacyPort {
    fn send_keyboard_byte(&mut self, byte: u8) -> Result<(), PortError> {
        self.keyboard.write_all(&[byte])?;
        self.keyboard.flush()?;
        Ok(())
    }

    fn send_mouse_packet(&mut self, packet: [u8; 3]) -> Result<(), PortError> {
        self.mouse.write_all(&packet)?;
        self.mouse.flush()?;
        Ok(())
    }

    fn pulse_activity(&mut self) {
        if let Some(led) = &mut self.activity_led {
            if let Err(e) = led.write_all(b"1\n") {
                trace!("activity LED write failed: {e}");
            }
        }
    }
}

/// Spawns a blocking thread reading host control bytes from the keyboard
/// link and forwarding them as [`BridgeEvent::ControlByte`].
///
/// The thread exits when the device read fails or the event channel closes.
pub fn spawn_control_reader(
    mut handle: File,
    events: mpsc::Sender<BridgeEvent>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("control-reader".into())
        .spawn(move || {
            let mut buf = [0u8; 1];
            loop {
                match handle.read(&mut buf) {
                    Ok(0) => {
                        debug!("keyboard link closed, stopping control reader");
                        break;
                    }
                    Ok(_) => {
                        if events.blocking_send(BridgeEvent::ControlByte(buf[0])).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("control byte read failed: {e}");
                        break;
                    }
                }
            }
        })
        .expect("spawning the control reader thread cannot fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("x68_serial_{tag}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn open_port(dir: &std::path::Path, activity_led: Option<PathBuf>) -> SerialLegacyPort {
        // Regular files stand in for the UART device nodes.
        std::fs::write(dir.join("kbd"), b"").unwrap();
        std::fs::write(dir.join("mouse"), b"").unwrap();
        let devices = DeviceConfig {
            keyboard_serial: dir.join("kbd"),
            mouse_serial: dir.join("mouse"),
            activity_led,
            ..DeviceConfig::default()
        };
        SerialLegacyPort::open(&devices).expect("open")
    }

    #[test]
    fn test_keyboard_bytes_reach_the_device() {
        let dir = temp_dir("kbd");
        let mut port = open_port(&dir, None);

        port.send_keyboard_byte(0x1e).unwrap();
        port.send_keyboard_byte(0x9e).unwrap();

        assert_eq!(std::fs::read(dir.join("kbd")).unwrap(), vec![0x1e, 0x9e]);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_mouse_packet_written_as_three_bytes() {
        let dir = temp_dir("mouse");
        let mut port = open_port(&dir, None);

        port.send_mouse_packet([0x01, 10, 0xF6]).unwrap();

        assert_eq!(
            std::fs::read(dir.join("mouse")).unwrap(),
            vec![0x01, 10, 0xF6]
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_activity_led_does_not_fail_open() {
        let dir = temp_dir("led");
        let mut port = open_port(&dir, Some(dir.join("no_such_led")));
        // Pulsing with no LED is a no-op, not a panic.
        port.pulse_activity();
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_pulse_writes_to_led_shot_file() {
        let dir = temp_dir("shot");
        let shot = dir.join("shot");
        std::fs::write(&shot, b"").unwrap();
        let mut port = open_port(&dir, Some(shot.clone()));

        port.pulse_activity();

        assert_eq!(std::fs::read(&shot).unwrap(), b"1\n");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_control_reader_forwards_bytes_then_stops_at_eof() {
        let dir = temp_dir("reader");
        let path = dir.join("control");
        std::fs::write(&path, [0b0110_0011u8, 0b1000_0001]).unwrap();

        let (tx, mut rx) = mpsc::channel(8);
        let handle = spawn_control_reader(File::open(&path).unwrap(), tx);

        let mut received = Vec::new();
        while let Some(event) = rx.blocking_recv() {
            match event {
                BridgeEvent::ControlByte(b) => received.push(b),
                other => panic!("unexpected event: {other:?}"),
            }
        }
        handle.join().unwrap();

        assert_eq!(received, vec![0b0110_0011, 0b1000_0001]);
        std::fs::remove_dir_all(&dir).ok();
    }
}
