//! hidraw report readers.
//!
//! Each USB device gets a dedicated blocking thread that reads raw
//! boot-protocol reports from its `/dev/hidrawN` node and forwards them as
//! [`BridgeEvent`]s.  hidraw delivers exactly one report per `read`, so no
//! framing is needed — only a length check.
//!
//! Devices must be in boot protocol for the fixed report shapes to hold;
//! the udev rule shipped with the daemon takes care of that via the
//! `HID_SET_PROTOCOL` ioctl before the bridge attaches.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use x68_core::{KeyboardReport, MouseReport};

use crate::application::BridgeEvent;

/// Boot-protocol keyboard report length: modifiers, reserved, 6 key slots.
const KEYBOARD_REPORT_LEN: usize = 8;
/// Minimum boot-protocol mouse report length: buttons, dx, dy.  Some mice
/// append a wheel byte, which the legacy protocol has no use for.
const MOUSE_REPORT_MIN_LEN: usize = 3;

/// Spawns a blocking thread reading 8-byte keyboard reports from `path`.
///
/// The device is opened here so startup fails loudly on a bad path; the
/// thread exits when the device read fails or the event channel closes.
pub fn spawn_keyboard_reader(
    path: &Path,
    events: mpsc::Sender<BridgeEvent>,
) -> std::io::Result<thread::JoinHandle<()>> {
    let mut device = File::open(path)?;
    let handle = thread::Builder::new()
        .name("hid-keyboard".into())
        .spawn(move || {
            let mut buf = [0u8; 64];
            loop {
                match device.read(&mut buf) {
                    Ok(n) if n >= KEYBOARD_REPORT_LEN => {
                        let mut report = [0u8; KEYBOARD_REPORT_LEN];
                        report.copy_from_slice(&buf[..KEYBOARD_REPORT_LEN]);
                        let event = BridgeEvent::Keyboard(KeyboardReport::from_boot_bytes(report));
                        if events.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Ok(0) => {
                        debug!("keyboard hidraw closed, stopping reader");
                        break;
                    }
                    Ok(n) => warn!("short keyboard report ({n} bytes), skipped"),
                    Err(e) => {
                        warn!("keyboard hidraw read failed: {e}");
                        break;
                    }
                }
            }
        })?;
    Ok(handle)
}

/// Spawns a blocking thread reading mouse reports from `path`.
///
/// Only the first three bytes of each report are used; a trailing wheel
/// byte is ignored.
pub fn spawn_mouse_reader(
    path: &Path,
    events: mpsc::Sender<BridgeEvent>,
) -> std::io::Result<thread::JoinHandle<()>> {
    let mut device = File::open(path)?;
    let handle = thread::Builder::new()
        .name("hid-mouse".into())
        .spawn(move || {
            let mut buf = [0u8; 64];
            loop {
                match device.read(&mut buf) {
                    Ok(n) if n >= MOUSE_REPORT_MIN_LEN => {
                        let report = MouseReport::new(buf[0], buf[1] as i8, buf[2] as i8);
                        if events.blocking_send(BridgeEvent::Mouse(report)).is_err() {
                            break;
                        }
                    }
                    Ok(0) => {
                        debug!("mouse hidraw closed, stopping reader");
                        break;
                    }
                    Ok(n) => warn!("short mouse report ({n} bytes), skipped"),
                    Err(e) => {
                        warn!("mouse hidraw read failed: {e}");
                        break;
                    }
                }
            }
        })?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_report_file(tag: &str, content: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("x68_hid_{tag}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("device");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_keyboard_reader_parses_boot_reports() {
        // One report: left shift held, A pressed (reserved byte is junk).
        let path = temp_report_file("kbd", &[0x02, 0xFF, 0x04, 0, 0, 0, 0, 0]);
        let (tx, mut rx) = mpsc::channel(8);
        let handle = spawn_keyboard_reader(&path, tx).unwrap();

        match rx.blocking_recv() {
            Some(BridgeEvent::Keyboard(report)) => {
                assert_eq!(report.modifiers.0, 0x02);
                assert_eq!(report.keycodes, [0x04, 0, 0, 0, 0, 0]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        handle.join().unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_mouse_reader_ignores_wheel_byte() {
        // 4-byte report: left button, dx=5, dy=-3, wheel byte ignored.
        let path = temp_report_file("mouse", &[0x01, 5, 0xFD, 0x7F]);
        let (tx, mut rx) = mpsc::channel(8);
        let handle = spawn_mouse_reader(&path, tx).unwrap();

        match rx.blocking_recv() {
            Some(BridgeEvent::Mouse(report)) => {
                assert_eq!(report.buttons, 0x01);
                assert_eq!(report.dx, 5);
                assert_eq!(report.dy, -3);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        handle.join().unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_reader_fails_fast_on_missing_device() {
        let (tx, _rx) = mpsc::channel(8);
        let result = spawn_keyboard_reader(Path::new("/nonexistent/hidraw99"), tx);
        assert!(result.is_err());
    }
}
