//! GPIO line watcher for the READY and mouse-request lines.
//!
//! The X68000 drives two side-band lines next to the serial data: READY
//! (low while the host cannot accept bytes) and mouse-request (pulsed low
//! when the host wants a mouse packet).  The adapter hardware serviced
//! these with edge interrupts; here a blocking thread samples the exported
//! sysfs value files at a fixed cadence and turns level changes into
//! [`SignalEvent`]s on the bridge event channel.  Polling at 1 ms is far
//! faster than the host ever toggles either line.
//!
//! Each sample seeks back to the start of the value file; sysfs re-reads
//! the pin on every read.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use crate::application::{BridgeEvent, SignalEvent};

/// Reads the current level of a sysfs GPIO value file (`true` = high).
fn read_level(file: &mut File) -> std::io::Result<bool> {
    file.seek(SeekFrom::Start(0))?;
    let mut buf = [0u8; 1];
    file.read_exact(&mut buf)?;
    Ok(buf[0] == b'1')
}

/// Spawns a blocking thread watching the READY and mouse-request lines.
///
/// An initial sample primes the previous-level state; the READY level at
/// startup is reported once so the engine's gate matches the wire before
/// the first byte goes out.  After that, only changes produce events:
///
/// - READY edge → [`SignalEvent::TransmitInhibit`] with the new level
///   inverted (the line is active-low: low means inhibit).
/// - mouse-request falling edge → [`SignalEvent::MouseRequest`].
///
/// The thread exits when a sample fails or the event channel closes.
pub fn spawn_line_watcher(
    ready_path: &Path,
    request_path: &Path,
    poll_interval: Duration,
    events: mpsc::Sender<BridgeEvent>,
) -> std::io::Result<thread::JoinHandle<()>> {
    let mut ready = File::open(ready_path)?;
    let mut request = File::open(request_path)?;

    let handle = thread::Builder::new()
        .name("line-watcher".into())
        .spawn(move || {
            let mut ready_level = match read_level(&mut ready) {
                Ok(level) => level,
                Err(e) => {
                    warn!("READY line initial read failed: {e}");
                    return;
                }
            };
            let mut request_level = match read_level(&mut request) {
                Ok(level) => level,
                Err(e) => {
                    warn!("mouse-request line initial read failed: {e}");
                    return;
                }
            };

            // Report the startup READY state so the gate starts correct
            // even when the host is already busy.
            let initial = BridgeEvent::Signal(SignalEvent::TransmitInhibit {
                inhibited: !ready_level,
            });
            if events.blocking_send(initial).is_err() {
                return;
            }

            loop {
                thread::sleep(poll_interval);

                match read_level(&mut ready) {
                    Ok(level) if level != ready_level => {
                        ready_level = level;
                        let event = BridgeEvent::Signal(SignalEvent::TransmitInhibit {
                            inhibited: !level,
                        });
                        if events.blocking_send(event).is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("READY line read failed: {e}");
                        return;
                    }
                }

                match read_level(&mut request) {
                    Ok(level) => {
                        let falling = request_level && !level;
                        request_level = level;
                        if falling {
                            let event = BridgeEvent::Signal(SignalEvent::MouseRequest);
                            if events.blocking_send(event).is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        warn!("mouse-request line read failed: {e}");
                        return;
                    }
                }
            }
        })?;
    Ok(handle)
}
