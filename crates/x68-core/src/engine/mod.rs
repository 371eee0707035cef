//! The protocol translation engine.
//!
//! [`Engine`] owns every piece of mutable bridge state — previous keyboard
//! snapshot, mouse accumulator, control configuration, repeat timer and
//! transmit gate — as one explicit struct.  There are no globals, so tests
//! (and a future multi-adapter build) can run any number of independent
//! instances.
//!
//! The engine is single-threaded by construction: every handler takes
//! `&mut self`, so the encode-then-reset sequence of a mouse transmit can
//! never interleave with a concurrent request.  The hosting layer is
//! responsible for funnelling hardware signal edges into these handlers one
//! at a time (a channel drained by the poll loop does this in the bridge
//! daemon); in exchange no edge is ever dropped and no field is ever torn.
//!
//! Outbound bytes leave through the [`LegacyPort`] seam.  Port failures are
//! logged and swallowed: the legacy wire protocol has no acknowledgement or
//! error channel, so there is nobody to report a failed byte to.

pub mod accumulator;
pub mod differ;
pub mod gate;
pub mod repeat;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::keymap::hid::{KeyboardReport, MouseReport};
use crate::protocol::control::{ControlCommand, ControlConfig};
use crate::protocol::keyboard::KeyEvent;

use accumulator::MouseAccumulator;
use differ::ReportDiffer;
use gate::TransmitGate;
use repeat::RepeatTimer;

/// Errors a [`LegacyPort`] implementation may report.
///
/// The engine never propagates these; they surface only in logs.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("I/O error on legacy link: {0}")]
    Io(#[from] std::io::Error),

    #[error("legacy link closed")]
    Closed,
}

/// Outbound seam to the legacy serial links and the activity indicator.
///
/// Implementations write synchronously with bounded latency (a UART byte at
/// 2400 baud); there is no queueing in the engine and none expected below
/// it.  `pulse_activity` is fire-and-forget with no backpressure.
pub trait LegacyPort {
    /// Writes one key-transition byte to the keyboard-direction link.
    fn send_keyboard_byte(&mut self, byte: u8) -> Result<(), PortError>;

    /// Writes one 3-byte packet to the mouse-direction link.
    fn send_mouse_packet(&mut self, packet: [u8; 3]) -> Result<(), PortError>;

    /// Fires the activity indicator once.
    fn pulse_activity(&mut self);
}

/// The USB HID → X68000 translation engine.
pub struct Engine<P: LegacyPort> {
    port: P,
    differ: ReportDiffer,
    mouse: MouseAccumulator,
    config: ControlConfig,
    repeat: RepeatTimer,
    gate: TransmitGate,
}

impl<P: LegacyPort> Engine<P> {
    /// Creates an engine in its power-on state, writing to `port`.
    pub fn new(port: P) -> Self {
        Self {
            port,
            differ: ReportDiffer::new(),
            mouse: MouseAccumulator::new(),
            config: ControlConfig::default(),
            repeat: RepeatTimer::new(),
            gate: TransmitGate::new(),
        }
    }

    /// Handles one boot-protocol keyboard report.
    ///
    /// Diffs it against the previous snapshot and transmits each resulting
    /// make/break byte.  Non-modifier transitions also drive the repeat
    /// timer; that state is updated even while transmission is inhibited so
    /// the held-key bookkeeping matches physical reality.
    pub fn on_keyboard_report(&mut self, report: &KeyboardReport) {
        let Self {
            port,
            differ,
            config,
            repeat,
            gate,
            ..
        } = self;

        differ.diff(report, |change| {
            if !change.is_modifier {
                repeat.observe(change.event, config.repeat_delay_ms);
            }
            Self::send_key_event(port, gate, change.event);
        });
    }

    /// Handles one boot-protocol mouse report: accumulate only, never send.
    ///
    /// Transmission happens exclusively on a mouse-request edge or a
    /// mouse-control assertion (see [`Engine::on_mouse_request_edge`]).
    pub fn on_mouse_report(&mut self, report: &MouseReport) {
        trace!(dx = report.dx, dy = report.dy, buttons = report.buttons, "mouse report");
        self.mouse.accumulate(report);
    }

    /// Decodes and applies one byte from the host-facing control stream.
    ///
    /// Unrecognized bytes are discarded silently.  A false→true transition
    /// of the mouse-control flag triggers one immediate mouse transmit
    /// attempt, covering a request edge that arrived while reporting was
    /// disabled.
    pub fn on_control_byte(&mut self, byte: u8) {
        match ControlCommand::parse(byte) {
            Some(command) => {
                trace!(?command, "control byte");
                let was_asserted = self.config.mouse_control_asserted;
                self.config.apply(command);
                if !was_asserted && self.config.mouse_control_asserted {
                    self.transmit_mouse();
                }
            }
            None => trace!(byte = format_args!("0x{byte:02X}"), "unrecognized control byte"),
        }
    }

    /// Records a READY-line transition: `true` after a falling edge
    /// (transmission inhibited), `false` after a rising edge.
    pub fn on_transmit_inhibit(&mut self, inhibited: bool) {
        debug!(inhibited, "transmit inhibit changed");
        self.gate.set_inhibited(inhibited);
    }

    /// Handles one falling edge on the mouse-request line: exactly one
    /// encode-and-transmit attempt.
    pub fn on_mouse_request_edge(&mut self) {
        self.transmit_mouse();
    }

    /// Advances the repeat timer by `elapsed_ms`, transmitting a synthetic
    /// make byte if the held key's countdown expired.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if let Some(scan) = self.repeat.tick(elapsed_ms, self.config.repeat_interval_ms) {
            trace!(scan = format_args!("0x{scan:02X}"), "key repeat");
            let Self { port, gate, .. } = self;
            Self::send_key_event(port, gate, KeyEvent::make(scan));
        }
    }

    fn send_key_event(port: &mut P, gate: &TransmitGate, event: KeyEvent) {
        if gate.is_inhibited() {
            trace!(?event, "key event discarded while inhibited");
            return;
        }
        match port.send_keyboard_byte(event.to_wire_byte()) {
            Ok(()) => port.pulse_activity(),
            Err(e) => warn!("keyboard byte dropped: {e}"),
        }
    }

    /// One gated mouse transmit attempt.
    ///
    /// While inhibited nothing is sent and the accumulator stays intact —
    /// it is cleared only by a transmit that actually goes ahead.  The
    /// packet is always written, even when all-zero; only the activity
    /// pulse is suppressed for an empty packet.
    fn transmit_mouse(&mut self) {
        if self.gate.is_inhibited() {
            trace!("mouse transmit skipped while inhibited");
            return;
        }
        let packet = self.mouse.drain();
        match self.port.send_mouse_packet(packet.to_bytes()) {
            Ok(()) => {
                if !packet.is_empty() {
                    self.port.pulse_activity();
                }
            }
            Err(e) => warn!("mouse packet dropped: {e}"),
        }
    }

    /// Current host-driven configuration (LED state, repeat timing, ...).
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Consumes the engine, returning the port (handy for test inspection).
    pub fn into_port(self) -> P {
        self.port
    }
}
