//! The bridge event loop.
//!
//! Every hardware source — the two HID reader threads, the control-byte
//! reader on the keyboard serial link, and the GPIO line watcher — funnels
//! into one [`BridgeEvent`] channel.  [`BridgeService::run`] drains that
//! channel and dispatches each event to the engine, so engine state is only
//! ever touched from this single task in strict arrival order.  The same
//! loop drives the key-repeat timer off a fixed-cadence tick.
//!
//! The original adapter hardware handled the READY and mouse-request lines
//! in interrupt context; here an edge becomes a [`SignalEvent`] on the
//! channel instead, which serializes it against report processing for free.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use x68_core::{Engine, KeyboardReport, LegacyPort, MouseReport};

/// A hardware line transition, delivered over the event channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    /// The READY line changed level; `inhibited` is `true` after a falling
    /// edge (host buffer full) and `false` after a rising edge.
    TransmitInhibit { inhibited: bool },
    /// Falling edge on the mouse-request line: the host wants one packet.
    MouseRequest,
}

/// One event from any of the bridge's input sources.
#[derive(Debug, Clone, Copy)]
pub enum BridgeEvent {
    /// An 8-byte boot-protocol keyboard report arrived on the HID side.
    Keyboard(KeyboardReport),
    /// A boot-protocol mouse report arrived on the HID side.
    Mouse(MouseReport),
    /// One byte arrived on the host → keyboard control stream.
    ControlByte(u8),
    /// A GPIO line transition was observed.
    Signal(SignalEvent),
}

/// Owns the engine and pumps events through it until the channel closes.
pub struct BridgeService<P: LegacyPort> {
    engine: Engine<P>,
    tick_interval: Duration,
}

impl<P: LegacyPort> BridgeService<P> {
    /// Creates a service writing to `port`, with the repeat timer driven at
    /// `tick_interval` cadence.
    pub fn new(port: P, tick_interval: Duration) -> Self {
        Self {
            engine: Engine::new(port),
            tick_interval,
        }
    }

    /// Runs the event loop until every event sender has been dropped.
    ///
    /// Control bytes already queued when the loop starts are stale — they
    /// were addressed to whatever was on the link before this process — and
    /// are discarded before the first dispatch.  Returns the engine so
    /// callers (and tests) can inspect final state.
    pub async fn run(mut self, mut events: mpsc::Receiver<BridgeEvent>) -> Engine<P> {
        let mut stale = 0usize;
        while let Ok(event) = events.try_recv() {
            match event {
                BridgeEvent::ControlByte(_) => stale += 1,
                other => self.dispatch(other),
            }
        }
        if stale > 0 {
            debug!(stale, "discarded stale control bytes from before startup");
        }

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => self.dispatch(event),
                    None => {
                        info!("all event sources closed, stopping bridge service");
                        break;
                    }
                },
                tick = ticker.tick() => {
                    // Measured elapsed time, not the nominal interval, so a
                    // delayed tick does not slow the repeat cadence.
                    let elapsed = tick.duration_since(last_tick);
                    last_tick = tick;
                    self.engine.tick(elapsed.as_millis().min(u128::from(u32::MAX)) as u32);
                }
            }
        }

        self.engine
    }

    fn dispatch(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::Keyboard(report) => self.engine.on_keyboard_report(&report),
            BridgeEvent::Mouse(report) => self.engine.on_mouse_report(&report),
            BridgeEvent::ControlByte(byte) => self.engine.on_control_byte(byte),
            BridgeEvent::Signal(SignalEvent::TransmitInhibit { inhibited }) => {
                self.engine.on_transmit_inhibit(inhibited)
            }
            BridgeEvent::Signal(SignalEvent::MouseRequest) => self.engine.on_mouse_request_edge(),
        }
    }
}
