//! Transmit gate driven by the host's READY line.
//!
//! The X68000 pulls the READY line low when its receive buffer cannot take
//! more bytes.  The gate tracks that level: a falling edge inhibits all
//! transmission (keyboard bytes and mouse packets alike) and a rising edge
//! clears it.  Nothing is queued while inhibited — key transition bytes are
//! permanently lost, and a mouse transmit attempt simply does not happen
//! (leaving the accumulator to keep integrating until the next request).

/// Current transmit permission, as last reported by the READY line.
#[derive(Debug, Default)]
pub struct TransmitGate {
    inhibited: bool,
}

impl TransmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the level implied by the most recent READY edge:
    /// `true` after a falling edge, `false` after a rising edge.
    pub fn set_inhibited(&mut self, inhibited: bool) {
        self.inhibited = inhibited;
    }

    pub fn is_inhibited(&self) -> bool {
        self.inhibited
    }
}
