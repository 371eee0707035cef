//! Keyboard-direction wire format: one byte per key transition.
//!
//! The X68000 keyboard reports each key transition as a single byte: the low
//! 7 bits carry the scan code and the high bit distinguishes make (0) from
//! break (1).  There is no framing and no acknowledgement — the byte on the
//! wire *is* the event.

/// High bit of a key transition byte; set for break (key-up).
pub const BREAK_BIT: u8 = 0x80;

/// Make (key-down) or break (key-up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Make,
    Break,
}

/// One key transition in X68000 scan code space.
///
/// Transient by design: events are produced by the differencer or repeat
/// timer and written to the wire within the same processing step, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// 7-bit X68000 scan code.
    pub scan: u8,
    pub transition: KeyTransition,
}

impl KeyEvent {
    pub fn make(scan: u8) -> Self {
        Self {
            scan,
            transition: KeyTransition::Make,
        }
    }

    pub fn brk(scan: u8) -> Self {
        Self {
            scan,
            transition: KeyTransition::Break,
        }
    }

    /// Returns `true` for a make (key-down) event.
    pub fn is_make(&self) -> bool {
        self.transition == KeyTransition::Make
    }

    /// Encodes this event as its single wire byte.
    pub fn to_wire_byte(self) -> u8 {
        match self.transition {
            KeyTransition::Make => self.scan & 0x7F,
            KeyTransition::Break => (self.scan & 0x7F) | BREAK_BIT,
        }
    }

    /// Decodes a wire byte back into an event.
    ///
    /// Total: every byte value is a valid transition.
    pub fn from_wire_byte(byte: u8) -> Self {
        Self {
            scan: byte & 0x7F,
            transition: if byte & BREAK_BIT != 0 {
                KeyTransition::Break
            } else {
                KeyTransition::Make
            },
        }
    }
}
