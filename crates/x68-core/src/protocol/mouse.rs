//! Mouse-direction wire format: 3-byte motion packets.
//!
//! Wire format:
//! ```text
//! byte 0 (status): bit 0 = left button
//!                  bit 1 = right button
//!                  bits 2-3 = reserved, always 0
//!                  bit 4 = X overflow positive (accumulated dx > 127)
//!                  bit 5 = X overflow negative (accumulated dx < -128)
//!                  bit 6 = Y overflow positive (accumulated dy > 127)
//!                  bit 7 = Y overflow negative (accumulated dy < -128)
//! byte 1: dx truncated to signed 8 bits (two's-complement wrap)
//! byte 2: dy truncated to signed 8 bits (two's-complement wrap)
//! ```
//!
//! Truncation deliberately wraps rather than saturates — that is what the
//! original hardware put on the wire, and the overflow bits tell the host
//! the truncated value is not the whole story.  The packet is constructed
//! field by field (no unions, no memory-layout tricks) and verified by
//! round-trip tests.

use thiserror::Error;

const STATUS_LEFT: u8 = 1 << 0;
const STATUS_RIGHT: u8 = 1 << 1;
const STATUS_RESERVED: u8 = 0b0000_1100;
const STATUS_X_OVER: u8 = 1 << 4;
const STATUS_X_UNDER: u8 = 1 << 5;
const STATUS_Y_OVER: u8 = 1 << 6;
const STATUS_Y_UNDER: u8 = 1 << 7;

/// Errors from decoding a wire packet back into a [`MousePacket`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    /// The reserved bits 2–3 of the status byte were not zero.
    #[error("reserved status bits set in mouse packet: 0x{0:02X}")]
    ReservedBits(u8),
}

/// One decoded 3-byte mouse packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MousePacket {
    pub left_button: bool,
    pub right_button: bool,
    pub x_overflow_positive: bool,
    pub x_overflow_negative: bool,
    pub y_overflow_positive: bool,
    pub y_overflow_negative: bool,
    /// dx after two's-complement truncation to 8 bits.
    pub dx: i8,
    /// dy after two's-complement truncation to 8 bits.
    pub dy: i8,
}

impl MousePacket {
    /// Builds a packet from accumulated (untruncated) motion and latched
    /// button state.
    ///
    /// Overflow flags are computed from the full-width values *before*
    /// truncation; `dx`/`dy` then wrap to 8 bits.
    pub fn from_accumulated(dx: i32, dy: i32, left: bool, right: bool) -> Self {
        Self {
            left_button: left,
            right_button: right,
            x_overflow_positive: dx > i8::MAX as i32,
            x_overflow_negative: dx < i8::MIN as i32,
            y_overflow_positive: dy > i8::MAX as i32,
            y_overflow_negative: dy < i8::MIN as i32,
            dx: dx as i8,
            dy: dy as i8,
        }
    }

    /// Encodes the packet into its 3 wire bytes.
    pub fn to_bytes(self) -> [u8; 3] {
        let mut status = 0u8;
        if self.left_button {
            status |= STATUS_LEFT;
        }
        if self.right_button {
            status |= STATUS_RIGHT;
        }
        if self.x_overflow_positive {
            status |= STATUS_X_OVER;
        }
        if self.x_overflow_negative {
            status |= STATUS_X_UNDER;
        }
        if self.y_overflow_positive {
            status |= STATUS_Y_OVER;
        }
        if self.y_overflow_negative {
            status |= STATUS_Y_UNDER;
        }
        [status, self.dx as u8, self.dy as u8]
    }

    /// Decodes 3 wire bytes back into a packet.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::ReservedBits`] if status bits 2–3 are set.
    pub fn from_bytes(bytes: [u8; 3]) -> Result<Self, PacketError> {
        let status = bytes[0];
        if status & STATUS_RESERVED != 0 {
            return Err(PacketError::ReservedBits(status));
        }
        Ok(Self {
            left_button: status & STATUS_LEFT != 0,
            right_button: status & STATUS_RIGHT != 0,
            x_overflow_positive: status & STATUS_X_OVER != 0,
            x_overflow_negative: status & STATUS_X_UNDER != 0,
            y_overflow_positive: status & STATUS_Y_OVER != 0,
            y_overflow_negative: status & STATUS_Y_UNDER != 0,
            dx: bytes[1] as i8,
            dy: bytes[2] as i8,
        })
    }

    /// Returns `true` if all three encoded bytes are zero.
    ///
    /// An empty packet is still transmitted (the wire protocol has no empty
    /// suppression) but does not count as activity.
    pub fn is_empty(self) -> bool {
        self.to_bytes() == [0, 0, 0]
    }
}
