//! USB HID boot-protocol report types (keyboard and mouse).
//!
//! # What is a boot-protocol report? (for beginners)
//!
//! The USB HID specification defines an elaborate *report descriptor*
//! mechanism by which a device describes its own data layout.  Parsing
//! descriptors is complex, so the spec also defines a fixed fallback layout —
//! the **boot protocol** — that every keyboard and mouse must support:
//!
//! - **Keyboard**: 1 modifier bitmask byte, 1 reserved byte, then 6 bytes of
//!   currently-pressed key usage codes (page 0x07).  A report lists *state*,
//!   not transitions: the host diffs successive reports to recover key-down
//!   and key-up events.
//! - **Mouse**: 1 button bitmask byte, then signed 8-bit X and Y deltas.
//!
//! This crate only ever deals with the boot-protocol shapes; descriptor
//! parsing is explicitly out of scope.
//!
//! # Reserved usage codes
//!
//! Usage codes 0x00–0x03 are not keys: 0x00 means "no key in this slot",
//! 0x01 is ErrorRollOver (more keys down than the report can carry), 0x02 is
//! POSTFail and 0x03 is ErrorUndefined.  None of them may ever produce a key
//! event, which [`KeyboardReport::is_reportable_usage`] encodes as an
//! explicit, testable predicate.

/// Highest reserved usage code; anything at or below this is a rollover or
/// error marker, never a key.
pub const MAX_RESERVED_USAGE: u8 = 0x03;

/// HID boot-protocol keyboard modifier bitmask.
///
/// Bit assignment (HID Usage Tables 1.3, §10, usages 0xE0–0xE7):
/// bit 0 = LeftCtrl, 1 = LeftShift, 2 = LeftAlt, 3 = LeftGui,
/// bit 4 = RightCtrl, 5 = RightShift, 6 = RightAlt, 7 = RightGui.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierFlags(pub u8);

impl ModifierFlags {
    pub const LEFT_CTRL: u8 = 1 << 0;
    pub const LEFT_SHIFT: u8 = 1 << 1;
    pub const LEFT_ALT: u8 = 1 << 2;
    pub const LEFT_GUI: u8 = 1 << 3;
    pub const RIGHT_CTRL: u8 = 1 << 4;
    pub const RIGHT_SHIFT: u8 = 1 << 5;
    pub const RIGHT_ALT: u8 = 1 << 6;
    pub const RIGHT_GUI: u8 = 1 << 7;

    /// Returns `true` if the modifier bit at `index` (0–7) is set.
    pub fn is_set(self, index: u8) -> bool {
        self.0 & (1 << index) != 0
    }

    /// Returns the XOR of two masks — the set of modifier bits that changed.
    pub fn changed_bits(self, other: ModifierFlags) -> u8 {
        self.0 ^ other.0
    }
}

/// One boot-protocol keyboard report: a snapshot of everything currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardReport {
    /// Modifier key bitmask (see [`ModifierFlags`]).
    pub modifiers: ModifierFlags,
    /// Up to 6 simultaneously pressed usage codes; 0x00 marks an empty slot.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Builds a report from a modifier byte and key slots.
    pub fn new(modifiers: u8, keycodes: [u8; 6]) -> Self {
        Self {
            modifiers: ModifierFlags(modifiers),
            keycodes,
        }
    }

    /// Parses the 8-byte boot-protocol wire layout.
    ///
    /// Byte 1 is reserved by the HID spec and ignored.
    pub fn from_boot_bytes(bytes: [u8; 8]) -> Self {
        Self {
            modifiers: ModifierFlags(bytes[0]),
            keycodes: [bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7]],
        }
    }

    /// Returns `true` if `usage` appears in any key slot of this report.
    pub fn contains(&self, usage: u8) -> bool {
        self.keycodes.iter().any(|&k| k == usage)
    }

    /// Returns `true` if `usage` is a real key (not an empty slot or one of
    /// the reserved rollover/error markers 0x01–0x03).
    pub fn is_reportable_usage(usage: u8) -> bool {
        usage > MAX_RESERVED_USAGE
    }
}

/// One boot-protocol mouse report: button state plus relative motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseReport {
    /// Button bitmask: bit 0 = left, bit 1 = right, bit 2 = middle.
    pub buttons: u8,
    /// Horizontal motion since the previous report (positive = right).
    pub dx: i8,
    /// Vertical motion since the previous report (positive = down).
    pub dy: i8,
}

impl MouseReport {
    pub const BUTTON_LEFT: u8 = 1 << 0;
    pub const BUTTON_RIGHT: u8 = 1 << 1;

    pub fn new(buttons: u8, dx: i8, dy: i8) -> Self {
        Self { buttons, dx, dy }
    }

    /// Returns `true` if the left button bit is set.
    pub fn left_button(&self) -> bool {
        self.buttons & Self::BUTTON_LEFT != 0
    }

    /// Returns `true` if the right button bit is set.
    pub fn right_button(&self) -> bool {
        self.buttons & Self::BUTTON_RIGHT != 0
    }
}
