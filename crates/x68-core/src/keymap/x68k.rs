//! HID usage → X68000 scan code translation table.
//!
//! The X68000 keyboard speaks a 7-bit scan code alphabet documented in the
//! X68000 Technical Guide, chapter 5.  The table below is *dense*: it covers
//! every HID usage from 0x04 (`A`) through 0x64 (`Europe 2`) with no gaps, so
//! a lookup is a single bounds check plus an index.  Usages outside that
//! window (media keys, F13+, the modifier usages 0xE0–0xE7) have no X68000
//! equivalent and return `None` — callers drop those keys silently.
//!
//! Modifier keys never travel inside the 6-key slots of a boot report; they
//! arrive as bits of the modifier byte and use the fixed per-bit scan codes
//! in [`MODIFIER_SCANS`].  Note the X68000 has a single SHIFT scan code, so
//! both left and right shift map to 0x70.

/// First HID usage covered by [`SCAN_TABLE`] (`A`).
pub const TABLE_BASE_USAGE: u8 = 0x04;

/// X68000 scan codes indexed by `hid_usage - TABLE_BASE_USAGE`.
///
/// X68000 key legends are noted per entry; several HID keys land on the
/// JP-layout keys that sit in the same physical position (e.g. HID `Equal`
/// is the X68000 `^` key).
const SCAN_TABLE: [u8; 97] = [
    0x1e, // A
    0x2e, // B
    0x2c, // C
    0x20, // D
    0x13, // E
    0x21, // F
    0x22, // G
    0x23, // H
    0x18, // I
    0x24, // J
    0x25, // K
    0x26, // L
    0x30, // M
    0x2f, // N
    0x19, // O
    0x1a, // P
    0x11, // Q
    0x14, // R
    0x1f, // S
    0x15, // T
    0x17, // U
    0x2d, // V
    0x12, // W
    0x2b, // X
    0x16, // Y
    0x2a, // Z
    0x02, // 1
    0x03, // 2
    0x04, // 3
    0x05, // 4
    0x06, // 5
    0x07, // 6
    0x08, // 7
    0x09, // 8
    0x0a, // 9
    0x0b, // 0
    0x1d, // Enter      -> RETURN
    0x01, // Escape     -> ESC
    0x0f, // Backspace  -> BS
    0x10, // Tab        -> TAB
    0x35, // Space      -> SPACE
    0x0c, // Minus      -> -
    0x0d, // Equal      -> ^
    0x1b, // BracketLeft  -> @
    0x1c, // BracketRight -> [
    0x0e, // Backslash  -> YEN
    0x29, // Europe1    -> ]
    0x27, // Semicolon  -> ;
    0x28, // Apostrophe -> :
    0x60, // Grave      -> ZENKAKU
    0x31, // Comma      -> ,
    0x32, // Period     -> .
    0x33, // Slash      -> /
    0x5d, // CapsLock   -> CAPS
    0x63, // F1
    0x64, // F2
    0x65, // F3
    0x66, // F4
    0x67, // F5
    0x68, // F6
    0x69, // F7
    0x6a, // F8
    0x6b, // F9
    0x6c, // F10
    0x5a, // F11        -> KANA
    0x5b, // F12        -> LATIN
    0x62, // PrintScreen -> COPY
    0x54, // ScrollLock -> HELP
    0x61, // Pause      -> BREAK
    0x5e, // Insert     -> INS
    0x36, // Home       -> HOME
    0x38, // PageUp     -> ROLL UP
    0x37, // Delete     -> DEL
    0x3a, // End        -> UNDO
    0x39, // PageDown   -> ROLL DOWN
    0x3d, // ArrowRight -> RIGHT
    0x3b, // ArrowLeft  -> LEFT
    0x3e, // ArrowDown  -> DOWN
    0x3c, // ArrowUp    -> UP
    0x3f, // NumLock    -> CLR
    0x40, // KeypadDivide   -> /
    0x41, // KeypadMultiply -> *
    0x42, // KeypadSubtract -> -
    0x46, // KeypadAdd      -> +
    0x4e, // KeypadEnter    -> ENTER
    0x4b, // Keypad1
    0x4c, // Keypad2
    0x4d, // Keypad3
    0x47, // Keypad4
    0x48, // Keypad5
    0x49, // Keypad6
    0x43, // Keypad7
    0x44, // Keypad8
    0x45, // Keypad9
    0x4f, // Keypad0
    0x51, // KeypadDecimal -> .
    0x0e, // Europe2       -> YEN
];

/// X68000 scan codes for the 8 boot-protocol modifier bits, indexed by bit
/// position (0 = LeftCtrl … 7 = RightGui).
///
/// The GUI and Alt usages land on the XF1–XF5 soft keys, which is the
/// conventional placement for X68000 USB adapters.
const MODIFIER_SCANS: [u8; 8] = [
    0x71, // LeftCtrl   -> CTRL
    0x70, // LeftShift  -> SHIFT
    0x56, // LeftAlt    -> XF2
    0x55, // LeftGui    -> XF1
    0x59, // RightCtrl  -> XF5
    0x70, // RightShift -> SHIFT
    0x57, // RightAlt   -> XF3
    0x58, // RightGui   -> XF4
];

/// Translates a HID usage code (page 0x07) to an X68000 scan code.
///
/// Returns `None` for usages outside the covered window, including the
/// reserved markers 0x00–0x03 and the modifier usages 0xE0–0xE7.
pub fn usage_to_scan(usage: u8) -> Option<u8> {
    let index = usage.checked_sub(TABLE_BASE_USAGE)? as usize;
    SCAN_TABLE.get(index).copied()
}

/// Returns the X68000 scan code for the modifier at boot-protocol bit
/// position `bit` (0–7).
///
/// # Panics
///
/// Panics if `bit >= 8`; modifier bits come from an 8-bit mask so callers
/// iterate 0..8.
pub fn modifier_scan(bit: u8) -> u8 {
    MODIFIER_SCANS[bit as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_and_digit_mappings() {
        assert_eq!(usage_to_scan(0x04), Some(0x1e)); // A
        assert_eq!(usage_to_scan(0x1d), Some(0x2a)); // Z
        assert_eq!(usage_to_scan(0x1e), Some(0x02)); // 1
        assert_eq!(usage_to_scan(0x27), Some(0x0b)); // 0
    }

    #[test]
    fn test_edge_of_table_mappings() {
        // First and last entries of the dense window.
        assert_eq!(usage_to_scan(0x04), Some(0x1e));
        assert_eq!(usage_to_scan(0x64), Some(0x0e)); // Europe2 -> YEN
    }

    #[test]
    fn test_out_of_range_usages_return_none() {
        assert_eq!(usage_to_scan(0x00), None);
        assert_eq!(usage_to_scan(0x03), None); // reserved marker
        assert_eq!(usage_to_scan(0x65), None); // first usage past the table
        assert_eq!(usage_to_scan(0xE0), None); // LeftCtrl usage (modifier path)
        assert_eq!(usage_to_scan(0xFF), None);
    }

    #[test]
    fn test_all_scan_codes_fit_in_seven_bits() {
        for usage in TABLE_BASE_USAGE..=0x64 {
            let scan = usage_to_scan(usage).expect("dense table must cover the window");
            assert!(scan <= 0x7F, "usage 0x{usage:02X} maps outside 7 bits");
        }
    }

    #[test]
    fn test_modifier_scan_codes() {
        assert_eq!(modifier_scan(0), 0x71); // CTRL
        assert_eq!(modifier_scan(1), 0x70); // SHIFT
        assert_eq!(modifier_scan(5), 0x70); // right shift shares SHIFT
        assert_eq!(modifier_scan(7), 0x58); // XF4
    }

    #[test]
    fn test_navigation_cluster_mappings() {
        assert_eq!(usage_to_scan(0x4A), Some(0x36)); // Home -> HOME
        assert_eq!(usage_to_scan(0x4B), Some(0x38)); // PageUp -> ROLL UP
        assert_eq!(usage_to_scan(0x4D), Some(0x3a)); // End -> UNDO
        assert_eq!(usage_to_scan(0x52), Some(0x3c)); // ArrowUp -> UP
    }
}
