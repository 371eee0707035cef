//! Host → keyboard control byte decoding.
//!
//! The X68000 sends configuration to its keyboard over the same serial link
//! the keyboard transmits on.  There is no framing: every byte is
//! self-describing through fixed high-bit patterns (X68000 Technical Guide,
//! chapter 5).  Patterns are checked in a fixed priority order and the first
//! match wins; a byte that matches nothing is discarded without effect.
//!
//! | pattern (masked)      | meaning          |
//! |-----------------------|------------------|
//! | `0100_0xxx`           | mouse control    |
//! | `0101_01xx`           | LED brightness   |
//! | `0101_1xxx`           | key inhibit      |
//! | `0110_xxxx`           | repeat delay     |
//! | `0111_xxxx`           | repeat interval  |
//! | `1xxx_xxxx`           | LED state        |

const MOUSE_CTRL: u8 = 0b0100_0000;
const MOUSE_CTRL_MASK: u8 = 0b1111_1000;
const LED_BRIGHTNESS: u8 = 0b0101_0100;
const LED_BRIGHTNESS_MASK: u8 = 0b1111_1100;
const KEY_INHIBIT: u8 = 0b0101_1000;
const KEY_INHIBIT_MASK: u8 = 0b1111_1000;
const REPEAT_DELAY: u8 = 0b0110_0000;
const REPEAT_INTERVAL: u8 = 0b0111_0000;
const REPEAT_MASK: u8 = 0b1111_0000;
const LED_STATE_MASK: u8 = 0b1000_0000;

/// A decoded host → keyboard control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Host toggles mouse reporting; `asserted` when bit 0 is clear.
    MouseControl { asserted: bool },
    /// LED brightness level, 0–3.
    LedBrightness(u8),
    /// Host inhibits key input; `asserted` when bit 0 is clear.
    KeyInhibit { asserted: bool },
    /// Key repeat delay, already converted to milliseconds.
    RepeatDelay { ms: u16 },
    /// Key repeat interval, already converted to milliseconds.
    RepeatInterval { ms: u16 },
    /// 7-bit LED state bitmask.
    LedState(u8),
}

impl ControlCommand {
    /// Decodes one control byte, checking patterns in priority order.
    ///
    /// Returns `None` for bytes that match no pattern; those are discarded
    /// by the caller with no state change (this is filtering, not an error).
    pub fn parse(byte: u8) -> Option<ControlCommand> {
        if byte & MOUSE_CTRL_MASK == MOUSE_CTRL {
            Some(ControlCommand::MouseControl {
                asserted: byte & 0x01 == 0,
            })
        } else if byte & LED_BRIGHTNESS_MASK == LED_BRIGHTNESS {
            Some(ControlCommand::LedBrightness(byte & 0x03))
        } else if byte & KEY_INHIBIT_MASK == KEY_INHIBIT {
            Some(ControlCommand::KeyInhibit {
                asserted: byte & 0x01 == 0,
            })
        } else if byte & REPEAT_MASK == REPEAT_DELAY {
            let nibble = (byte & 0x0F) as u16;
            Some(ControlCommand::RepeatDelay {
                ms: 200 + nibble * 100,
            })
        } else if byte & REPEAT_MASK == REPEAT_INTERVAL {
            let nibble = (byte & 0x0F) as u16;
            Some(ControlCommand::RepeatInterval {
                ms: 30 + nibble * nibble * 5,
            })
        } else if byte & LED_STATE_MASK == LED_STATE_MASK {
            Some(ControlCommand::LedState(byte & 0x7F))
        } else {
            None
        }
    }
}

/// Keyboard-side configuration state driven by the control byte stream.
///
/// Lives for the process lifetime; nothing is persisted.  `key_inhibit` and
/// the LED fields are stored but consumed by external layers (the original
/// keyboard exposes them to its LED driver).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlConfig {
    pub mouse_control_asserted: bool,
    /// LED brightness, 2 bits.
    pub led_brightness: u8,
    pub key_inhibit: bool,
    pub repeat_delay_ms: u16,
    pub repeat_interval_ms: u16,
    /// LED on/off bitmask, 7 bits.
    pub led_state: u8,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            mouse_control_asserted: false,
            led_brightness: 0,
            key_inhibit: false,
            // Power-on defaults of the original keyboard firmware.
            repeat_delay_ms: 500,
            repeat_interval_ms: 110,
            led_state: 0,
        }
    }
}

impl ControlConfig {
    /// Applies one decoded command to this configuration.
    pub fn apply(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::MouseControl { asserted } => self.mouse_control_asserted = asserted,
            ControlCommand::LedBrightness(level) => self.led_brightness = level,
            ControlCommand::KeyInhibit { asserted } => self.key_inhibit = asserted,
            ControlCommand::RepeatDelay { ms } => self.repeat_delay_ms = ms,
            ControlCommand::RepeatInterval { ms } => self.repeat_interval_ms = ms,
            ControlCommand::LedState(mask) => self.led_state = mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_control_asserted_when_bit0_clear() {
        assert_eq!(
            ControlCommand::parse(0b0100_0000),
            Some(ControlCommand::MouseControl { asserted: true })
        );
        assert_eq!(
            ControlCommand::parse(0b0100_0001),
            Some(ControlCommand::MouseControl { asserted: false })
        );
    }

    #[test]
    fn test_led_brightness_levels() {
        for level in 0..4u8 {
            assert_eq!(
                ControlCommand::parse(0b0101_0100 | level),
                Some(ControlCommand::LedBrightness(level))
            );
        }
    }

    #[test]
    fn test_key_inhibit_asserted_when_bit0_clear() {
        assert_eq!(
            ControlCommand::parse(0b0101_1000),
            Some(ControlCommand::KeyInhibit { asserted: true })
        );
        assert_eq!(
            ControlCommand::parse(0b0101_1001),
            Some(ControlCommand::KeyInhibit { asserted: false })
        );
    }

    #[test]
    fn test_repeat_delay_conversion() {
        // nibble = 3: 200 + 3 * 100 = 500 ms
        assert_eq!(
            ControlCommand::parse(0b0110_0011),
            Some(ControlCommand::RepeatDelay { ms: 500 })
        );
        assert_eq!(
            ControlCommand::parse(0b0110_0000),
            Some(ControlCommand::RepeatDelay { ms: 200 })
        );
        assert_eq!(
            ControlCommand::parse(0b0110_1111),
            Some(ControlCommand::RepeatDelay { ms: 1700 })
        );
    }

    #[test]
    fn test_repeat_interval_conversion() {
        // nibble = 2: 30 + 4 * 5 = 50 ms
        assert_eq!(
            ControlCommand::parse(0b0111_0010),
            Some(ControlCommand::RepeatInterval { ms: 50 })
        );
        assert_eq!(
            ControlCommand::parse(0b0111_0000),
            Some(ControlCommand::RepeatInterval { ms: 30 })
        );
        // nibble = 15: 30 + 225 * 5 = 1155 ms
        assert_eq!(
            ControlCommand::parse(0b0111_1111),
            Some(ControlCommand::RepeatInterval { ms: 1155 })
        );
    }

    #[test]
    fn test_led_state_takes_low_seven_bits() {
        assert_eq!(
            ControlCommand::parse(0b1101_0101),
            Some(ControlCommand::LedState(0b0101_0101))
        );
        assert_eq!(
            ControlCommand::parse(0b1000_0000),
            Some(ControlCommand::LedState(0))
        );
    }

    #[test]
    fn test_unmatched_bytes_return_none() {
        // Low half of the 0x00-0x3F space matches nothing.
        for byte in [0x00u8, 0x01, 0x1F, 0x3F] {
            assert_eq!(ControlCommand::parse(byte), None, "byte 0x{byte:02X}");
        }
    }

    #[test]
    fn test_priority_order_is_stable() {
        // 0b0101_0100 satisfies the key-inhibit mask check only if checked
        // out of order; it must decode as LED brightness.
        assert_eq!(
            ControlCommand::parse(0b0101_0100),
            Some(ControlCommand::LedBrightness(0))
        );
        // 0b0101_1000 matches key inhibit, not brightness.
        assert_eq!(
            ControlCommand::parse(0b0101_1000),
            Some(ControlCommand::KeyInhibit { asserted: true })
        );
    }

    #[test]
    fn test_apply_updates_only_named_field() {
        let mut config = ControlConfig::default();
        config.apply(ControlCommand::RepeatDelay { ms: 700 });
        assert_eq!(config.repeat_delay_ms, 700);
        assert_eq!(config.repeat_interval_ms, 110);
        assert!(!config.mouse_control_asserted);

        config.apply(ControlCommand::LedState(0x55));
        assert_eq!(config.led_state, 0x55);
        assert_eq!(config.repeat_delay_ms, 700);
    }

    #[test]
    fn test_defaults_match_power_on_state() {
        let config = ControlConfig::default();
        assert_eq!(config.repeat_delay_ms, 500);
        assert_eq!(config.repeat_interval_ms, 110);
        assert!(!config.mouse_control_asserted);
        assert!(!config.key_inhibit);
        assert_eq!(config.led_brightness, 0);
        assert_eq!(config.led_state, 0);
    }
}
