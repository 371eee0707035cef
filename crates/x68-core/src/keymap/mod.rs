//! Key code translation between USB HID usages and X68000 scan codes.
//!
//! The canonical inbound representation is the USB HID boot-protocol report
//! (keyboard: 1 modifier byte + up to 6 usage codes; mouse: buttons + deltas).
//! Translation to the legacy 7-bit scan code space happens exactly once, at
//! the encoding boundary.

pub mod hid;
pub mod x68k;

pub use hid::{KeyboardReport, ModifierFlags, MouseReport};
pub use x68k::{modifier_scan, usage_to_scan};
