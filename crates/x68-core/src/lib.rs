//! # x68-core
//!
//! Shared library for the USB→X68000 input bridge containing the keycode
//! translation tables, the legacy wire-protocol types, and the translation
//! engine itself.
//!
//! This crate is used by the bridge daemon and by the test/bench harnesses.
//! It has zero dependencies on OS APIs, device files, or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! The bridge sits between modern USB HID input devices and a Sharp X68000
//! home computer, which expects its keyboard and mouse on two dedicated
//! serial links speaking a fixed early-90s protocol.  The X68000 never
//! learns it is not talking to its original peripherals.
//!
//! This crate (`x68-core`) is the pure-logic foundation.  It defines:
//!
//! - **`keymap`** – The USB HID boot-protocol report shapes and the dense
//!   lookup tables that convert HID usage codes into X68000 scan codes.
//!
//! - **`protocol`** – The legacy wire formats: make/break key transition
//!   bytes, 3-byte mouse packets, and the self-describing control bytes the
//!   host sends back (LED state, repeat timing, mouse enable).
//!
//! - **`engine`** – The stateful translator: a report differencer, a mouse
//!   motion accumulator, the key repeat timer, and the transmit gate, all
//!   orchestrated by [`Engine`] behind the [`LegacyPort`] output seam.

pub mod engine;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `x68_core::Engine` instead of `x68_core::engine::Engine`.
pub use engine::{Engine, LegacyPort, PortError};
pub use keymap::hid::{KeyboardReport, ModifierFlags, MouseReport};
pub use protocol::control::{ControlCommand, ControlConfig};
pub use protocol::keyboard::{KeyEvent, KeyTransition};
pub use protocol::mouse::{MousePacket, PacketError};
