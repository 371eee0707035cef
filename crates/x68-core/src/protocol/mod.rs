//! The X68000 legacy serial wire formats.
//!
//! Three independent byte-level formats share the keyboard/mouse link:
//!
//! - [`keyboard`] — single make/break scan-code bytes, keyboard → host.
//! - [`mouse`] — 3-byte motion packets, mouse → host.
//! - [`control`] — self-describing control bytes, host → keyboard.

pub mod control;
pub mod keyboard;
pub mod mouse;

pub use control::{ControlCommand, ControlConfig};
pub use keyboard::{KeyEvent, KeyTransition};
pub use mouse::{MousePacket, PacketError};
