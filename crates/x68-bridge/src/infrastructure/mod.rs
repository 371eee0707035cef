//! Infrastructure layer for the bridge daemon.
//!
//! Contains device-facing adapters: the serial links to the X68000, the
//! hidraw report readers, the GPIO line watcher, and TOML configuration.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `x68_core`, but MUST NOT be imported by the `application` layer.

pub mod config;
pub mod hid;
pub mod serial;
pub mod signals;
