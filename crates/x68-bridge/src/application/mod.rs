//! Application layer for the bridge daemon.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The *application* layer sits between the pure translation logic in
//! `x68-core` and the device-facing adapters in `infrastructure`.  It
//! orchestrates the engine to fulfil the daemon's single job: pump every
//! hardware event through the translator in arrival order.
//!
//! Code in this layer:
//!
//! - **Orchestrates** the [`x68_core::Engine`] from a stream of events.
//! - **Depends on abstractions** ([`x68_core::LegacyPort`]) rather than
//!   concrete device files, so tests can run without hardware.
//! - **Contains no device I/O** — opening serial ports, hidraw nodes, and
//!   GPIO lines is the infrastructure layer's job.

pub mod bridge_service;

pub use bridge_service::{BridgeEvent, BridgeService, SignalEvent};
