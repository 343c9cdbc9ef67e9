//! Driver for the Grove Circular LED: 24 LEDs behind a MY9221.
//!
//! Exposes the pure-logic modules for integration testing and the ESP-IDF
//! firmware binary. ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]`; host builds get a simulated GPIO port.

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pattern;
pub mod pins;
pub mod ports;

pub use drivers::circular_led::{LedRing, RingCommand};
pub use error::{RingError, Result};
pub use pattern::{Direction, Pattern, RING_LEDS};
