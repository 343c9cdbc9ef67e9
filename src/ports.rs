//! Port traits — the boundary between the ring driver and the platform.
//!
//! ```text
//!   EspGpio / SimGpio ──▶ GpioPort ──▶ LedRing
//! ```
//!
//! The driver only needs two push-pull outputs. How a pin number becomes an
//! owned output handle is the platform's business; adapters implement
//! [`GpioPort`] and the driver consumes it through generics.

use embedded_hal::digital::OutputPin;

use crate::error::InitFailure;

/// Platform pin identifier (ESP-IDF GPIO numbering).
pub type PinId = i32;

/// Hands out exclusively owned output pins.
///
/// Dropping a returned pin must release it back to the platform, so a
/// driver that holds the pin releases it exactly once, on drop.
pub trait GpioPort {
    type Pin: OutputPin;

    /// Claim `pin` and configure it as a digital output.
    fn claim_output(&mut self, pin: PinId) -> Result<Self::Pin, InitFailure>;
}
