//! ESP-IDF GPIO port.
//!
//! Claims pins by number through `esp-idf-hal`. The returned `PinDriver`
//! resets the pin to its default state when dropped, which is what releases
//! it back to the platform.

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use log::info;

use crate::error::InitFailure;
use crate::ports::{GpioPort, PinId};

/// Highest GPIO number on the ESP32-S3.
const MAX_GPIO: PinId = 48;

/// Output pin handed out by [`EspGpio`].
pub type EspPin = PinDriver<'static, AnyOutputPin, Output>;

/// Pin-number based access to the ESP-IDF GPIO matrix.
///
/// The caller must not hold a `Peripherals` handle for the same pins, since
/// ownership is established by pin number here rather than by type.
/// A pin number is handed out at most once per `EspGpio`.
pub struct EspGpio {
    claimed: u64,
}

impl EspGpio {
    pub fn new() -> Self {
        Self { claimed: 0 }
    }
}

impl Default for EspGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioPort for EspGpio {
    type Pin = EspPin;

    fn claim_output(&mut self, pin: PinId) -> Result<EspPin, InitFailure> {
        if !(0..=MAX_GPIO).contains(&pin) {
            return Err(InitFailure::Unavailable);
        }
        let mask = 1u64 << pin;
        if self.claimed & mask != 0 {
            return Err(InitFailure::Busy);
        }
        // SAFETY: the pin number is range-checked and tracked in `claimed`,
        // so no second driver is created for it through this port.
        let any = unsafe { AnyOutputPin::new(pin) };
        let driver = PinDriver::output(any).map_err(|e| InitFailure::Platform(e.code()))?;
        self.claimed |= mask;
        info!("esp_gpio: GPIO{} configured as output", pin);
        Ok(driver)
    }
}
