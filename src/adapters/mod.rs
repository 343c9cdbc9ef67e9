//! Platform adapters implementing [`GpioPort`](crate::ports::GpioPort).

#[cfg(all(feature = "espidf", target_os = "espidf"))]
pub mod esp_gpio;

#[cfg(not(target_os = "espidf"))]
pub mod sim_gpio;
