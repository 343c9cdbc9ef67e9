//! Ring configuration parameters
//!
//! Pin assignments and the animation shown by the firmware. Protocol
//! constants live in [`my9221`](crate::drivers::my9221) and are not
//! configurable.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::drivers::ring_patterns::RingPattern;
use crate::pattern::{Direction, RING_LEDS};
use crate::pins;
use crate::ports::PinId;

/// Core ring configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingConfig {
    // --- Wiring ---
    /// GPIO wired to the MY9221 DI input
    pub data_pin: PinId,
    /// GPIO wired to the MY9221 DCKI input
    pub clock_pin: PinId,

    // --- Display ---
    /// Animation run by the firmware main loop
    pub animation: RingPattern,
    /// Main loop period (milliseconds)
    pub tick_interval_ms: u32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            data_pin: pins::RING_DATA_GPIO,
            clock_pin: pins::RING_CLOCK_GPIO,

            animation: RingPattern::Sweep {
                step_ms: 100,
                direction: Direction::Up,
            },
            tick_interval_ms: 20, // 50 Hz
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    Parse(String),
    /// The document parsed but a value is out of range.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse failed: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "config invalid: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl RingConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the driver or animator cannot use. Never clamps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_pin < 0 || self.clock_pin < 0 {
            return Err(ConfigError::ValidationFailed("pin numbers must be non-negative"));
        }
        if self.data_pin == self.clock_pin {
            return Err(ConfigError::ValidationFailed("data and clock must be distinct pins"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick interval must be non-zero"));
        }
        match self.animation {
            RingPattern::Level { level, .. } if usize::from(level) > RING_LEDS => {
                Err(ConfigError::ValidationFailed("level exceeds ring size"))
            }
            RingPattern::Spinner { step_ms: 0, .. } | RingPattern::Sweep { step_ms: 0, .. } => {
                Err(ConfigError::ValidationFailed("animation step must be non-zero"))
            }
            _ => Ok(()),
        }
    }
}
