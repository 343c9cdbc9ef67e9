//! The 24-LED on/off pattern every ring operation reduces to.

use crate::error::ArgumentError;

/// Number of LEDs on the ring.
pub const RING_LEDS: usize = 24;

/// Which end of the ring a level bar grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Lit run starts at index 0.
    #[default]
    Up,
    /// Lit run starts at index 23 and grows downwards.
    Down,
}

impl From<bool> for Direction {
    fn from(up: bool) -> Self {
        if up { Self::Up } else { Self::Down }
    }
}

/// On/off state of each LED, index 0..23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pattern([bool; RING_LEDS]);

impl Pattern {
    /// All LEDs off.
    pub const fn off() -> Self {
        Self([false; RING_LEDS])
    }

    /// All LEDs on.
    pub const fn full() -> Self {
        Self([true; RING_LEDS])
    }

    /// A contiguous bar of `level` lit LEDs.
    pub fn level(level: u8, direction: Direction) -> Result<Self, ArgumentError> {
        let lit = usize::from(level);
        if lit > RING_LEDS {
            return Err(ArgumentError::LevelOutOfRange(level));
        }
        let mut leds = [false; RING_LEDS];
        match direction {
            Direction::Up => leds[..lit].fill(true),
            Direction::Down => leds[RING_LEDS - lit..].fill(true),
        }
        Ok(Self(leds))
    }

    /// Exactly one lit LED at `position`.
    pub fn spinner(position: u8) -> Result<Self, ArgumentError> {
        let idx = usize::from(position);
        if idx >= RING_LEDS {
            return Err(ArgumentError::PositionOutOfRange(position));
        }
        let mut leds = [false; RING_LEDS];
        leds[idx] = true;
        Ok(Self(leds))
    }

    /// Build from a caller-supplied sequence that must hold exactly 24 entries.
    pub fn from_slice(status: &[bool]) -> Result<Self, ArgumentError> {
        let leds: [bool; RING_LEDS] = status
            .try_into()
            .map_err(|_| ArgumentError::StatusLength(status.len()))?;
        Ok(Self(leds))
    }

    pub fn is_lit(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn as_array(&self) -> &[bool; RING_LEDS] {
        &self.0
    }
}

impl From<[bool; RING_LEDS]> for Pattern {
    fn from(leds: [bool; RING_LEDS]) -> Self {
        Self(leds)
    }
}
