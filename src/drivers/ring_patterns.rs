//! Tick-driven ring animations.
//!
//! The main loop calls `tick()` with the time since the previous call and
//! forwards any returned [`RingCommand`] to [`LedRing::apply`]. A command is
//! only produced when the ring output actually changes, so a slow animation
//! does not keep the bus busy.
//!
//! | Pattern  | Output                                   |
//! |----------|------------------------------------------|
//! | Off      | all LEDs dark                            |
//! | Level    | fixed bar                                |
//! | Spinner  | one LED stepping around the ring         |
//! | Sweep    | bar growing 0 → 24 then shrinking to 0   |
//!
//! [`LedRing::apply`]: crate::drivers::circular_led::LedRing::apply

use serde::{Deserialize, Serialize};

use crate::drivers::circular_led::RingCommand;
use crate::pattern::{Direction, Pattern, RING_LEDS};

/// Animation selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingPattern {
    Off,
    Level { level: u8, direction: Direction },
    /// `Up` walks towards higher indices.
    Spinner { step_ms: u32, direction: Direction },
    Sweep { step_ms: u32, direction: Direction },
}

/// Animation engine. Stack-allocated, no heap.
pub struct RingAnimator {
    phase_ms: u32,
    active: Option<RingPattern>,
    last: Option<RingCommand>,
}

impl RingAnimator {
    pub fn new() -> Self {
        Self {
            phase_ms: 0,
            active: None,
            last: None,
        }
    }

    /// Select a pattern. Restarts the phase only if the pattern changed.
    pub fn set_pattern(&mut self, pattern: RingPattern) {
        if self.active != Some(pattern) {
            self.active = Some(pattern);
            self.phase_ms = 0;
        }
    }

    /// Stop animating. The next tick turns the ring off.
    pub fn clear(&mut self) {
        self.active = None;
        self.phase_ms = 0;
    }

    /// Forget what was last emitted, e.g. after a failed frame, so the next
    /// tick re-sends the current output.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn pattern(&self) -> Option<RingPattern> {
        self.active
    }

    /// Advance by `delta_ms` and return the command to send, if any.
    pub fn tick(&mut self, delta_ms: u32) -> Option<RingCommand> {
        self.phase_ms = self.phase_ms.wrapping_add(delta_ms);
        let next = self.generate();
        if self.last == Some(next) {
            return None;
        }
        self.last = Some(next);
        Some(next)
    }

    fn generate(&self) -> RingCommand {
        match self.active.unwrap_or(RingPattern::Off) {
            RingPattern::Off => RingCommand::Status(Pattern::off()),
            RingPattern::Level { level, direction } => RingCommand::Level {
                level: level.min(RING_LEDS as u8),
                direction,
            },
            RingPattern::Spinner { step_ms, direction } => {
                let pos = (self.step(step_ms) % RING_LEDS as u32) as u8;
                let pos = match direction {
                    Direction::Up => pos,
                    Direction::Down => RING_LEDS as u8 - 1 - pos,
                };
                RingCommand::Spinner(pos)
            }
            RingPattern::Sweep { step_ms, direction } => RingCommand::Level {
                level: Self::triangle(self.step(step_ms)),
                direction,
            },
        }
    }

    fn step(&self, step_ms: u32) -> u32 {
        self.phase_ms / step_ms.max(1)
    }

    /// 0, 1, .. 24, 23, .. 1, 0, 1, ..
    fn triangle(step: u32) -> u8 {
        let span = RING_LEDS as u32;
        let pos = step % (2 * span);
        if pos <= span {
            pos as u8
        } else {
            (2 * span - pos) as u8
        }
    }
}

impl Default for RingAnimator {
    fn default() -> Self {
        Self::new()
    }
}
