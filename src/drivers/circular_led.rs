//! Grove Circular LED driver (24 LEDs on a MY9221).
//!
//! Owns the DI (data) and DCKI (clock) outputs for its whole lifetime.
//! Every public operation builds a complete [`Pattern`] from its arguments,
//! validates before touching a pin, then shifts and latches a full frame.
//!
//! ## Lifecycle
//!
//! ```text
//!   claim()/new() ──▶ set_level / set_spinner / set_status ... ──▶ drop
//! ```
//!
//! Pins are released when the driver is dropped (or handed back by
//! [`LedRing::release`]). A failed construction drops whatever it had
//! already claimed, so no pin is left dangling.

use embedded_hal::digital::{Error as _, OutputPin};
use log::{debug, warn};

use crate::drivers::my9221::{Bus, encode_frame};
use crate::error::{InitFailure, Result, RingError};
use crate::pattern::{Direction, Pattern, RING_LEDS};
use crate::ports::{GpioPort, PinId};

/// Identifying name of the device.
pub const NAME: &str = "Grove Circular LED";

/// A single ring update, decoupled from the driver that performs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingCommand {
    Level { level: u8, direction: Direction },
    Spinner(u8),
    Status(Pattern),
}

pub struct LedRing<D, C> {
    data: D,
    clock: C,
    shown: Option<Pattern>,
}

impl<P: OutputPin> LedRing<P, P> {
    /// Claim both pins from the platform and drive them low.
    pub fn claim<G>(port: &mut G, data_pin: PinId, clock_pin: PinId) -> Result<Self>
    where
        G: GpioPort<Pin = P>,
    {
        let mut data = claim_pin(port, data_pin)?;
        // On failure `data` is dropped here, releasing it.
        let mut clock = claim_pin(port, clock_pin)?;

        idle_low(&mut data, data_pin)?;
        idle_low(&mut clock, clock_pin)?;

        debug!("{}: claimed data=GPIO{} clock=GPIO{}", NAME, data_pin, clock_pin);
        Ok(Self {
            data,
            clock,
            shown: None,
        })
    }
}

impl<D: OutputPin, C: OutputPin> LedRing<D, C> {
    /// Take ownership of two already-configured outputs and drive them low.
    ///
    /// Pin identifiers are unknown here, so initialisation errors report
    /// pin `-1`.
    pub fn new(mut data: D, mut clock: C) -> Result<Self> {
        idle_low(&mut data, -1)?;
        idle_low(&mut clock, -1)?;
        Ok(Self {
            data,
            clock,
            shown: None,
        })
    }

    pub fn name(&self) -> &'static str {
        NAME
    }

    /// Light a contiguous bar of `level` LEDs (0..=24).
    pub fn set_level(&mut self, level: u8, direction: Direction) -> Result<()> {
        let pattern = Pattern::level(level, direction)?;
        self.show(pattern)
    }

    /// Light only the LED at `position` (0..=23).
    pub fn set_spinner(&mut self, position: u8) -> Result<()> {
        let pattern = Pattern::spinner(position)?;
        self.show(pattern)
    }

    /// Set every LED from a fixed-size status array.
    pub fn set_status(&mut self, status: &[bool; RING_LEDS]) -> Result<()> {
        self.show(Pattern::from(*status))
    }

    /// Like [`set_status`](Self::set_status) for sequences whose length is
    /// only known at runtime.
    pub fn set_status_slice(&mut self, status: &[bool]) -> Result<()> {
        let pattern = Pattern::from_slice(status)?;
        self.show(pattern)
    }

    /// Turn every LED off.
    pub fn clear(&mut self) -> Result<()> {
        self.show(Pattern::off())
    }

    pub fn apply(&mut self, command: RingCommand) -> Result<()> {
        match command {
            RingCommand::Level { level, direction } => self.set_level(level, direction),
            RingCommand::Spinner(position) => self.set_spinner(position),
            RingCommand::Status(pattern) => self.show(pattern),
        }
    }

    /// Shift and latch `pattern`.
    pub fn show(&mut self, pattern: Pattern) -> Result<()> {
        let frame = encode_frame(&pattern);
        match Bus::new(&mut self.data, &mut self.clock).send_frame(&frame) {
            Ok(()) => {
                debug!("{}: latched {} lit", NAME, pattern.lit_count());
                self.shown = Some(pattern);
                Ok(())
            }
            Err(e) => {
                warn!("{}: frame aborted: {}", NAME, e);
                self.shown = None;
                Err(e)
            }
        }
    }

    /// Last pattern that was latched completely.
    ///
    /// `None` before the first frame and after a failed one, when the chip
    /// may hold a partial frame.
    pub fn shown(&self) -> Option<Pattern> {
        self.shown
    }

    /// Give the pins back to the caller.
    pub fn release(self) -> (D, C) {
        debug!("{}: released", NAME);
        (self.data, self.clock)
    }
}

fn claim_pin<G: GpioPort>(port: &mut G, pin: PinId) -> Result<G::Pin> {
    port.claim_output(pin).map_err(|cause| {
        warn!("{}: cannot claim GPIO{}: {}", NAME, pin, cause);
        RingError::IoInit { pin, cause }
    })
}

fn idle_low<P: OutputPin>(pin: &mut P, id: PinId) -> Result<()> {
    pin.set_low().map_err(|e| RingError::IoInit {
        pin: id,
        cause: InitFailure::Configure(e.kind()),
    })
}
