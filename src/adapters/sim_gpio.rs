//! Simulated GPIO port for host builds.
//!
//! Every pin handed out by [`SimGpio`] writes into one shared trace, so a
//! test can replay exactly what the MY9221 would have seen on its DI and
//! DCKI inputs. The port also tracks which pins are claimed, so a leaked or
//! double-claimed pin shows up as a test failure rather than silently.
//!
//! Faults can be injected: pins can be marked unavailable, and writes can be
//! made to fail after a fixed budget.

use core::cell::RefCell;
use core::fmt;
use std::collections::BTreeSet;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use log::trace;

use crate::drivers::my9221::{FRAME_BLOCKS, Frame, MAX_BIT_PER_BLOCK};
use crate::error::InitFailure;
use crate::ports::{GpioPort, PinId};

/// One recorded output write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEvent {
    pub pin: PinId,
    pub high: bool,
}

#[derive(Default)]
struct SimState {
    claimed: BTreeSet<PinId>,
    unavailable: BTreeSet<PinId>,
    events: Vec<LineEvent>,
    write_budget: Option<usize>,
}

/// Shared handle to the simulated port. Clones see the same pins.
#[derive(Clone, Default)]
pub struct SimGpio {
    state: Rc<RefCell<SimState>>,
}

impl SimGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make future claims of `pin` fail with [`InitFailure::Unavailable`].
    pub fn mark_unavailable(&self, pin: PinId) {
        self.state.borrow_mut().unavailable.insert(pin);
    }

    /// Allow `writes` more successful writes, then fail every write.
    pub fn fail_writes_after(&self, writes: usize) {
        self.state.borrow_mut().write_budget = Some(writes);
    }

    /// Undo [`fail_writes_after`](Self::fail_writes_after).
    pub fn restore_writes(&self) {
        self.state.borrow_mut().write_budget = None;
    }

    pub fn is_claimed(&self, pin: PinId) -> bool {
        self.state.borrow().claimed.contains(&pin)
    }

    pub fn claimed_count(&self) -> usize {
        self.state.borrow().claimed.len()
    }

    pub fn events(&self) -> Vec<LineEvent> {
        self.state.borrow().events.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.borrow().events.len()
    }

    /// Drain the trace, e.g. between frames.
    pub fn take_events(&self) -> Vec<LineEvent> {
        core::mem::take(&mut self.state.borrow_mut().events)
    }
}

impl GpioPort for SimGpio {
    type Pin = SimPin;

    fn claim_output(&mut self, pin: PinId) -> Result<SimPin, InitFailure> {
        let mut state = self.state.borrow_mut();
        if state.unavailable.contains(&pin) {
            return Err(InitFailure::Unavailable);
        }
        if !state.claimed.insert(pin) {
            return Err(InitFailure::Busy);
        }
        trace!("sim: claimed GPIO{}", pin);
        Ok(SimPin {
            id: pin,
            state: Rc::clone(&self.state),
        })
    }
}

/// Output pin backed by the simulated port. Released on drop.
pub struct SimPin {
    id: PinId,
    state: Rc<RefCell<SimState>>,
}

impl SimPin {
    pub fn id(&self) -> PinId {
        self.id
    }

    fn write(&mut self, high: bool) -> Result<(), SimPinError> {
        let mut state = self.state.borrow_mut();
        if let Some(left) = state.write_budget.as_mut() {
            if *left == 0 {
                return Err(SimPinError { pin: self.id });
            }
            *left -= 1;
        }
        state.events.push(LineEvent { pin: self.id, high });
        Ok(())
    }
}

impl Drop for SimPin {
    fn drop(&mut self) {
        trace!("sim: released GPIO{}", self.id);
        self.state.borrow_mut().claimed.remove(&self.id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPinError {
    pub pin: PinId,
}

impl fmt::Display for SimPinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simulated write failure on GPIO{}", self.pin)
    }
}

impl embedded_hal::digital::Error for SimPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for SimPin {
    type Error = SimPinError;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), SimPinError> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), SimPinError> {
        self.write(true)
    }
}

// ── Trace decoding ────────────────────────────────────────────

/// Data level sampled at every rising clock edge, the way the chip's shift
/// register sees the stream. Both lines are assumed low before the trace.
pub fn sample_rising_edges(events: &[LineEvent], data: PinId, clock: PinId) -> Vec<bool> {
    let mut data_high = false;
    let mut clock_high = false;
    let mut bits = Vec::new();
    for ev in events {
        if ev.pin == data {
            data_high = ev.high;
        } else if ev.pin == clock {
            if ev.high && !clock_high {
                bits.push(data_high);
            }
            clock_high = ev.high;
        }
    }
    bits
}

/// A frame reassembled from a pin trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub blocks: Frame,
    /// Rising clock edges after the last block.
    pub latch_pulses: usize,
    /// Whether data was high on every one of those edges.
    pub latch_data_high: bool,
    /// Level of the data line at the end of the trace.
    pub data_idle_high: bool,
}

/// Decode one complete frame from a trace, or `None` if it is too short.
pub fn decode_frame(events: &[LineEvent], data: PinId, clock: PinId) -> Option<DecodedFrame> {
    let bits = sample_rising_edges(events, data, clock);
    let width = MAX_BIT_PER_BLOCK as usize;
    let frame_bits = FRAME_BLOCKS * width;
    if bits.len() < frame_bits {
        return None;
    }
    let mut blocks = [0u16; FRAME_BLOCKS];
    for (block, chunk) in blocks.iter_mut().zip(bits[..frame_bits].chunks(width)) {
        *block = chunk
            .iter()
            .fold(0u16, |acc, &bit| (acc << 1) | u16::from(bit));
    }
    let latch = &bits[frame_bits..];
    let data_idle_high = events
        .iter()
        .rev()
        .find(|ev| ev.pin == data)
        .is_some_and(|ev| ev.high);
    Some(DecodedFrame {
        blocks,
        latch_pulses: latch.len(),
        latch_data_high: latch.iter().all(|&b| b),
        data_idle_high,
    })
}
