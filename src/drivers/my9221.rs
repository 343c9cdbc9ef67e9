//! MY9221 serial protocol encoder.
//!
//! The chip is a chain of 16-bit shift registers clocked by DCKI. A frame
//! for the ring is 25 blocks:
//!
//! ```text
//!   [CMD_MODE] [LED0] [LED1] ... [LED23]  latch
//!    0x0000    0x00FF or 0x0000 each      data high, 8 clock pulses
//! ```
//!
//! Every block goes out MSB first. For each bit the data line is driven to
//! the bit value, then the clock is pulsed high and back low. After the last
//! block the data line is held high for eight clock pulses, which commits the
//! shift registers to the output latches, then returned low.
//!
//! The transfer is bit-banged and synchronous. There is no acknowledgement,
//! so a failed write leaves the chip holding a partial frame until the next
//! complete one.

use embedded_hal::digital::{Error as _, OutputPin, PinState};

use crate::error::{Line, Result, RingError};
use crate::pattern::{Pattern, RING_LEDS};

/// Bits per shift-register block.
pub const MAX_BIT_PER_BLOCK: u32 = 16;
/// Command word: 8-bit grayscale, internal oscillator, no special modes.
pub const CMD_MODE: u16 = 0x0000;
/// Payload block for a lit LED.
pub const BIT_HIGH: u16 = 0x00FF;
/// Payload block for a dark LED.
pub const BIT_LOW: u16 = 0x0000;
/// Clock pulses with data held high that latch the frame.
pub const LATCH_PULSES: usize = 8;
/// Command block plus one block per LED.
pub const FRAME_BLOCKS: usize = RING_LEDS + 1;

/// The blocks of one frame, in wire order.
pub type Frame = [u16; FRAME_BLOCKS];

/// Expand a pattern into wire blocks. LED 0 is shifted out first.
pub fn encode_frame(pattern: &Pattern) -> Frame {
    let mut frame = [BIT_LOW; FRAME_BLOCKS];
    frame[0] = CMD_MODE;
    for (block, on) in frame[1..].iter_mut().zip(pattern.iter()) {
        *block = if on { BIT_HIGH } else { BIT_LOW };
    }
    frame
}

/// Inverse of [`encode_frame`] over the payload blocks.
///
/// Returns `None` unless `payload` holds exactly 24 blocks, each one of the
/// two sentinels.
pub fn decode_payload(payload: &[u16]) -> Option<Pattern> {
    if payload.len() != RING_LEDS {
        return None;
    }
    let mut leds = [false; RING_LEDS];
    for (led, &block) in leds.iter_mut().zip(payload) {
        *led = match block {
            BIT_HIGH => true,
            BIT_LOW => false,
            _ => return None,
        };
    }
    Some(Pattern::from(leds))
}

/// Borrowed data/clock pair for the duration of one transfer.
pub struct Bus<'a, D, C> {
    data: &'a mut D,
    clock: &'a mut C,
}

impl<'a, D: OutputPin, C: OutputPin> Bus<'a, D, C> {
    pub fn new(data: &'a mut D, clock: &'a mut C) -> Self {
        Self { data, clock }
    }

    /// Shift out a whole frame and latch it.
    pub fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        for &block in frame {
            self.send_block(block)?;
        }
        self.latch()
    }

    /// Shift one 16-bit block, MSB first.
    pub fn send_block(&mut self, block: u16) -> Result<()> {
        for bit in (0..MAX_BIT_PER_BLOCK).rev() {
            let high = (block >> bit) & 1 == 1;
            self.drive_data(PinState::from(high))?;
            self.pulse_clock()?;
        }
        Ok(())
    }

    /// Commit the shifted blocks to the output drivers.
    pub fn latch(&mut self) -> Result<()> {
        self.drive_data(PinState::High)?;
        for _ in 0..LATCH_PULSES {
            self.pulse_clock()?;
        }
        self.drive_data(PinState::Low)
    }

    fn drive_data(&mut self, state: PinState) -> Result<()> {
        self.data.set_state(state).map_err(|e| RingError::IoWrite {
            line: Line::Data,
            kind: e.kind(),
        })
    }

    fn pulse_clock(&mut self) -> Result<()> {
        let fail = |e: C::Error| RingError::IoWrite {
            line: Line::Clock,
            kind: e.kind(),
        };
        self.clock.set_high().map_err(fail)?;
        self.clock.set_low().map_err(fail)
    }
}
