//! Fuzz target: `LedRing::set_status_slice`
//!
//! Turns arbitrary bytes into a status sequence of arbitrary length and
//! drives it through the ring on a simulated port. Wrong lengths must be
//! rejected without a single write; correct ones must decode back to the
//! input from the pin trace.
//!
//! cargo fuzz run fuzz_set_status

#![no_main]

use libfuzzer_sys::fuzz_target;
use ledring::adapters::sim_gpio::{SimGpio, decode_frame};
use ledring::drivers::my9221::{LATCH_PULSES, decode_payload};
use ledring::{LedRing, Pattern, RING_LEDS};

fuzz_target!(|data: &[u8]| {
    let status: Vec<bool> = data.iter().map(|b| b & 1 == 1).collect();

    let mut gpio = SimGpio::new();
    let mut ring = LedRing::claim(&mut gpio, 0, 1).expect("sim claim");
    gpio.take_events();

    match ring.set_status_slice(&status) {
        Ok(()) => {
            assert_eq!(status.len(), RING_LEDS);
            let frame = decode_frame(&gpio.take_events(), 0, 1).expect("full frame");
            let expected = Pattern::from_slice(&status).ok();
            assert_eq!(decode_payload(&frame.blocks[1..]), expected);
            assert_eq!(frame.latch_pulses, LATCH_PULSES);
        }
        Err(_) => {
            assert_ne!(status.len(), RING_LEDS);
            assert_eq!(gpio.write_count(), 0, "rejected input must not touch pins");
        }
    }
});
