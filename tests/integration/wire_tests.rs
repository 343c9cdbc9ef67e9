//! Bit-exact checks of the stream a ring operation puts on DI/DCKI.

use ledring::error::Line;
use ledring::{Direction, LedRing};

use crate::mock_hw::{CallLog, MockPin, PinCall, mock_pins, sampled_bits};

const BLOCK: usize = 16;
const PAYLOAD_START: usize = BLOCK;
const PAYLOAD_END: usize = 25 * BLOCK;

fn make_ring() -> (LedRing<MockPin, MockPin>, CallLog) {
    let (data, clock, calls) = mock_pins();
    let ring = LedRing::new(data, clock).unwrap();
    // Drop the idle-low writes from construction.
    calls.borrow_mut().clear();
    (ring, calls)
}

fn payload_blocks(bits: &[bool]) -> Vec<u16> {
    bits[PAYLOAD_START..PAYLOAD_END]
        .chunks(BLOCK)
        .map(|c| c.iter().fold(0u16, |acc, &b| (acc << 1) | u16::from(b)))
        .collect()
}

#[test]
fn construction_drives_both_lines_low() {
    let (data, clock, calls) = mock_pins();
    let _ring = LedRing::new(data, clock).unwrap();
    assert_eq!(
        *calls.borrow(),
        vec![
            PinCall {
                line: Line::Data,
                high: false
            },
            PinCall {
                line: Line::Clock,
                high: false
            },
        ]
    );
}

#[test]
fn stream_starts_with_zero_command_block() {
    let (mut ring, calls) = make_ring();
    ring.set_level(24, Direction::Up).unwrap();
    let bits = sampled_bits(&calls.borrow());
    assert!(bits[..BLOCK].iter().all(|&b| !b));
}

#[test]
fn level_zero_keeps_data_low_through_payload() {
    let (mut ring, calls) = make_ring();
    ring.set_level(0, Direction::Up).unwrap();
    let bits = sampled_bits(&calls.borrow());
    assert_eq!(bits.len(), PAYLOAD_END + 8);
    assert!(bits[..PAYLOAD_END].iter().all(|&b| !b));
}

#[test]
fn full_level_sends_high_sentinel_in_every_lane() {
    let (mut ring, calls) = make_ring();
    ring.set_level(24, Direction::Up).unwrap();
    let blocks = payload_blocks(&sampled_bits(&calls.borrow()));
    assert_eq!(blocks, vec![0x00FF; 24]);
}

#[test]
fn spinner_five_lights_only_lane_five() {
    let (mut ring, calls) = make_ring();
    ring.set_spinner(5).unwrap();
    let blocks = payload_blocks(&sampled_bits(&calls.borrow()));
    for (i, block) in blocks.iter().enumerate() {
        let expected = if i == 5 { 0x00FF } else { 0x0000 };
        assert_eq!(*block, expected, "lane {i}");
    }
}

#[test]
fn level_down_lights_the_top_lanes() {
    let (mut ring, calls) = make_ring();
    ring.set_level(3, Direction::Down).unwrap();
    let blocks = payload_blocks(&sampled_bits(&calls.borrow()));
    assert_eq!(&blocks[21..], &[0x00FF; 3]);
    assert!(blocks[..21].iter().all(|&b| b == 0));
}

#[test]
fn all_true_status_equals_full_level() {
    let (mut a, calls_a) = make_ring();
    let (mut b, calls_b) = make_ring();
    a.set_status(&[true; 24]).unwrap();
    b.set_level(24, Direction::Up).unwrap();
    assert_eq!(*calls_a.borrow(), *calls_b.borrow());
}

#[test]
fn stream_ends_with_eight_pulse_latch() {
    let (mut ring, calls) = make_ring();
    ring.set_spinner(0).unwrap();
    let calls = calls.borrow();
    let n = calls.len();

    let latch = &calls[n - 18..];
    assert_eq!(
        latch[0],
        PinCall {
            line: Line::Data,
            high: true
        }
    );
    for (i, call) in latch[1..17].iter().enumerate() {
        assert_eq!(call.line, Line::Clock);
        assert_eq!(call.high, i % 2 == 0, "pulse edge {i}");
    }
    assert_eq!(
        latch[17],
        PinCall {
            line: Line::Data,
            high: false
        }
    );
}

#[test]
fn every_bit_is_one_data_write_and_one_clock_pulse() {
    let (mut ring, calls) = make_ring();
    ring.set_level(7, Direction::Up).unwrap();
    let calls = calls.borrow();
    for bit in calls[..PAYLOAD_END * 3].chunks(3) {
        assert_eq!(bit[0].line, Line::Data);
        assert_eq!(
            bit[1],
            PinCall {
                line: Line::Clock,
                high: true
            }
        );
        assert_eq!(
            bit[2],
            PinCall {
                line: Line::Clock,
                high: false
            }
        );
    }
}
