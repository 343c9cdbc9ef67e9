//! Claim, failure and release behaviour against the simulated GPIO port.

use ledring::adapters::sim_gpio::{SimGpio, decode_frame};
use ledring::drivers::my9221::{BIT_HIGH, BIT_LOW, CMD_MODE, LATCH_PULSES};
use ledring::error::{ArgumentError, InitFailure, Line};
use ledring::{Direction, LedRing, Pattern, RingError};

const DATA: i32 = 5;
const CLOCK: i32 = 4;

#[test]
fn claim_holds_both_pins_until_drop() {
    let mut gpio = SimGpio::new();
    let ring = LedRing::claim(&mut gpio, DATA, CLOCK).unwrap();
    assert!(gpio.is_claimed(DATA));
    assert!(gpio.is_claimed(CLOCK));
    drop(ring);
    assert_eq!(gpio.claimed_count(), 0);
}

#[test]
fn unclaimable_clock_releases_data_pin() {
    let mut gpio = SimGpio::new();
    gpio.mark_unavailable(CLOCK);
    let err = LedRing::claim(&mut gpio, DATA, CLOCK).err();
    assert_eq!(
        err,
        Some(RingError::IoInit {
            pin: CLOCK,
            cause: InitFailure::Unavailable
        })
    );
    assert_eq!(gpio.claimed_count(), 0, "no pin may be left claimed");
    assert_eq!(gpio.write_count(), 0);
}

#[test]
fn unclaimable_data_claims_nothing() {
    let mut gpio = SimGpio::new();
    gpio.mark_unavailable(DATA);
    let err = LedRing::claim(&mut gpio, DATA, CLOCK).err();
    assert!(matches!(err, Some(RingError::IoInit { pin: DATA, .. })));
    assert_eq!(gpio.claimed_count(), 0);
}

#[test]
fn same_pin_for_both_lines_is_busy() {
    let mut gpio = SimGpio::new();
    let err = LedRing::claim(&mut gpio, DATA, DATA).err();
    assert_eq!(
        err,
        Some(RingError::IoInit {
            pin: DATA,
            cause: InitFailure::Busy
        })
    );
    assert_eq!(gpio.claimed_count(), 0);
}

#[test]
fn second_ring_on_same_pins_is_refused() {
    let mut gpio = SimGpio::new();
    let _first = LedRing::claim(&mut gpio, DATA, CLOCK).unwrap();
    assert!(LedRing::claim(&mut gpio, DATA, CLOCK).is_err());
    assert!(gpio.is_claimed(DATA) && gpio.is_claimed(CLOCK));
}

#[test]
fn idle_write_failure_is_init_error_and_releases() {
    let mut gpio = SimGpio::new();
    gpio.fail_writes_after(0);
    let err = LedRing::claim(&mut gpio, DATA, CLOCK).err();
    assert!(matches!(
        err,
        Some(RingError::IoInit {
            pin: DATA,
            cause: InitFailure::Configure(_)
        })
    ));
    assert_eq!(gpio.claimed_count(), 0);
}

#[test]
fn invalid_arguments_produce_no_writes() {
    let mut gpio = SimGpio::new();
    let mut ring = LedRing::claim(&mut gpio, DATA, CLOCK).unwrap();
    gpio.take_events();

    assert_eq!(
        ring.set_level(25, Direction::Down),
        Err(RingError::InvalidArgument(ArgumentError::LevelOutOfRange(25)))
    );
    assert_eq!(
        ring.set_spinner(200),
        Err(RingError::InvalidArgument(ArgumentError::PositionOutOfRange(200)))
    );
    assert_eq!(
        ring.set_status_slice(&[]),
        Err(RingError::InvalidArgument(ArgumentError::StatusLength(0)))
    );
    assert_eq!(gpio.write_count(), 0);
}

#[test]
fn decoded_frame_matches_protocol() {
    let mut gpio = SimGpio::new();
    let mut ring = LedRing::claim(&mut gpio, DATA, CLOCK).unwrap();
    gpio.take_events();

    ring.set_spinner(9).unwrap();
    let frame = decode_frame(&gpio.take_events(), DATA, CLOCK).unwrap();
    assert_eq!(frame.blocks[0], CMD_MODE);
    for (i, &block) in frame.blocks[1..].iter().enumerate() {
        assert_eq!(block, if i == 9 { BIT_HIGH } else { BIT_LOW });
    }
    assert_eq!(frame.latch_pulses, LATCH_PULSES);
    assert!(frame.latch_data_high);
    assert!(!frame.data_idle_high);
}

#[test]
fn write_failure_aborts_and_next_call_resynchronises() {
    let mut gpio = SimGpio::new();
    let mut ring = LedRing::claim(&mut gpio, DATA, CLOCK).unwrap();
    ring.set_level(10, Direction::Up).unwrap();

    gpio.fail_writes_after(100);
    let err = ring.set_level(20, Direction::Up).unwrap_err();
    assert!(matches!(err, RingError::IoWrite { line: Line::Data | Line::Clock, .. }));
    assert_eq!(ring.shown(), None);

    gpio.take_events();
    gpio.restore_writes();
    ring.set_level(20, Direction::Up).unwrap();
    assert_eq!(ring.shown(), Some(Pattern::level(20, Direction::Up).unwrap()));
    let frame = decode_frame(&gpio.take_events(), DATA, CLOCK).unwrap();
    assert_eq!(frame.latch_pulses, LATCH_PULSES);
}

#[test]
fn release_hands_pins_back() {
    let mut gpio = SimGpio::new();
    let ring = LedRing::claim(&mut gpio, DATA, CLOCK).unwrap();
    let (data, clock) = ring.release();
    assert_eq!((data.id(), clock.id()), (DATA, CLOCK));
    assert!(gpio.is_claimed(DATA));
    drop((data, clock));
    assert_eq!(gpio.claimed_count(), 0);
}
