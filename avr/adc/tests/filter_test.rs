//! EMA filter tests for avr-adc

use avr_adc::filter::{ema_filter, ema_filter_with, EMA_ALPHA};

/// Largest gap below a rising target at which the filter stops moving
const RISING_STALL: u16 = (64 + EMA_ALPHA as u16 - 1) / EMA_ALPHA as u16 - 1;

fn run(start: u16, target: u16, steps: usize) -> Vec<u16> {
    let mut out = Vec::with_capacity(steps);
    let mut value = start;
    for _ in 0..steps {
        value = ema_filter(target, value);
        out.push(value);
    }
    out
}

#[test]
fn test_step_response_from_zero() {
    let out = run(0, 1024, 12);
    assert_eq!(
        out,
        [480, 735, 870, 942, 980, 1000, 1011, 1017, 1020, 1021, 1022, 1022]
    );
}

#[test]
fn test_step_response_from_full_scale() {
    let out = run(1024, 0, 11);
    assert_eq!(out, [544, 289, 153, 81, 43, 22, 11, 5, 2, 1, 0]);
}

#[test]
fn test_rising_input_settles_just_below() {
    assert_eq!(RISING_STALL, 2);
    for target in [1u16, 3, 100, 511, 1023, 1024, u16::MAX] {
        let out = run(0, target, 64);
        assert!(out.windows(2).all(|w| w[0] <= w[1]), "target {target}");
        assert!(out.iter().all(|&v| v <= target));

        let settled = *out.last().unwrap();
        assert!(target - settled <= RISING_STALL, "target {target}: {settled}");
    }
}

#[test]
fn test_falling_input_is_reached() {
    for (start, target) in [(1024u16, 0u16), (1023, 512), (u16::MAX, 1), (600, 599)] {
        let out = run(start, target, 64);
        assert!(out.windows(2).all(|w| w[0] >= w[1]));
        assert!(out.iter().all(|&v| v >= target));
        assert_eq!(*out.last().unwrap(), target);
    }
}

#[test]
fn test_seven_steps_cover_most_of_a_step() {
    // Error shrinks by 34/64 per step; seven steps leave under 1/64 of it
    let out = run(0, 1024, 7);
    assert!(1024 - out[6] <= 1024 / 64);
}

#[test]
fn test_custom_alpha() {
    assert_eq!(ema_filter_with::<32>(1000, 0), 500);
    assert_eq!(ema_filter_with::<16>(640, 0), 160);
    assert_eq!(ema_filter_with::<EMA_ALPHA>(1024, 0), ema_filter(1024, 0));
}
