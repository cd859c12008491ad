//! Sample conversion tests for avr-adc

use avr_adc::convert::{raw_to_resistance, raw_to_voltage};

#[test]
fn test_resistance_reference_points() {
    assert_eq!(raw_to_resistance(512, 10_000, 1024), 10_000);
    assert_eq!(raw_to_resistance(256, 10_000, 1024), 30_000);
    assert_eq!(raw_to_resistance(1024, 10_000, 1024), 0);
    assert_eq!(raw_to_resistance(0, 10_000, 1024), 0);
    assert_eq!(raw_to_resistance(0, 0, 1024), 0);
}

#[test]
fn test_resistance_decreases_with_sample() {
    let mut previous = raw_to_resistance(1, u16::MAX, 1024);
    assert_eq!(previous, 1024 * 65_535 - 65_535);
    for raw in 2..=1023u16 {
        let ohms = raw_to_resistance(raw, u16::MAX, 1024);
        assert!(ohms <= previous, "raw {raw}: {ohms} > {previous}");
        previous = ohms;
    }
}

#[test]
fn test_voltage_reference_points() {
    assert_eq!(raw_to_voltage(0, 5.0, 1024), 0.0);
    assert_eq!(raw_to_voltage(1024, 5.0, 1024), 5.0);
    assert_eq!(raw_to_voltage(1024, 2.816, 1024), 2.816);
    assert!((raw_to_voltage(1023, 5.0, 1024) - 4.995_117).abs() < 1e-5);
}

#[test]
fn test_voltage_is_monotonic() {
    let mut previous = 0.0;
    for raw in 1..=1023u16 {
        let volts = raw_to_voltage(raw, 3.3, 1024);
        assert!(volts > previous);
        previous = volts;
    }
}
