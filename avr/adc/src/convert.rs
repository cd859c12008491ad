//! Sample conversions
//!
//! Pure functions over raw samples. `resolution` is the full-scale constant of
//! the converter (1024 for a 10-bit result).

/// Resistance of the unknown leg of a voltage divider.
///
/// The unknown resistor sits on the supply side and `balance_ohms` on the
/// ground side, the ADC reading the midpoint:
/// `resolution * balance / raw - balance`. A zero sample returns 0.
pub const fn raw_to_resistance(raw: u16, balance_ohms: u16, resolution: u16) -> i32 {
    if raw == 0 {
        return 0;
    }
    let balance = balance_ohms as i32;
    resolution as i32 * balance / raw as i32 - balance
}

/// Voltage for a sample: `raw * vref / resolution`. A zero sample returns 0.0.
pub fn raw_to_voltage(raw: u16, vref: f32, resolution: u16) -> f32 {
    if raw == 0 {
        return 0.0;
    }
    f32::from(raw) * vref / f32::from(resolution)
}
