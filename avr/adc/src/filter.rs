//! Exponential moving average in fixed point
//!
//! `out = ((64 - alpha) * previous + alpha * new) >> 6`, computed in `u32`.
//! Truncation biases the output downwards: approaching a rising input the
//! filter stalls up to `ceil(64 / alpha) - 1` below it, while a falling input
//! is reached exactly.

/// Default smoothing factor out of 64
pub const EMA_ALPHA: u32 = 30;

/// Fixed-point scale of the smoothing factor (`1 << EMA_SHIFT == 64`)
pub const EMA_SHIFT: u32 = 6;

/// Filter `new_value` against `previous` with [`EMA_ALPHA`]
pub fn ema_filter(new_value: u16, previous: u16) -> u16 {
    ema_filter_with::<EMA_ALPHA>(new_value, previous)
}

/// Filter with a compile-time smoothing factor, `ALPHA` in `0..64`
pub fn ema_filter_with<const ALPHA: u32>(new_value: u16, previous: u16) -> u16 {
    const { assert!(ALPHA < (1 << EMA_SHIFT), "EMA alpha must be below 64") };

    let weighted =
        ((1 << EMA_SHIFT) - ALPHA) * u32::from(previous) + ALPHA * u32::from(new_value);
    // A weighted mean of two u16 values fits in u16
    (weighted >> EMA_SHIFT) as u16
}
