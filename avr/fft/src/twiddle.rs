//! Q15 twiddle factors
//!
//! `twiddle(k, n)` returns `(cos, sin)` of `2πk/n` scaled by [`Q15_ONE`].
//! The angle is folded into the first octant by quadrant and complement
//! symmetry, where short Taylor polynomials are accurate well below one Q15
//! step.

use core::f32::consts::PI;

/// Q15 representation of 1.0, saturated
pub(crate) const Q15_ONE: i32 = 0x7FFF;

/// Fractional bits of a Q15 value
pub(crate) const Q15_SHIFT: u32 = 15;

/// `(cos, sin)` of `2πk/n` in Q15. `n` must be a multiple of 4 and `k < n`.
pub(crate) fn twiddle(k: usize, n: usize) -> (i32, i32) {
    let quarter = n / 4;
    let quadrant = k / quarter;
    let r = k % quarter;

    let (c, s) = if 2 * r <= quarter {
        first_octant(r, n)
    } else {
        let (c, s) = first_octant(quarter - r, n);
        (s, c)
    };

    match quadrant {
        0 => (c, s),
        1 => (-s, c),
        2 => (-c, -s),
        _ => (s, -c),
    }
}

/// `(cos, sin)` of `2πr/n` for `r/n <= 1/8`
fn first_octant(r: usize, n: usize) -> (i32, i32) {
    let x = 2.0 * PI * r as f32 / n as f32;
    let x2 = x * x;
    let sin = x * (1.0 - x2 / 6.0 * (1.0 - x2 / 20.0 * (1.0 - x2 / 42.0)));
    let cos = 1.0 - x2 / 2.0 * (1.0 - x2 / 12.0 * (1.0 - x2 / 30.0 * (1.0 - x2 / 56.0)));
    (to_q15(cos), to_q15(sin))
}

fn to_q15(value: f32) -> i32 {
    let scaled = value * Q15_ONE as f32;
    let rounded = if scaled >= 0.0 {
        scaled + 0.5
    } else {
        scaled - 0.5
    };
    (rounded as i32).clamp(-Q15_ONE, Q15_ONE)
}

/// `(re + i·im) · (c − i·s)` with Q15 `c`, `s`, rounded
#[inline]
pub(crate) fn mul_conj(re: i32, im: i32, c: i32, s: i32) -> (i32, i32) {
    const ROUND: i32 = 1 << (Q15_SHIFT - 1);
    (
        (re * c + im * s + ROUND) >> Q15_SHIFT,
        (im * c - re * s + ROUND) >> Q15_SHIFT,
    )
}
