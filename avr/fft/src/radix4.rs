//! In-place radix-4 decimation-in-time transform
//!
//! The input is put in bit-reversed order, then passes combine sub-transforms
//! of length `h` into length `4h`. An odd `log2_len` starts with one radix-2
//! pass so the radix-4 passes cover the rest.

use crate::permute::bit_reverse_permute;
use crate::twiddle::{mul_conj, twiddle};
use crate::{FftError, FftResult, MAX_LOG2_LEN};

/// Forward FFT of `re + i·im`, in place, scaled by `1/N`.
///
/// Both slices must hold exactly `2^log2_len` points with `log2_len` in
/// `1..=12`. On return `re[k] + i·im[k]` is `X[k] / N`.
pub fn radix4_fft(re: &mut [i16], im: &mut [i16], log2_len: u32) -> FftResult<()> {
    if log2_len == 0 || log2_len > MAX_LOG2_LEN {
        return Err(FftError::UnsupportedSize(log2_len));
    }
    if re.len() != im.len() {
        return Err(FftError::LengthMismatch {
            real: re.len(),
            imag: im.len(),
        });
    }
    let n = 1usize << log2_len;
    if re.len() != n {
        return Err(FftError::WrongLength {
            len: re.len(),
            expected: n,
        });
    }

    bit_reverse_permute(re)?;
    bit_reverse_permute(im)?;

    let mut h = 1;
    if log2_len % 2 == 1 {
        radix2_pass(re, im);
        h = 2;
    }
    while 4 * h <= n {
        radix4_pass(re, im, h);
        h *= 4;
    }
    Ok(())
}

/// Length-2 butterflies on adjacent pairs, halved
fn radix2_pass(re: &mut [i16], im: &mut [i16]) {
    for k in (0..re.len()).step_by(2) {
        let (ar, ai) = (i32::from(re[k]), i32::from(im[k]));
        let (br, bi) = (i32::from(re[k + 1]), i32::from(im[k + 1]));
        re[k] = scale(ar + br, 1);
        im[k] = scale(ai + bi, 1);
        re[k + 1] = scale(ar - br, 1);
        im[k + 1] = scale(ai - bi, 1);
    }
}

/// Combine four length-`h` transforms into one of length `4h`, quartered
fn radix4_pass(re: &mut [i16], im: &mut [i16], h: usize) {
    let span = 4 * h;
    for j in 0..h {
        // j == 0 multiplies by one and stays exact
        let twiddles =
            (j != 0).then(|| (twiddle(j, span), twiddle(2 * j, span), twiddle(3 * j, span)));

        for base in (0..re.len()).step_by(span) {
            let p0 = base + j;
            let p1 = p0 + h;
            let p2 = p1 + h;
            let p3 = p2 + h;

            let x0 = load(re, im, p0);
            let (b, c, d) = match twiddles {
                Some((w1, w2, w3)) => (
                    rotate(load(re, im, p1), w2),
                    rotate(load(re, im, p2), w1),
                    rotate(load(re, im, p3), w3),
                ),
                None => (load(re, im, p1), load(re, im, p2), load(re, im, p3)),
            };

            let s0 = (x0.0 + b.0, x0.1 + b.1);
            let s1 = (x0.0 - b.0, x0.1 - b.1);
            let s2 = (c.0 + d.0, c.1 + d.1);
            let s3 = (c.0 - d.0, c.1 - d.1);

            // -i·s3 = (s3.im, -s3.re)
            re[p0] = scale(s0.0 + s2.0, 2);
            im[p0] = scale(s0.1 + s2.1, 2);
            re[p1] = scale(s1.0 + s3.1, 2);
            im[p1] = scale(s1.1 - s3.0, 2);
            re[p2] = scale(s0.0 - s2.0, 2);
            im[p2] = scale(s0.1 - s2.1, 2);
            re[p3] = scale(s1.0 - s3.1, 2);
            im[p3] = scale(s1.1 + s3.0, 2);
        }
    }
}

#[inline]
fn load(re: &[i16], im: &[i16], p: usize) -> (i32, i32) {
    (i32::from(re[p]), i32::from(im[p]))
}

/// Multiply by `e^{-iθ}` given `(cos θ, sin θ)` in Q15
#[inline]
fn rotate(value: (i32, i32), (c, s): (i32, i32)) -> (i32, i32) {
    mul_conj(value.0, value.1, c, s)
}

/// Rounded right shift, saturated to `i16`
#[inline]
fn scale(value: i32, shift: u32) -> i16 {
    let rounded = (value + (1 << (shift - 1))) >> shift;
    rounded.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
