//! Spectrum tests for avr-fft

use std::f64::consts::PI;

use avr_fft::{bit_reverse_permute, radix4_fft, FftError};

fn tone(len: usize, bin: usize, amplitude: f64, phase: f64) -> Vec<i16> {
    (0..len)
        .map(|n| {
            let angle = 2.0 * PI * (bin * n) as f64 / len as f64 + phase;
            (amplitude * angle.cos()).round() as i16
        })
        .collect()
}

fn assert_near(actual: i16, expected: i16, tolerance: i16, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn test_dc_is_exact() {
    for ldn in 1..=8u32 {
        let n = 1usize << ldn;
        let mut re = vec![1000i16; n];
        let mut im = vec![0i16; n];
        radix4_fft(&mut re, &mut im, ldn).unwrap();

        assert_eq!(re[0], 1000, "ldn {ldn}");
        assert!(re[1..].iter().all(|&x| x == 0), "ldn {ldn}");
        assert!(im.iter().all(|&x| x == 0), "ldn {ldn}");
    }
}

#[test]
fn test_impulse_is_flat() {
    for (ldn, amplitude, level) in [(4u32, 1600i16, 100i16), (5, 1600, 50), (6, 6400, 100)] {
        let n = 1usize << ldn;
        let mut re = vec![0i16; n];
        let mut im = vec![0i16; n];
        re[0] = amplitude;
        radix4_fft(&mut re, &mut im, ldn).unwrap();

        assert!(re.iter().all(|&x| x == level), "ldn {ldn}: {re:?}");
        assert!(im.iter().all(|&x| x == 0), "ldn {ldn}: {im:?}");
    }
}

#[test]
fn test_cosine_even_size() {
    let mut re = tone(64, 4, 8000.0, 0.0);
    let mut im = vec![0i16; 64];
    radix4_fft(&mut re, &mut im, 6).unwrap();

    for k in 0..64 {
        let (expected, what) = if k == 4 || k == 60 {
            (4000, "peak")
        } else {
            (0, "leak")
        };
        assert_near(re[k], expected, 8, &format!("{what} re[{k}]"));
        assert_near(im[k], 0, 8, &format!("{what} im[{k}]"));
    }
}

#[test]
fn test_sine_odd_size() {
    // sin = cos shifted by -π/2; X[3]/N = -3000i, X[29]/N = +3000i
    let mut re = tone(32, 3, 6000.0, -PI / 2.0);
    let mut im = vec![0i16; 32];
    radix4_fft(&mut re, &mut im, 5).unwrap();

    assert_near(im[3], -3000, 8, "im[3]");
    assert_near(im[29], 3000, 8, "im[29]");
    for k in 0..32 {
        assert_near(re[k], 0, 8, &format!("re[{k}]"));
        if k != 3 && k != 29 {
            assert_near(im[k], 0, 8, &format!("im[{k}]"));
        }
    }
}

#[test]
fn test_delayed_impulse_keeps_magnitude() {
    let mut re = vec![0i16; 256];
    let mut im = vec![0i16; 256];
    re[1] = 12800;
    radix4_fft(&mut re, &mut im, 8).unwrap();

    for k in 0..256 {
        let magnitude =
            (f64::from(re[k]).powi(2) + f64::from(im[k]).powi(2)).sqrt();
        assert!((magnitude - 50.0).abs() <= 2.0, "bin {k}: {magnitude}");
    }
}

#[test]
fn test_largest_size_runs() {
    let n = 1usize << avr_fft::MAX_LOG2_LEN;
    let mut re = tone(n, 100, 20000.0, 0.0);
    let mut im = vec![0i16; n];
    radix4_fft(&mut re, &mut im, avr_fft::MAX_LOG2_LEN).unwrap();

    assert_near(re[100], 10000, 16, "peak");
    assert_near(re[n - 100], 10000, 16, "mirror");
}

#[test]
fn test_permutation_errors() {
    let mut odd = [0u32; 12];
    assert_eq!(bit_reverse_permute(&mut odd), Err(FftError::NotPowerOfTwo(12)));
}
