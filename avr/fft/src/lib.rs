#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # AVR FFT
//!
//! In-place forward FFT over `i16` real/imaginary arrays with Q15 twiddle
//! factors, sized for microcontrollers without an FPU.
//!
//! Every pass divides by its radix, so the output is the scaled spectrum
//! `X[k] / N` and cannot overflow for `i16` input.
//!
//! ```rust
//! let mut re = [100i16; 16];
//! let mut im = [0i16; 16];
//! avr_fft::radix4_fft(&mut re, &mut im, 4).unwrap();
//! assert_eq!(re[0], 100);
//! assert!(re[1..].iter().all(|&x| x == 0));
//! ```

use core::fmt;

mod permute;
mod radix4;
mod twiddle;

pub use permute::bit_reverse_permute;
pub use radix4::radix4_fft;

/// Largest supported transform, `2^MAX_LOG2_LEN` points
pub const MAX_LOG2_LEN: u32 = 12;

/// Result type of the transform functions
pub type FftResult<T> = Result<T, FftError>;

/// Error types for FFT operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// `log2_len` outside `1..=MAX_LOG2_LEN`
    UnsupportedSize(u32),
    /// Real and imaginary slices differ in length
    LengthMismatch {
        /// Length of the real slice
        real: usize,
        /// Length of the imaginary slice
        imag: usize,
    },
    /// Slice length is not `2^log2_len`
    WrongLength {
        /// Actual length
        len: usize,
        /// Length implied by `log2_len`
        expected: usize,
    },
    /// Permutation length is not a power of two
    NotPowerOfTwo(usize),
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::UnsupportedSize(ldn) => {
                write!(f, "Unsupported size 2^{} (max 2^{})", ldn, MAX_LOG2_LEN)
            }
            FftError::LengthMismatch { real, imag } => {
                write!(f, "Real length {} != imaginary length {}", real, imag)
            }
            FftError::WrongLength { len, expected } => {
                write!(f, "Length {} but transform size is {}", len, expected)
            }
            FftError::NotPowerOfTwo(len) => write!(f, "Length {} is not a power of two", len),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

#[cfg(feature = "defmt")]
impl defmt::Format for FftError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FftError::UnsupportedSize(ldn) => defmt::write!(fmt, "UnsupportedSize({})", ldn),
            FftError::LengthMismatch { real, imag } => {
                defmt::write!(fmt, "LengthMismatch({}/{})", real, imag)
            }
            FftError::WrongLength { len, expected } => {
                defmt::write!(fmt, "WrongLength({}/{})", len, expected)
            }
            FftError::NotPowerOfTwo(len) => defmt::write!(fmt, "NotPowerOfTwo({})", len),
        }
    }
}
