#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # AVR ADC Core
//!
//! Value types shared by the AVR ADC driver: the device configuration, the
//! error taxonomy, the register bit layout and the [`Variant`] strategy trait
//! that describes each supported chip family.
//!
//! Nothing in this crate touches hardware. Register access goes through the
//! [`Registers`] trait, implemented by the memory-mapped backend in `avr-adc`
//! and by the host simulation in `avr-adc-sim`.

use core::fmt;

pub mod config;
pub mod registers;
pub mod variant;

pub use config::*;
pub use registers::*;
pub use variant::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the ADC driver
pub type AdcResult<T> = Result<T, AdcError>;

/// Error types for ADC driver operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcError {
    /// The reference source is not wired on this device variant
    UnsupportedReference(Reference),
    /// Clock divisor outside {2, 4, 8, 16, 32, 64, 128}
    InvalidPrescaler(u8),
    /// Full-scale constant is zero, not a power of two, or above 1024
    InvalidResolution(u16),
    /// Channel number beyond the inputs the variant can multiplex
    ChannelOutOfRange {
        /// Requested channel
        channel: u8,
        /// Number of channels the variant exposes
        count: u8,
    },
    /// The variant has no internal bandgap channel to calibrate against
    NoBandgapChannel,
    /// The bandgap conversion returned zero
    BandgapFault,
    /// The conversion did not complete within the allotted time
    Timeout,
    /// No conversion was started or is in flight
    Idle,
    /// The shared handle has not been installed yet
    NotInitialized,
}

/// Coarse classification of [`AdcError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Illegal configuration, rejected before any register write
    Configuration,
    /// Caller passed an out-of-range channel
    Range,
    /// Degenerate sample fed into calibration math
    Degenerate,
    /// Hardware never signalled completion
    Liveness,
    /// Operation called in the wrong state or on the wrong variant
    Usage,
}

impl AdcError {
    /// Which part of the error taxonomy this error belongs to
    pub const fn kind(&self) -> ErrorKind {
        match self {
            AdcError::UnsupportedReference(_)
            | AdcError::InvalidPrescaler(_)
            | AdcError::InvalidResolution(_) => ErrorKind::Configuration,
            AdcError::ChannelOutOfRange { .. } => ErrorKind::Range,
            AdcError::BandgapFault => ErrorKind::Degenerate,
            AdcError::Timeout => ErrorKind::Liveness,
            AdcError::NoBandgapChannel | AdcError::Idle | AdcError::NotInitialized => {
                ErrorKind::Usage
            }
        }
    }
}

impl fmt::Display for AdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdcError::UnsupportedReference(r) => {
                write!(f, "Reference {} not available on this device", r)
            }
            AdcError::InvalidPrescaler(div) => write!(f, "Invalid prescaler divisor {}", div),
            AdcError::InvalidResolution(res) => write!(f, "Invalid resolution {}", res),
            AdcError::ChannelOutOfRange { channel, count } => {
                write!(f, "Channel {} out of range (device has {})", channel, count)
            }
            AdcError::NoBandgapChannel => write!(f, "Device has no bandgap channel"),
            AdcError::BandgapFault => write!(f, "Bandgap conversion returned zero"),
            AdcError::Timeout => write!(f, "Conversion timed out"),
            AdcError::Idle => write!(f, "No conversion pending"),
            AdcError::NotInitialized => write!(f, "ADC not initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AdcError {}

#[cfg(feature = "defmt")]
impl defmt::Format for AdcError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            AdcError::UnsupportedReference(r) => defmt::write!(fmt, "UnsupportedReference({})", r),
            AdcError::InvalidPrescaler(div) => defmt::write!(fmt, "InvalidPrescaler({})", div),
            AdcError::InvalidResolution(res) => defmt::write!(fmt, "InvalidResolution({})", res),
            AdcError::ChannelOutOfRange { channel, count } => {
                defmt::write!(fmt, "ChannelOutOfRange({}/{})", channel, count)
            }
            AdcError::NoBandgapChannel => defmt::write!(fmt, "NoBandgapChannel"),
            AdcError::BandgapFault => defmt::write!(fmt, "BandgapFault"),
            AdcError::Timeout => defmt::write!(fmt, "Timeout"),
            AdcError::Idle => defmt::write!(fmt, "Idle"),
            AdcError::NotInitialized => defmt::write!(fmt, "NotInitialized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ErrorKind {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ErrorKind::Configuration => defmt::write!(fmt, "Configuration"),
            ErrorKind::Range => defmt::write!(fmt, "Range"),
            ErrorKind::Degenerate => defmt::write!(fmt, "Degenerate"),
            ErrorKind::Liveness => defmt::write!(fmt, "Liveness"),
            ErrorKind::Usage => defmt::write!(fmt, "Usage"),
        }
    }
}
