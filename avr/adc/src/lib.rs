#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

//! # AVR ADC
//!
//! Driver for the analog-to-digital converter of 8-bit AVR devices.
//!
//! The peripheral is modelled as an owned [`Adc`] handle: [`Adc::new`]
//! initializes the hardware and every other operation borrows the handle
//! mutably, so there is no hidden global state. Chip differences live in the
//! [`Variant`] types from `avr-adc-core`; register access goes through the
//! [`Registers`] trait, implemented here by [`Mmio`] for real hardware.
//!
//! ## Module Overview
//! - [`driver`]  – configuration, channel selection, conversions, calibration.
//! - [`convert`] – raw sample to resistance and voltage.
//! - [`filter`]  – fixed-point exponential moving average.
//! - [`shared`]  – single-instance handle for use from `static`s and interrupts.
//! - [`mmio`]    – memory-mapped register backend.
//!
//! ## Example
//!
//! ```rust,no_run
//! use avr_adc::{Adc, AdcConfig, Atmega328p, Mmio};
//! # use embedded_hal::delay::DelayNs;
//! # fn run(delay: &mut impl DelayNs) -> avr_adc::AdcResult<()> {
//! let regs = Mmio::<Atmega328p>::take().expect("ADC already taken");
//! let mut adc = Adc::<Atmega328p, _>::new(regs, AdcConfig::default())?;
//!
//! let vref = adc.measure_reference_voltage(delay)?;
//! let mut level = 0;
//! for _ in 0..8 {
//!     let raw = adc.read(0)?;
//!     level = avr_adc::filter::ema_filter(raw, level);
//! }
//! let volts = adc.raw_to_voltage(level, vref);
//! # let _ = volts;
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod driver;
pub mod filter;
pub mod mmio;
pub mod shared;

pub use avr_adc_core::*;
pub use driver::Adc;
pub use mmio::Mmio;
pub use shared::SharedAdc;

#[cfg(test)]
mod tests;

#[cfg(any(
    all(
        feature = "attiny13a",
        any(
            feature = "atmega8",
            feature = "atmega168",
            feature = "atmega328p",
            feature = "atmega2560"
        )
    ),
    all(
        feature = "atmega8",
        any(feature = "atmega168", feature = "atmega328p", feature = "atmega2560")
    ),
    all(feature = "atmega168", any(feature = "atmega328p", feature = "atmega2560")),
    all(feature = "atmega328p", feature = "atmega2560"),
))]
compile_error!("Select exactly one device feature for crate avr-adc");

/// Device selected through cargo features
#[cfg(feature = "attiny13a")]
pub type Device = avr_adc_core::Attiny13a;
/// Device selected through cargo features
#[cfg(feature = "atmega8")]
pub type Device = avr_adc_core::Atmega8;
/// Device selected through cargo features
#[cfg(feature = "atmega168")]
pub type Device = avr_adc_core::Atmega168;
/// Device selected through cargo features
#[cfg(feature = "atmega328p")]
pub type Device = avr_adc_core::Atmega328p;
/// Device selected through cargo features
#[cfg(feature = "atmega2560")]
pub type Device = avr_adc_core::Atmega2560;
