//! Single shared converter handle
//!
//! [`SharedAdc`] holds an optional [`Adc`] behind a critical-section mutex so a
//! `static` can be reached from both the main loop and an interrupt handler.
//!
//! ```rust,ignore
//! static ADC: SharedAdc<Atmega328p, Mmio<Atmega328p>> = SharedAdc::new();
//!
//! ADC.install(Adc::new(regs, AdcConfig::default())?);
//! let level = ADC.with(|adc| adc.read(2))??;
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use avr_adc_core::{AdcError, AdcResult, DeviceRegisters, Variant};

use crate::Adc;

/// Interrupt-safe slot for one [`Adc`]
pub struct SharedAdc<V: Variant, R: DeviceRegisters<Variant = V>> {
    inner: Mutex<RefCell<Option<Adc<V, R>>>>,
}

impl<V: Variant, R: DeviceRegisters<Variant = V>> SharedAdc<V, R> {
    /// An empty slot, usable in a `static` initializer
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store `adc`, returning the handle it replaces
    pub fn install(&self, adc: Adc<V, R>) -> Option<Adc<V, R>> {
        critical_section::with(|cs| {
            let previous = self.inner.borrow_ref_mut(cs).replace(adc);
            if previous.is_some() {
                log::warn!("{}: replacing installed ADC handle", V::NAME);
            }
            previous
        })
    }

    /// Run `f` on the installed handle inside a critical section.
    ///
    /// Fails with [`AdcError::NotInitialized`] when nothing is installed.
    /// `f` must not call back into the same `SharedAdc`.
    pub fn with<T, F>(&self, f: F) -> AdcResult<T>
    where
        F: FnOnce(&mut Adc<V, R>) -> T,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow_ref_mut(cs)
                .as_mut()
                .map(f)
                .ok_or(AdcError::NotInitialized)
        })
    }

    /// Remove and return the installed handle
    pub fn take(&self) -> Option<Adc<V, R>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Whether a handle is installed
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }
}

impl<V: Variant, R: DeviceRegisters<Variant = V>> Default for SharedAdc<V, R> {
    fn default() -> Self {
        Self::new()
    }
}
