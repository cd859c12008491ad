//! Memory-mapped register backend
#![allow(unsafe_code)] // Volatile access to the peripheral's data-memory addresses

use core::cell::Cell;
use core::marker::PhantomData;
use core::ptr;

use critical_section::Mutex;

use avr_adc_core::{DeviceRegisters, Register, Registers, Variant};

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// Volatile access to the ADC registers of variant `V`.
///
/// Only valid when running on a `V` device. A part has one ADC block, so
/// [`take`](Mmio::take) hands out a single instance per program.
pub struct Mmio<V: Variant> {
    _variant: PhantomData<V>,
}

impl<V: Variant> Mmio<V> {
    /// Claim the register block; `None` once it has been claimed
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            let taken = TAKEN.borrow(cs);
            if taken.get() {
                None
            } else {
                taken.set(true);
                Some(Self {
                    _variant: PhantomData,
                })
            }
        })
    }

    /// Create a handle without claiming the register block.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other handle drives the ADC concurrently and
    /// that the program runs on a `V` device.
    pub unsafe fn steal() -> Self {
        Self {
            _variant: PhantomData,
        }
    }

    fn address(reg: Register) -> Option<usize> {
        let map = V::REGISTERS;
        match reg {
            Register::Admux => Some(map.admux),
            Register::Adcsra => Some(map.adcsra),
            Register::Adcsrb => map.adcsrb,
        }
    }
}

impl<V: Variant> DeviceRegisters for Mmio<V> {
    type Variant = V;
}

impl<V: Variant> Registers for Mmio<V> {
    fn read(&mut self, reg: Register) -> u8 {
        match Self::address(reg) {
            // SAFETY: address comes from the variant's register map
            Some(addr) => unsafe { ptr::read_volatile(addr as *const u8) },
            None => 0,
        }
    }

    fn write(&mut self, reg: Register, value: u8) {
        if let Some(addr) = Self::address(reg) {
            // SAFETY: address comes from the variant's register map
            unsafe { ptr::write_volatile(addr as *mut u8, value) }
        }
    }

    fn read_data(&mut self) -> u16 {
        let map = V::REGISTERS;
        // ADCL first: it latches ADCH until ADCH is read
        // SAFETY: addresses come from the variant's register map
        let low = unsafe { ptr::read_volatile(map.adcl as *const u8) };
        let high = unsafe { ptr::read_volatile(map.adch as *const u8) };
        u16::from_le_bytes([low, high])
    }
}
