//! Host simulation of the AVR ADC
//!
//! Provides a [`Registers`] implementation that behaves like the ADC block of
//! the selected [`Variant`] closely enough to exercise the driver on a
//! workstation, plus a [`SimDelay`] that records requested delays instead of
//! sleeping.
//!
//! Modelled behaviour:
//! - a conversion starts when `ADSC` is written with `ADEN` set and completes
//!   after a configurable number of ADCSRA polls;
//! - completion latches the input of the selected mux code into the data
//!   register (left-adjusted when `ADLAR` is set), sets `ADIF` and clears `ADSC`;
//! - `ADIF` is cleared by writing one to it;
//! - with `ADATE` set the next conversion starts immediately (free running);
//! - clearing `ADEN` aborts a conversion in flight;
//! - a stalled converter never completes.

use std::marker::PhantomData;

use avr_adc_core::{
    adcsra, adcsrb, admux, DeviceRegisters, Register, Registers, Variant, SAMPLE_MAX,
};

mod delay;

pub use delay::SimDelay;

/// Polls of ADCSRA a conversion takes unless configured otherwise
pub const DEFAULT_LATENCY: u32 = 3;

/// Mux codes addressable with and without `MUX5`
const INPUT_SLOTS: usize = 64;

/// Simulated ADC register block
pub struct SimRegisters<V: Variant> {
    admux: u8,
    adcsra: u8,
    adcsrb: u8,
    data: u16,
    inputs: [u16; INPUT_SLOTS],
    latency: u32,
    remaining: Option<u32>,
    stalled: bool,
    conversions: u32,
    journal: Vec<(Register, u8)>,
    _variant: PhantomData<V>,
}

impl<V: Variant> SimRegisters<V> {
    /// Create a register block in its reset state
    pub fn new() -> Self {
        Self {
            admux: 0,
            adcsra: 0,
            adcsrb: 0,
            data: 0,
            inputs: [0; INPUT_SLOTS],
            latency: DEFAULT_LATENCY,
            remaining: None,
            stalled: false,
            conversions: 0,
            journal: Vec::new(),
            _variant: PhantomData,
        }
    }

    /// Set how many ADCSRA polls a conversion takes (at least one)
    pub fn with_latency(mut self, polls: u32) -> Self {
        self.latency = polls.max(1);
        self
    }

    /// Drive an external channel, using the variant's channel encoding
    pub fn set_channel_input(&mut self, channel: u8, raw: u16) {
        let selection = V::mask_channel(channel);
        self.set_mux_input(selection.mux, selection.mux5, raw);
    }

    /// Drive the input behind a raw mux code
    pub fn set_mux_input(&mut self, mux: u8, mux5: bool, raw: u16) {
        let slot = Self::slot(mux & V::MUX_FIELD, mux5);
        self.inputs[slot] = raw.min(SAMPLE_MAX);
    }

    /// Set the level the bandgap channel converts to
    pub fn set_bandgap(&mut self, raw: u16) {
        match V::BANDGAP_MUX {
            Some(mux) => self.set_mux_input(mux, false, raw),
            None => log::warn!("{} has no bandgap channel", V::NAME),
        }
    }

    /// Stop (or resume) completing conversions
    pub fn stall(&mut self, stalled: bool) {
        self.stalled = stalled;
    }

    /// Current ADMUX
    pub fn admux(&self) -> u8 {
        self.admux
    }

    /// Current ADCSRA, without advancing a conversion
    pub fn adcsra(&self) -> u8 {
        self.adcsra
    }

    /// Current ADCSRB
    pub fn adcsrb(&self) -> u8 {
        self.adcsrb
    }

    /// Whether a conversion is in flight
    pub fn is_converting(&self) -> bool {
        self.remaining.is_some()
    }

    /// Number of completed conversions
    pub fn conversions(&self) -> u32 {
        self.conversions
    }

    /// Every register write since creation or the last [`clear_journal`](Self::clear_journal)
    pub fn journal(&self) -> &[(Register, u8)] {
        &self.journal
    }

    /// Forget recorded writes
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn slot(mux: u8, mux5: bool) -> usize {
        usize::from(mux) | (usize::from(mux5) << 5)
    }

    fn selected_slot(&self) -> usize {
        let mux5 = V::HAS_MUX5 && self.adcsrb & adcsrb::MUX5 != 0;
        Self::slot(self.admux & V::MUX_FIELD, mux5)
    }

    fn poll(&mut self) {
        let Some(remaining) = self.remaining else {
            return;
        };
        if self.stalled {
            return;
        }
        if remaining <= 1 {
            self.complete();
        } else {
            self.remaining = Some(remaining - 1);
        }
    }

    fn complete(&mut self) {
        let sample = self.inputs[self.selected_slot()];
        self.data = if self.admux & admux::ADLAR != 0 {
            sample << 6
        } else {
            sample
        };
        self.adcsra |= adcsra::ADIF;
        self.conversions += 1;
        log::trace!(
            "sim conversion #{} slot {} -> {}",
            self.conversions,
            self.selected_slot(),
            sample
        );

        if self.adcsra & adcsra::ADATE != 0 {
            self.remaining = Some(self.latency);
        } else {
            self.adcsra &= !adcsra::ADSC;
            self.remaining = None;
        }
    }

    fn write_adcsra(&mut self, value: u8) {
        let mut next = (value & !adcsra::ADIF) | (self.adcsra & adcsra::ADIF);
        if value & adcsra::ADIF != 0 {
            next &= !adcsra::ADIF;
        }

        if next & adcsra::ADEN == 0 {
            if self.remaining.take().is_some() {
                log::trace!("sim conversion aborted");
            }
            next &= !adcsra::ADSC;
        } else if self.remaining.is_some() {
            // Writing zero to ADSC has no effect while converting
            next |= adcsra::ADSC;
        } else if next & adcsra::ADSC != 0 {
            self.remaining = Some(self.latency);
        }

        self.adcsra = next;
    }
}

impl<V: Variant> Default for SimRegisters<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Variant> DeviceRegisters for SimRegisters<V> {
    type Variant = V;
}

impl<V: Variant> Registers for SimRegisters<V> {
    fn read(&mut self, reg: Register) -> u8 {
        match reg {
            Register::Admux => self.admux,
            Register::Adcsra => {
                self.poll();
                self.adcsra
            }
            Register::Adcsrb if V::HAS_ADCSRB => self.adcsrb,
            Register::Adcsrb => 0,
        }
    }

    fn write(&mut self, reg: Register, value: u8) {
        self.journal.push((reg, value));
        match reg {
            Register::Admux => self.admux = value,
            Register::Adcsra => self.write_adcsra(value),
            Register::Adcsrb if V::HAS_ADCSRB => self.adcsrb = value,
            Register::Adcsrb => log::warn!("{} has no ADCSRB, write ignored", V::NAME),
        }
    }

    fn read_data(&mut self) -> u16 {
        self.data
    }
}
