//! The ADC driver
//!
//! [`Adc`] owns a register backend and the configuration it was initialized
//! with. Conversions are either blocking ([`Adc::read`], [`Adc::read_selected`]),
//! bounded by a timeout ([`Adc::read_selected_timeout`]) or split into a start
//! and an [`nb`] poll ([`Adc::start_conversion`], [`Adc::try_read`]).

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;

use avr_adc_core::{
    adcsra, adcsrb, admux, mux5_bit, AdcConfig, AdcError, AdcResult, DeviceRegisters,
    Justification, Register, Variant, LEFT_ADJUST_SHIFT, SAMPLE_MAX,
};

use crate::convert;

/// Settling time after switching the mux to the bandgap input
pub const BANDGAP_SETTLE_US: u32 = 250;

/// Interval between status polls in [`Adc::read_selected_timeout`]
pub const POLL_INTERVAL_US: u32 = 2;

/// An initialized analog-to-digital converter.
///
/// `V` selects the chip family, `R` the register backend, which must address
/// the same family. The handle is the only way to touch the converter, so
/// exclusive access follows from `&mut self`.
///
/// ```compile_fail
/// use avr_adc::{Adc, AdcConfig, Atmega328p, Atmega8, Mmio};
///
/// let regs = Mmio::<Atmega8>::take().unwrap();
/// let _adc = Adc::<Atmega328p, _>::new(regs, AdcConfig::default());
/// ```
pub struct Adc<V: Variant, R: DeviceRegisters<Variant = V>> {
    regs: R,
    config: AdcConfig,
    _variant: PhantomData<V>,
}

impl<V: Variant, R: DeviceRegisters<Variant = V>> Adc<V, R> {
    /// Validate `config` and initialize the converter.
    ///
    /// Register sequence: zero ADMUX, ADCSRA (and ADCSRB where present), set
    /// the reference bits, the prescaler, the justification, the free-running
    /// trigger if requested, enable the converter and, in free-running mode,
    /// start the first conversion. An invalid configuration is reported
    /// before any register is written.
    pub fn new(mut regs: R, config: AdcConfig) -> AdcResult<Self> {
        config.validate::<V>()?;
        let refs = V::reference_bits(config.reference)
            .ok_or(AdcError::UnsupportedReference(config.reference))?;

        regs.write(Register::Admux, 0);
        regs.write(Register::Adcsra, 0);
        if V::HAS_ADCSRB {
            regs.write(Register::Adcsrb, 0);
        }

        regs.set_bits(Register::Admux, refs & admux::REFS_MASK);
        regs.set_bits(Register::Adcsra, config.prescaler.bits() & adcsra::ADPS_MASK);
        match config.justification {
            Justification::Left => regs.set_bits(Register::Admux, admux::ADLAR),
            Justification::Right => regs.clear_bits(Register::Admux, admux::ADLAR),
        }

        if config.free_running {
            if V::HAS_ADCSRB {
                regs.clear_bits(Register::Adcsrb, adcsrb::ADTS_MASK);
            }
            regs.set_bits(Register::Adcsra, adcsra::ADATE);
            regs.set_bits(Register::Adcsra, adcsra::ADIE);
        }

        let mut adc = Self {
            regs,
            config,
            _variant: PhantomData,
        };
        adc.enable();

        log::debug!(
            "{} ADC up: ref {}, clock {}, {:?}, free running {}",
            V::NAME,
            config.reference,
            config.prescaler,
            config.justification,
            config.free_running
        );

        Ok(adc)
    }

    /// Disable the converter and give back the register backend
    pub fn release(mut self) -> R {
        self.regs.clear_bits(Register::Adcsra, adcsra::ADEN);
        log::debug!("{} ADC released", V::NAME);
        self.regs
    }

    /// Configuration the converter was initialized with
    pub fn config(&self) -> &AdcConfig {
        &self.config
    }

    /// Register backend
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Register backend, mutably.
    ///
    /// Writes made through this bypass the driver; the next driver call
    /// assumes nothing about the mux or status bits it did not set itself.
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Route `channel` to the converter.
    ///
    /// The converter is disabled around the mux update. With
    /// [`ChannelPolicy::Strict`](avr_adc_core::ChannelPolicy::Strict) an
    /// unaddressable channel is rejected and no register is touched; with
    /// `Mask` it wraps onto a lower channel.
    pub fn select_channel(&mut self, channel: u8) -> AdcResult<()> {
        let selection = V::encode_channel(channel, self.config.channel_policy)?;
        if channel >= V::CHANNEL_COUNT {
            log::warn!(
                "{}: channel {} masked to {}",
                V::NAME,
                channel,
                V::decode_channel(selection.mux, selection.mux5)
            );
        }

        self.regs.clear_bits(Register::Adcsra, adcsra::ADEN);
        self.regs
            .modify(Register::Admux, |v| (v & !V::MUX_FIELD) | selection.mux);
        if V::HAS_MUX5 {
            self.regs.modify(Register::Adcsrb, |v| {
                (v & !adcsrb::MUX5) | mux5_bit(selection.mux5)
            });
        }
        self.enable();

        log::trace!("{}: channel {} selected", V::NAME, channel);
        Ok(())
    }

    /// Channel currently routed to the converter
    pub fn selected_channel(&mut self) -> u8 {
        let admux_value = self.regs.read(Register::Admux);
        V::decode_channel(admux_value, self.mux5_selected())
    }

    /// Convert the selected channel, blocking until the result is ready.
    ///
    /// The result is right-aligned in `0..resolution` whatever the
    /// justification.
    pub fn read_selected(&mut self) -> u16 {
        self.start_conversion();
        while !self.conversion_complete() {
            core::hint::spin_loop();
        }
        self.finish_conversion()
    }

    /// Like [`read_selected`](Self::read_selected), giving up after
    /// `timeout_us` microseconds.
    ///
    /// The status flag is polled every [`POLL_INTERVAL_US`]. A conversion that
    /// timed out is left running.
    pub fn read_selected_timeout<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timeout_us: u32,
    ) -> AdcResult<u16> {
        self.start_conversion();
        let mut waited = 0u32;
        loop {
            if self.conversion_complete() {
                return Ok(self.finish_conversion());
            }
            if waited >= timeout_us {
                log::warn!("{}: conversion timed out after {} us", V::NAME, waited);
                return Err(AdcError::Timeout);
            }
            delay.delay_us(POLL_INTERVAL_US);
            waited = waited.saturating_add(POLL_INTERVAL_US);
        }
    }

    /// Start a conversion on the selected channel without waiting
    pub fn start_conversion(&mut self) {
        self.regs.set_bits(Register::Adcsra, adcsra::ADSC);
    }

    /// Collect the result of a conversion started with
    /// [`start_conversion`](Self::start_conversion).
    ///
    /// Returns `WouldBlock` while the conversion runs and
    /// [`AdcError::Idle`] when nothing was started.
    pub fn try_read(&mut self) -> nb::Result<u16, AdcError> {
        let status = self.regs.read(Register::Adcsra);
        if status & adcsra::ADIF != 0 {
            Ok(self.finish_conversion())
        } else if status & adcsra::ADSC != 0 {
            Err(nb::Error::WouldBlock)
        } else {
            Err(nb::Error::Other(AdcError::Idle))
        }
    }

    /// Latest value in the data register, normalized, without touching flags.
    ///
    /// Meant for conversion-complete interrupt handlers in free-running mode,
    /// where entering the vector already cleared `ADIF`.
    pub fn last_result(&mut self) -> u16 {
        let data = self.regs.read_data();
        self.normalize(data)
    }

    /// Select `channel` and convert it
    pub fn read(&mut self, channel: u8) -> AdcResult<u16> {
        self.select_channel(channel)?;
        Ok(self.read_selected())
    }

    /// Estimate the reference voltage in volts from the internal bandgap.
    ///
    /// Converts the bandgap input after [`BANDGAP_SETTLE_US`] of settling and
    /// returns `bandgap_mV * resolution / raw / 1000`, `raw` being scaled to
    /// the configured resolution like any other sample. ADMUX and `MUX5` are
    /// restored afterwards, also when the bandgap reads as zero
    /// ([`AdcError::BandgapFault`]).
    pub fn measure_reference_voltage<D: DelayNs>(&mut self, delay: &mut D) -> AdcResult<f32> {
        let bandgap = V::BANDGAP_MUX.ok_or(AdcError::NoBandgapChannel)?;

        let saved_admux = self.regs.read(Register::Admux);
        let saved_mux5 = self.mux5_selected();

        self.regs.clear_bits(Register::Adcsra, adcsra::ADEN);
        self.regs
            .modify(Register::Admux, |v| (v & !V::MUX_FIELD) | bandgap);
        if V::HAS_MUX5 {
            self.regs.clear_bits(Register::Adcsrb, adcsrb::MUX5);
        }
        self.regs.set_bits(Register::Adcsra, adcsra::ADEN);

        delay.delay_us(BANDGAP_SETTLE_US);
        let raw = self.read_selected();

        self.regs.clear_bits(Register::Adcsra, adcsra::ADEN);
        self.regs.write(Register::Admux, saved_admux);
        if V::HAS_MUX5 {
            self.regs.modify(Register::Adcsrb, |v| {
                (v & !adcsrb::MUX5) | mux5_bit(saved_mux5)
            });
        }
        self.enable();

        if raw == 0 {
            log::error!("{}: bandgap converted to zero", V::NAME);
            return Err(AdcError::BandgapFault);
        }

        let millivolts = self.config.bandgap_millivolts_for::<V>();
        let volts =
            millivolts as f32 * f32::from(self.config.resolution) / f32::from(raw) / 1000.0;
        log::debug!("{}: bandgap raw {} -> vref {} V", V::NAME, raw, volts);
        Ok(volts)
    }

    /// Resistance of the unknown leg of a divider, see [`convert::raw_to_resistance`]
    pub fn raw_to_resistance(&self, raw: u16, balance_ohms: u16) -> i32 {
        convert::raw_to_resistance(raw, balance_ohms, self.config.resolution)
    }

    /// Voltage for a sample, see [`convert::raw_to_voltage`]
    pub fn raw_to_voltage(&self, raw: u16, vref: f32) -> f32 {
        convert::raw_to_voltage(raw, vref, self.config.resolution)
    }

    fn enable(&mut self) {
        self.regs.set_bits(Register::Adcsra, adcsra::ADEN);
        if self.config.free_running {
            self.regs.set_bits(Register::Adcsra, adcsra::ADSC);
        }
    }

    fn mux5_selected(&mut self) -> bool {
        V::HAS_MUX5 && self.regs.read(Register::Adcsrb) & adcsrb::MUX5 != 0
    }

    fn conversion_complete(&mut self) -> bool {
        self.regs.read(Register::Adcsra) & adcsra::ADIF != 0
    }

    fn finish_conversion(&mut self) -> u16 {
        let data = self.regs.read_data();
        // ADIF is write-one-to-clear
        self.regs.set_bits(Register::Adcsra, adcsra::ADIF);
        let sample = self.normalize(data);
        log::trace!("{}: sample {}", V::NAME, sample);
        sample
    }

    fn normalize(&self, data: u16) -> u16 {
        let sample = match self.config.justification {
            Justification::Left => data >> LEFT_ADJUST_SHIFT,
            Justification::Right => data & SAMPLE_MAX,
        };
        sample >> self.config.sample_shift()
    }
}
