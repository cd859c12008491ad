//! Device configuration chosen before the converter is initialized

use core::fmt;

use crate::{AdcError, AdcResult, Variant};

/// Voltage reference source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// External voltage on the AREF pin, internal reference off
    Aref,
    /// Supply voltage (AVCC, or VCC on the ATtiny13A)
    Avcc,
    /// Internal 1.1 V reference
    Internal1V1,
    /// Internal 2.56 V reference
    Internal2V56,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Aref => write!(f, "AREF"),
            Reference::Avcc => write!(f, "AVCC"),
            Reference::Internal1V1 => write!(f, "1.1V"),
            Reference::Internal2V56 => write!(f, "2.56V"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Reference {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Reference::Aref => defmt::write!(fmt, "AREF"),
            Reference::Avcc => defmt::write!(fmt, "AVCC"),
            Reference::Internal1V1 => defmt::write!(fmt, "1.1V"),
            Reference::Internal2V56 => defmt::write!(fmt, "2.56V"),
        }
    }
}

/// ADC clock prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prescaler {
    /// Divide by 2
    Div2,
    /// Divide by 4
    Div4,
    /// Divide by 8
    Div8,
    /// Divide by 16
    Div16,
    /// Divide by 32
    Div32,
    /// Divide by 64
    Div64,
    /// Divide by 128
    Div128,
}

impl Prescaler {
    /// Every legal prescaler, smallest divisor first
    pub const ALL: [Prescaler; 7] = [
        Prescaler::Div2,
        Prescaler::Div4,
        Prescaler::Div8,
        Prescaler::Div16,
        Prescaler::Div32,
        Prescaler::Div64,
        Prescaler::Div128,
    ];

    /// Look up the prescaler for a clock divisor
    pub fn from_divisor(divisor: u8) -> AdcResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.divisor() == divisor)
            .ok_or(AdcError::InvalidPrescaler(divisor))
    }

    /// Clock divisor
    pub const fn divisor(self) -> u8 {
        1 << self.bits()
    }

    /// `ADPS2:0` encoding
    pub const fn bits(self) -> u8 {
        match self {
            Prescaler::Div2 => 0b001,
            Prescaler::Div4 => 0b010,
            Prescaler::Div8 => 0b011,
            Prescaler::Div16 => 0b100,
            Prescaler::Div32 => 0b101,
            Prescaler::Div64 => 0b110,
            Prescaler::Div128 => 0b111,
        }
    }
}

impl fmt::Display for Prescaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.divisor())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Prescaler {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "/{}", self.divisor());
    }
}

/// Alignment of the 10-bit result in the 16-bit data register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    /// Result in bits 15:6 (`ADLAR` set), top 8 bits readable from ADCH
    Left,
    /// Result in bits 9:0
    Right,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Justification {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Justification::Left => defmt::write!(fmt, "Left"),
            Justification::Right => defmt::write!(fmt, "Right"),
        }
    }
}

/// What `select_channel` does with a channel the variant cannot address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelPolicy {
    /// Reject with [`AdcError::ChannelOutOfRange`]
    #[default]
    Strict,
    /// Truncate to the mux width, wrapping onto a lower channel
    Mask,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelPolicy {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ChannelPolicy::Strict => defmt::write!(fmt, "Strict"),
            ChannelPolicy::Mask => defmt::write!(fmt, "Mask"),
        }
    }
}

/// Configuration applied by `Adc::new`.
///
/// Defaults: AVCC reference, /128 prescaler, right justification, single
/// conversions, 1024 full scale and the variant's nominal bandgap voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcConfig {
    pub reference: Reference,
    pub prescaler: Prescaler,
    pub justification: Justification,
    pub free_running: bool,
    pub resolution: u16,
    pub bandgap_millivolts: Option<u32>,
    pub channel_policy: ChannelPolicy,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            reference: Reference::Avcc,
            prescaler: Prescaler::Div128,
            justification: Justification::Right,
            free_running: false,
            resolution: 1024,
            bandgap_millivolts: None,
            channel_policy: ChannelPolicy::Strict,
        }
    }
}

impl AdcConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> AdcConfigBuilder {
        AdcConfigBuilder::default()
    }

    /// Check the configuration against a device variant.
    ///
    /// Nothing is substituted: an illegal reference or resolution is an error.
    pub fn validate<V: Variant>(&self) -> AdcResult<()> {
        if V::reference_bits(self.reference).is_none() {
            return Err(AdcError::UnsupportedReference(self.reference));
        }
        if self.resolution == 0
            || !self.resolution.is_power_of_two()
            || self.resolution > SAMPLE_SPAN
        {
            return Err(AdcError::InvalidResolution(self.resolution));
        }
        Ok(())
    }

    /// Right shift that scales a 10-bit sample down to `resolution` codes.
    ///
    /// Only meaningful for a configuration that passed [`validate`](Self::validate).
    pub const fn sample_shift(&self) -> u32 {
        SAMPLE_SPAN.trailing_zeros().saturating_sub(self.resolution.trailing_zeros())
    }

    /// Bandgap voltage used by calibration for variant `V`
    pub fn bandgap_millivolts_for<V: Variant>(&self) -> u32 {
        self.bandgap_millivolts.unwrap_or(V::BANDGAP_MILLIVOLTS)
    }
}

/// Number of codes of the 10-bit converter
const SAMPLE_SPAN: u16 = 1024;

#[cfg(feature = "defmt")]
impl defmt::Format for AdcConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "AdcConfig {{ ref: {}, prescaler: {}, justify: {}, free_running: {}, resolution: {} }}",
            self.reference,
            self.prescaler,
            self.justification,
            self.free_running,
            self.resolution
        );
    }
}

/// Builder for [`AdcConfig`].
#[derive(Debug, Clone, Default)]
pub struct AdcConfigBuilder {
    config: AdcConfig,
}

impl AdcConfigBuilder {
    /// Sets the reference source.
    pub fn reference(mut self, reference: Reference) -> Self {
        self.config.reference = reference;
        self
    }

    /// Sets the clock prescaler.
    pub fn prescaler(mut self, prescaler: Prescaler) -> Self {
        self.config.prescaler = prescaler;
        self
    }

    /// Sets the result justification.
    pub fn justification(mut self, justification: Justification) -> Self {
        self.config.justification = justification;
        self
    }

    /// Enables or disables free-running conversions.
    pub fn free_running(mut self, enabled: bool) -> Self {
        self.config.free_running = enabled;
        self
    }

    /// Sets the full-scale constant used by the converters.
    pub fn resolution(mut self, resolution: u16) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Overrides the bandgap voltage used for calibration.
    pub fn bandgap_millivolts(mut self, millivolts: u32) -> Self {
        self.config.bandgap_millivolts = Some(millivolts);
        self
    }

    /// Sets the out-of-range channel policy.
    pub fn channel_policy(mut self, policy: ChannelPolicy) -> Self {
        self.config.channel_policy = policy;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> AdcConfig {
        self.config
    }
}
