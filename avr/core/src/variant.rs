//! Device variants
//!
//! Each supported chip family is a zero-sized type implementing [`Variant`].
//! The driver is generic over the variant, so register layout differences are
//! resolved at compile time without `cfg` branches in the algorithmic code.

use crate::registers::{admux, adcsrb};
use crate::{AdcError, AdcResult, ChannelPolicy, Reference};

/// Data-memory addresses of the ADC registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterMap {
    pub adcl: usize,
    pub adch: usize,
    pub adcsra: usize,
    pub adcsrb: Option<usize>,
    pub admux: usize,
}

/// Mux bits produced by encoding a channel number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuxSelection {
    /// Value for the ADMUX mux field
    pub mux: u8,
    /// State of the `MUX5` bit in ADCSRB
    pub mux5: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for MuxSelection {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "MuxSelection {{ mux: {=u8:b}, mux5: {} }}", self.mux, self.mux5);
    }
}

/// Register layout and legal options of one AVR family.
pub trait Variant {
    /// Human-readable part name
    const NAME: &'static str;
    /// Single-ended inputs addressable through `select_channel`
    const CHANNEL_COUNT: u8;
    /// Low channel bits kept when masking
    const CHANNEL_MASK: u8;
    /// Every ADMUX bit belonging to the mux field
    const MUX_FIELD: u8;
    /// Whether channels above 7 are reached through `MUX5`
    const HAS_MUX5: bool;
    /// Whether the part has an ADCSRB register
    const HAS_ADCSRB: bool;
    /// Mux code of the internal bandgap reference, if measurable
    const BANDGAP_MUX: Option<u8>;
    /// Nominal bandgap voltage in millivolts
    const BANDGAP_MILLIVOLTS: u32;
    /// Register addresses
    const REGISTERS: RegisterMap;

    /// `REFS` bits for a reference source, `None` if the part lacks it
    fn reference_bits(reference: Reference) -> Option<u8>;

    /// Encode a channel, truncating out-of-range values
    fn mask_channel(channel: u8) -> MuxSelection {
        if Self::HAS_MUX5 && channel >= 8 {
            MuxSelection {
                mux: (channel - 8) & Self::CHANNEL_MASK,
                mux5: true,
            }
        } else {
            MuxSelection {
                mux: channel & Self::CHANNEL_MASK,
                mux5: false,
            }
        }
    }

    /// Encode a channel according to `policy`
    fn encode_channel(channel: u8, policy: ChannelPolicy) -> AdcResult<MuxSelection> {
        if channel >= Self::CHANNEL_COUNT && policy == ChannelPolicy::Strict {
            return Err(AdcError::ChannelOutOfRange {
                channel,
                count: Self::CHANNEL_COUNT,
            });
        }
        Ok(Self::mask_channel(channel))
    }

    /// Decode mux bits back into a channel number
    fn decode_channel(admux_value: u8, mux5: bool) -> u8 {
        let mux = admux_value & Self::MUX_FIELD;
        if Self::HAS_MUX5 && mux5 {
            mux + 8
        } else {
            mux
        }
    }
}

/// Memory map shared by the ATtiny13A and ATmega8 (I/O space + 0x20)
const LOW_IO_MAP: RegisterMap = RegisterMap {
    adcl: 0x24,
    adch: 0x25,
    adcsra: 0x26,
    adcsrb: None,
    admux: 0x27,
};

/// Memory map of the extended I/O parts
const EXTENDED_IO_MAP: RegisterMap = RegisterMap {
    adcl: 0x78,
    adch: 0x79,
    adcsra: 0x7A,
    adcsrb: Some(0x7B),
    admux: 0x7C,
};

/// ATtiny13A: four inputs, VCC or internal 1.1 V, no bandgap channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attiny13a;

impl Variant for Attiny13a {
    const NAME: &'static str = "ATtiny13A";
    const CHANNEL_COUNT: u8 = 4;
    const CHANNEL_MASK: u8 = 0b0000_0011;
    const MUX_FIELD: u8 = 0b0000_0011;
    const HAS_MUX5: bool = false;
    const HAS_ADCSRB: bool = true;
    const BANDGAP_MUX: Option<u8> = None;
    const BANDGAP_MILLIVOLTS: u32 = 1100;
    const REGISTERS: RegisterMap = RegisterMap {
        adcsrb: Some(0x23),
        ..LOW_IO_MAP
    };

    fn reference_bits(reference: Reference) -> Option<u8> {
        match reference {
            Reference::Avcc => Some(0),
            Reference::Internal1V1 => Some(admux::REFS0),
            Reference::Aref | Reference::Internal2V56 => None,
        }
    }
}

/// ATmega8: eight inputs, internal 2.56 V, 1.30 V bandgap, no ADCSRB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Atmega8;

impl Variant for Atmega8 {
    const NAME: &'static str = "ATmega8";
    const CHANNEL_COUNT: u8 = 8;
    const CHANNEL_MASK: u8 = 0b0000_0111;
    const MUX_FIELD: u8 = 0b0000_1111;
    const HAS_MUX5: bool = false;
    const HAS_ADCSRB: bool = false;
    const BANDGAP_MUX: Option<u8> = Some(0b1110);
    const BANDGAP_MILLIVOLTS: u32 = 1300;
    const REGISTERS: RegisterMap = LOW_IO_MAP;

    fn reference_bits(reference: Reference) -> Option<u8> {
        match reference {
            Reference::Aref => Some(0),
            Reference::Avcc => Some(admux::REFS0),
            Reference::Internal2V56 => Some(admux::REFS1 | admux::REFS0),
            Reference::Internal1V1 => None,
        }
    }
}

/// ATmega168/168P/328/328P: eight inputs, internal 1.1 V, 1.1 V bandgap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Atmega328p;

/// The ATmega168 family shares the ATmega328P ADC block
pub type Atmega168 = Atmega328p;

impl Variant for Atmega328p {
    const NAME: &'static str = "ATmega168/328";
    const CHANNEL_COUNT: u8 = 8;
    const CHANNEL_MASK: u8 = 0b0000_0111;
    const MUX_FIELD: u8 = 0b0000_1111;
    const HAS_MUX5: bool = false;
    const HAS_ADCSRB: bool = true;
    const BANDGAP_MUX: Option<u8> = Some(0b1110);
    const BANDGAP_MILLIVOLTS: u32 = 1100;
    const REGISTERS: RegisterMap = EXTENDED_IO_MAP;

    fn reference_bits(reference: Reference) -> Option<u8> {
        match reference {
            Reference::Aref => Some(0),
            Reference::Avcc => Some(admux::REFS0),
            Reference::Internal1V1 => Some(admux::REFS1 | admux::REFS0),
            Reference::Internal2V56 => None,
        }
    }
}

/// ATmega2560: sixteen inputs through `MUX5`, both internal references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Atmega2560;

impl Variant for Atmega2560 {
    const NAME: &'static str = "ATmega2560";
    const CHANNEL_COUNT: u8 = 16;
    const CHANNEL_MASK: u8 = 0b0000_0111;
    const MUX_FIELD: u8 = 0b0001_1111;
    const HAS_MUX5: bool = true;
    const HAS_ADCSRB: bool = true;
    const BANDGAP_MUX: Option<u8> = Some(0b1_1110);
    const BANDGAP_MILLIVOLTS: u32 = 1100;
    const REGISTERS: RegisterMap = EXTENDED_IO_MAP;

    fn reference_bits(reference: Reference) -> Option<u8> {
        match reference {
            Reference::Aref => Some(0),
            Reference::Avcc => Some(admux::REFS0),
            Reference::Internal1V1 => Some(admux::REFS1),
            Reference::Internal2V56 => Some(admux::REFS1 | admux::REFS0),
        }
    }
}

/// `MUX5` bit as stored in ADCSRB
pub const fn mux5_bit(selected: bool) -> u8 {
    if selected {
        adcsrb::MUX5
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mega2560_extension_bit() {
        assert_eq!(
            Atmega2560::mask_channel(3),
            MuxSelection { mux: 3, mux5: false }
        );
        assert_eq!(
            Atmega2560::mask_channel(8),
            MuxSelection { mux: 0, mux5: true }
        );
        assert_eq!(
            Atmega2560::mask_channel(15),
            MuxSelection { mux: 7, mux5: true }
        );
        assert_eq!(Atmega2560::decode_channel(0b0100_0111, true), 15);
        assert_eq!(Atmega2560::decode_channel(0b0100_0111, false), 7);
    }

    #[test]
    fn test_tiny_masks_two_bits() {
        assert_eq!(Attiny13a::mask_channel(5).mux, 1);
        assert!(Attiny13a::encode_channel(4, ChannelPolicy::Strict).is_err());
        assert_eq!(
            Attiny13a::encode_channel(4, ChannelPolicy::Mask),
            Ok(MuxSelection { mux: 0, mux5: false })
        );
    }

    #[test]
    fn test_bandgap_code_fits_mux_field() {
        assert_eq!(Atmega8::BANDGAP_MUX.map(|m| m & !Atmega8::MUX_FIELD), Some(0));
        assert_eq!(Atmega328p::BANDGAP_MUX.map(|m| m & !Atmega328p::MUX_FIELD), Some(0));
        assert_eq!(Atmega2560::BANDGAP_MUX.map(|m| m & !Atmega2560::MUX_FIELD), Some(0));
        assert_eq!(Attiny13a::BANDGAP_MUX, None);
    }
}
