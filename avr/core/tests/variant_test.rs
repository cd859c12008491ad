//! Variant tests for avr-adc-core

use avr_adc_core::{
    admux, Atmega168, Atmega2560, Atmega328p, Atmega8, Attiny13a, ChannelPolicy, MuxSelection,
    Reference, Variant,
};

#[test]
fn test_strict_policy_rejects_out_of_range() {
    assert!(Atmega328p::encode_channel(7, ChannelPolicy::Strict).is_ok());
    assert!(Atmega328p::encode_channel(8, ChannelPolicy::Strict).is_err());
    assert!(Atmega2560::encode_channel(15, ChannelPolicy::Strict).is_ok());
    assert!(Atmega2560::encode_channel(16, ChannelPolicy::Strict).is_err());
}

#[test]
fn test_mask_policy_wraps_by_mask_period() {
    for channel in 0..8u8 {
        assert_eq!(
            Atmega328p::encode_channel(channel, ChannelPolicy::Mask),
            Atmega328p::encode_channel(channel + 8, ChannelPolicy::Mask)
        );
    }
    // Above 8 the 2560 wraps inside the MUX5 bank
    assert_eq!(
        Atmega2560::encode_channel(17, ChannelPolicy::Mask),
        Ok(MuxSelection { mux: 1, mux5: true })
    );
}

#[test]
fn test_mega168_shares_mega328_layout() {
    assert_eq!(Atmega168::NAME, Atmega328p::NAME);
    assert_eq!(Atmega168::REGISTERS, Atmega328p::REGISTERS);
}

#[test]
fn test_register_maps() {
    assert_eq!(Atmega328p::REGISTERS.admux, 0x7C);
    assert_eq!(Atmega328p::REGISTERS.adcsrb, Some(0x7B));
    assert_eq!(Atmega8::REGISTERS.admux, 0x27);
    assert_eq!(Atmega8::REGISTERS.adcsrb, None);
    assert_eq!(Attiny13a::REGISTERS.adcsrb, Some(0x23));
    assert_eq!(Atmega2560::REGISTERS.adcl, 0x78);
}

#[test]
fn test_reference_bits() {
    assert_eq!(Atmega328p::reference_bits(Reference::Avcc), Some(admux::REFS0));
    assert_eq!(
        Atmega328p::reference_bits(Reference::Internal1V1),
        Some(admux::REFS1 | admux::REFS0)
    );
    assert_eq!(Atmega2560::reference_bits(Reference::Internal1V1), Some(admux::REFS1));
    assert_eq!(Attiny13a::reference_bits(Reference::Internal1V1), Some(admux::REFS0));
}
