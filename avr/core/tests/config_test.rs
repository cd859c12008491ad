//! Configuration tests for avr-adc-core

use avr_adc_core::{
    AdcConfig, AdcError, Atmega2560, Atmega328p, Atmega8, Attiny13a, Justification, Prescaler,
    Reference,
};

#[test]
fn test_default_config() {
    let config = AdcConfig::default();
    assert_eq!(config.reference, Reference::Avcc);
    assert_eq!(config.prescaler, Prescaler::Div128);
    assert_eq!(config.justification, Justification::Right);
    assert!(!config.free_running);
    assert_eq!(config.resolution, 1024);
    assert!(config.validate::<Atmega328p>().is_ok());
}

#[test]
fn test_reference_legality_per_variant() {
    let internal_low = AdcConfig::builder().reference(Reference::Internal1V1).build();
    let internal_mid = AdcConfig::builder().reference(Reference::Internal2V56).build();
    let aref = AdcConfig::builder().reference(Reference::Aref).build();

    assert!(internal_low.validate::<Atmega328p>().is_ok());
    assert_eq!(
        internal_mid.validate::<Atmega328p>(),
        Err(AdcError::UnsupportedReference(Reference::Internal2V56))
    );

    assert!(internal_mid.validate::<Atmega8>().is_ok());
    assert_eq!(
        internal_low.validate::<Atmega8>(),
        Err(AdcError::UnsupportedReference(Reference::Internal1V1))
    );

    assert!(internal_low.validate::<Atmega2560>().is_ok());
    assert!(internal_mid.validate::<Atmega2560>().is_ok());

    assert!(internal_low.validate::<Attiny13a>().is_ok());
    assert_eq!(
        aref.validate::<Attiny13a>(),
        Err(AdcError::UnsupportedReference(Reference::Aref))
    );
}

#[test]
fn test_resolution_validation() {
    for bad in [0u16, 1000, 2048] {
        let config = AdcConfig::builder().resolution(bad).build();
        assert_eq!(
            config.validate::<Atmega328p>(),
            Err(AdcError::InvalidResolution(bad))
        );
    }
    let eight_bit = AdcConfig::builder().resolution(256).build();
    assert!(eight_bit.validate::<Atmega328p>().is_ok());
    assert_eq!(eight_bit.sample_shift(), 2);
}

#[test]
fn test_bandgap_override() {
    let config = AdcConfig::default();
    assert_eq!(config.bandgap_millivolts_for::<Atmega328p>(), 1100);
    assert_eq!(config.bandgap_millivolts_for::<Atmega8>(), 1300);

    let tuned = AdcConfig::builder().bandgap_millivolts(1072).build();
    assert_eq!(tuned.bandgap_millivolts_for::<Atmega328p>(), 1072);
}
