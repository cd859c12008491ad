use avr_adc_core::{AdcConfig, Variant};
use avr_adc_sim::SimRegisters;

use crate::Adc;


type SimAdc<V> = Adc<V, SimRegisters<V>>;

fn sim_adc<V: Variant>(config: AdcConfig) -> SimAdc<V> {
    Adc::new(SimRegisters::new(), config).unwrap()
}
